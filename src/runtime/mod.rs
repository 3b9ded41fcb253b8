use std::time::Duration;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::AudioElement;
use crate::cli::Cli;
use crate::logging;
use crate::player::PlayerController;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logging is best effort; the player runs without a log file.
    let _log_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("spindle: logging disabled: {e}");
            None
        }
    };

    let settings = settings::load_settings(cli.config.as_deref());
    if cli.dump_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let playlist = startup::build_playlist(&settings.playlist, cli.dir.as_deref())?;
    info!(tracks = playlist.len(), "starting player");

    let media = AudioElement::new(&settings.audio)?;
    let mut controller = PlayerController::new(playlist, media);
    let mut app = App::new();
    startup::kickoff(&mut controller, &mut app, &settings);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut controller);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        warn!(error = %e, "event loop failed");
    }
    controller
        .media_mut()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
    info!("player stopped");

    run_result
}
