use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{AudioElement, MediaElement};
use crate::config::{self, ControlsSettings};
use crate::input::{self, Action};
use crate::player::PlayerController;
use crate::ui;

/// Main terminal event loop: delivers media notifications, draws, and runs one
/// user action at a time. Returns `Ok(())` when quit is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlayerController<AudioElement>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Some(ev) = controller.media_mut().try_next_event() {
            controller.handle_media_event(ev);
        }
        apply_updates(app, controller);
        app.media_error = controller.media().error();

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::map_key(key, app.focus)
                }
                Event::Mouse(mouse) => input::map_mouse(mouse, app),
                _ => None,
            };
            if let Some(action) = action {
                if handle_action(action, &settings.controls, app, controller) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn apply_updates<M: MediaElement>(app: &mut App, controller: &mut PlayerController<M>) {
    for update in controller.take_updates() {
        app.apply(update);
    }
}

/// Execute one action. Returns `true` when the player should quit.
pub(super) fn handle_action<M: MediaElement>(
    action: Action,
    controls: &ControlsSettings,
    app: &mut App,
    controller: &mut PlayerController<M>,
) -> bool {
    match action {
        Action::Quit => return true,
        Action::TogglePlay => controller.toggle_play(),
        Action::Next => controller.next_track(),
        Action::Prev => controller.prev_track(),
        Action::PlayRow(index) => controller.play_track(index),
        Action::PlaySelected => {
            if let Some(index) = app.selected_index() {
                controller.play_track(index);
            }
        }
        Action::CursorDown => app.cursor_next(),
        Action::CursorUp => app.cursor_prev(),
        Action::SeekDrag(value) => {
            // The control moves with the pointer; the controller only previews.
            app.seek_drag = true;
            app.seek_value = value;
            controller.seek_input(value);
        }
        Action::SeekRelease(value) => {
            app.seek_drag = false;
            app.seek_value = value;
            controller.seek_commit(value);
        }
        Action::ScrubForward => controller.scrub(controls.scrub_seconds as f64),
        Action::ScrubBack => controller.scrub(-(controls.scrub_seconds as f64)),
        Action::SetVolume(volume) => controller.set_volume(volume),
        Action::VolumeUp => {
            let volume = controller.media().volume() + controls.volume_step;
            controller.set_volume(volume);
        }
        Action::VolumeDown => {
            let volume = controller.media().volume() - controls.volume_step;
            controller.set_volume(volume);
        }
        Action::OpenFilter => app.enter_filter_mode(),
        Action::FilterInput(c) => {
            app.push_filter_char(c);
            app.build_playlist(controller.playlist());
        }
        Action::FilterBackspace => {
            app.pop_filter_char();
            app.build_playlist(controller.playlist());
        }
        Action::FilterCancel => {
            app.clear_filter();
            app.build_playlist(controller.playlist());
        }
        Action::FilterSubmit => app.exit_filter_mode(),
    }

    apply_updates(app, controller);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Focus;
    use crate::audio::MediaEvent;
    use crate::player::testing::FakeMedia;
    use crate::playlist::{Playlist, Track};

    fn setup() -> (App, PlayerController<FakeMedia>) {
        let playlist = Playlist::new(vec![
            Track::new("Daydream", "Low Tide", "audio/daydream.mp3"),
            Track::new("Night Drive", "Neon City", "audio/night-drive.mp3"),
            Track::new("Sunset Walk", "Golden Hour", "audio/sunset-walk.mp3"),
        ])
        .unwrap();
        let mut controller = PlayerController::new(playlist, FakeMedia::new());
        let mut app = App::new();
        app.build_playlist(controller.playlist());
        controller.load_track(0);
        controller.highlight_active();
        apply_updates(&mut app, &mut controller);
        (app, controller)
    }

    fn act(action: Action, app: &mut App, controller: &mut PlayerController<FakeMedia>) -> bool {
        handle_action(action, &ControlsSettings::default(), app, controller)
    }

    #[test]
    fn quit_stops_the_loop() {
        let (mut app, mut c) = setup();
        assert!(act(Action::Quit, &mut app, &mut c));
        assert!(!act(Action::TogglePlay, &mut app, &mut c));
    }

    #[test]
    fn play_selected_follows_the_cursor() {
        let (mut app, mut c) = setup();
        act(Action::CursorDown, &mut app, &mut c);
        act(Action::CursorDown, &mut app, &mut c);
        act(Action::PlaySelected, &mut app, &mut c);

        assert_eq!(c.index(), 2);
        assert_eq!(c.media().src, "audio/sunset-walk.mp3");
        assert!(!c.media().paused);
        assert_eq!(app.active, Some(2));
        assert_eq!(app.title, "Sunset Walk");
    }

    #[test]
    fn seek_drag_previews_and_release_commits() {
        let (mut app, mut c) = setup();
        c.media_mut().duration = Some(200.0);

        act(Action::SeekDrag(50.0), &mut app, &mut c);
        assert!(app.seek_drag);
        assert!(c.is_seeking());
        assert_eq!(app.elapsed, "1:40");
        assert_eq!(c.media().position, 0.0);

        // Position reports during the drag leave the control alone.
        c.media_mut().position = 3.0;
        c.handle_media_event(MediaEvent::TimeUpdate);
        apply_updates(&mut app, &mut c);
        assert_eq!(app.seek_value, 50.0);

        act(Action::SeekRelease(25.0), &mut app, &mut c);
        assert!(!app.seek_drag);
        assert!(!c.is_seeking());
        assert_eq!(c.media().position, 50.0);
    }

    #[test]
    fn volume_steps_are_clamped() {
        let (mut app, mut c) = setup();
        act(Action::VolumeUp, &mut app, &mut c);
        assert_eq!(app.volume_value, 1.0);

        act(Action::SetVolume(0.5), &mut app, &mut c);
        act(Action::VolumeDown, &mut app, &mut c);
        assert!((app.volume_value - 0.45).abs() < 1e-9);
    }

    #[test]
    fn filter_typing_rebuilds_rows_and_cancel_restores() {
        let (mut app, mut c) = setup();
        act(Action::OpenFilter, &mut app, &mut c);
        assert_eq!(app.focus, Focus::Filter);

        for ch in "sw".chars() {
            act(Action::FilterInput(ch), &mut app, &mut c);
        }
        assert_eq!(app.rows.len(), 1);
        // Typing never reaches the player.
        assert_eq!(c.media().play_requests, 0);

        act(Action::FilterBackspace, &mut app, &mut c);
        assert_eq!(app.filter_query, "s");

        act(Action::FilterCancel, &mut app, &mut c);
        assert_eq!(app.focus, Focus::Playlist);
        assert_eq!(app.rows.len(), 3);
        assert_eq!(app.selected_index(), Some(0));
    }
}
