mod app;
mod audio;
mod cli;
mod config;
mod error;
mod input;
mod logging;
mod player;
mod playlist;
mod runtime;
mod time;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
