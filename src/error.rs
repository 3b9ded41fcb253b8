use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that stop the player from starting.
#[derive(Error, Debug)]
pub enum SpindleError {
    /// The config file or environment could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Config(#[from] ::config::ConfigError),

    /// A config value is outside its accepted range.
    #[error("invalid config field '{field}': {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    /// Neither the config nor the scanned directory produced a single track.
    #[error("playlist is empty: no tracks configured and none found under '{}'", .0.display())]
    EmptyPlaylist(PathBuf),

    /// No usable directory for the log file.
    #[error("no log directory: neither XDG_STATE_HOME nor HOME is set")]
    NoLogDir,

    #[error("failed to open log file: {0}")]
    LogFile(#[from] tracing_appender::rolling::InitError),

    #[error("failed to install log subscriber: {0}")]
    LogSubscriber(#[from] tracing_subscriber::util::TryInitError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SpindleError>;
