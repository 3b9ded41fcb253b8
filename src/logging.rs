//! Tracing setup.
//!
//! The terminal is owned by the UI, so log lines go to a daily-rolling file
//! under the XDG state directory instead of stdout.

use std::{env, fs, path::PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Result, SpindleError};

const DAYS_TO_KEEP: usize = 7;

/// `$XDG_STATE_HOME/spindle` or `~/.local/state/spindle`.
pub fn log_dir() -> Result<PathBuf> {
    let state_home = match env::var_os("XDG_STATE_HOME") {
        Some(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".local").join("state"))
            .ok_or(SpindleError::NoLogDir)?,
    };
    Ok(state_home.join("spindle"))
}

/// Install the global subscriber. `RUST_LOG` overrides the default `info`.
///
/// Keep the returned guard alive for as long as logs should be flushed.
pub fn init() -> Result<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let dir = log_dir()?;
    fs::create_dir_all(&dir)?;

    let file_appender = Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(DAYS_TO_KEEP)
        .filename_prefix("spindle")
        .filename_suffix("log")
        .build(&dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(true)
                .with_level(true)
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(guard)
}
