use std::{
    env,
    path::{Path, PathBuf},
};

use super::schema::Settings;
use crate::error::{Result, SpindleError};

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `SPINDLE__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and the resolved config file.
    pub fn load() -> Result<Self> {
        Self::load_from(resolve_config_path().as_deref())
    }

    /// Load settings from environment and an explicit (optional) config file.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("SPINDLE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(SpindleError::InvalidConfig {
                field: "audio.volume",
                reason: format!("{} is outside 0.0..=1.0", self.audio.volume),
            });
        }
        if self.audio.time_update_ms == 0 {
            return Err(SpindleError::InvalidConfig {
                field: "audio.time_update_ms",
                reason: "must be >= 1".to_string(),
            });
        }
        if !(self.controls.volume_step > 0.0 && self.controls.volume_step <= 1.0) {
            return Err(SpindleError::InvalidConfig {
                field: "controls.volume_step",
                reason: format!("{} is outside (0.0, 1.0]", self.controls.volume_step),
            });
        }
        if let Some(entry) = self.playlist.tracks.iter().find(|t| t.src.trim().is_empty()) {
            return Err(SpindleError::InvalidConfig {
                field: "playlist.tracks.src",
                reason: format!("track '{}' has an empty src", entry.title),
            });
        }
        Ok(())
    }

    /// Render the settings as TOML.
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Resolve the config path from `SPINDLE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("SPINDLE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/spindle/config.toml`
/// or `~/.config/spindle/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("spindle").join("config.toml"))
}
