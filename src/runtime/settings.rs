use std::path::Path;

use tracing::warn;

use crate::config::{self, Settings};

/// Load and validate settings. The config is optional; any failure falls back
/// to defaults so the player still starts.
pub fn load_settings(config_path: Option<&Path>) -> Settings {
    let path = config_path
        .map(Path::to_path_buf)
        .or_else(config::resolve_config_path);

    match Settings::load_from(path.as_deref()) {
        Ok(s) => {
            if let Err(e) = s.validate() {
                warn!(error = %e, "invalid config, using defaults");
                eprintln!("spindle: invalid config, using defaults: {e}");
                Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            warn!(error = %e, "failed to load config, using defaults");
            eprintln!("spindle: failed to load config, using defaults: {e}");
            Settings::default()
        }
    }
}
