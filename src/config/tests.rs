use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use crate::error::SpindleError;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_spindle_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SPINDLE_CONFIG_PATH", "/tmp/spindle-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/spindle-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("spindle")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("spindle")
            .join("config.toml")
    );
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let _g1 = EnvGuard::remove("SPINDLE__AUDIO__VOLUME");

    let s = Settings::load_from(Some(&dir.path().join("absent.toml"))).unwrap();
    assert_eq!(s.audio.volume, 1.0);
    assert_eq!(s.audio.time_update_ms, 250);
    assert_eq!(s.controls.scrub_seconds, 5);
    assert!(s.playlist.tracks.is_empty());
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file_with_tracks() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
volume = 0.4
time_update_ms = 100
quit_fade_out_ms = 0

[controls]
scrub_seconds = 9
volume_step = 0.1

[ui]
header_text = "hello"
show_cover = false

[[playlist.tracks]]
title = "Daydream"
artist = "Low Tide"
src = "audio/daydream.mp3"
cover = "covers/daydream.jpg"

[[playlist.tracks]]
title = "Night Drive"
src = "audio/night-drive.mp3"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::remove("SPINDLE__AUDIO__VOLUME");

    let s = Settings::load_from(Some(&cfg_path)).unwrap();
    assert_eq!(s.audio.volume, 0.4);
    assert_eq!(s.audio.time_update_ms, 100);
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.controls.scrub_seconds, 9);
    assert_eq!(s.controls.volume_step, 0.1);
    assert_eq!(s.ui.header_text, "hello");
    assert!(!s.ui.show_cover);
    assert_eq!(s.playlist.tracks.len(), 2);
    assert_eq!(s.playlist.tracks[0].artist, "Low Tide");
    assert_eq!(
        s.playlist.tracks[0].cover.as_deref(),
        Some("covers/daydream.jpg")
    );
    assert_eq!(s.playlist.tracks[1].artist, "");
    assert!(s.playlist.tracks[1].cover.is_none());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
volume = 0.9
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SPINDLE__AUDIO__VOLUME", "0.25");

    let s = Settings::load_from(Some(&cfg_path)).unwrap();
    assert_eq!(s.audio.volume, 0.25);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.audio.volume = 1.5;
    assert!(matches!(
        s.validate(),
        Err(SpindleError::InvalidConfig {
            field: "audio.volume",
            ..
        })
    ));

    let mut s = Settings::default();
    s.audio.time_update_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.volume_step = 0.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playlist.tracks.push(TrackEntry {
        title: "Blank".into(),
        artist: String::new(),
        src: "  ".into(),
        cover: None,
    });
    assert!(s.validate().is_err());
}

#[test]
fn defaults_render_as_toml() {
    let text = Settings::default().to_toml().unwrap();
    assert!(text.contains("[audio]"));
    assert!(text.contains("scrub_seconds = 5"));
}
