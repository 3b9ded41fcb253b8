use std::{
    env,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::app::App;
use crate::audio::MediaElement;
use crate::config::{PlaylistSettings, Settings};
use crate::error::{Result, SpindleError};
use crate::player::PlayerController;
use crate::playlist::{Playlist, Track, scan};

/// Build the playlist once: configured tracks win, otherwise scan `cli_dir`,
/// then `playlist.scan_dir`, then the current directory.
pub fn build_playlist(settings: &PlaylistSettings, cli_dir: Option<&Path>) -> Result<Playlist> {
    if !settings.tracks.is_empty() {
        let tracks = settings
            .tracks
            .iter()
            .map(|entry| {
                let track = Track::new(&entry.title, &entry.artist, &entry.src);
                match &entry.cover {
                    Some(cover) => track.with_cover(cover),
                    None => track,
                }
            })
            .collect();
        info!(count = settings.tracks.len(), "using configured playlist");
        return Playlist::new(tracks).ok_or_else(|| SpindleError::EmptyPlaylist(PathBuf::new()));
    }

    let dir = match cli_dir.map(Path::to_path_buf).or_else(|| settings.scan_dir.clone()) {
        Some(dir) => dir,
        None => env::current_dir()?,
    };
    let tracks = scan(&dir, settings);
    info!(dir = %dir.display(), count = tracks.len(), "using scanned playlist");
    Playlist::new(tracks).ok_or(SpindleError::EmptyPlaylist(dir))
}

/// Show the playlist and load the first track, paused, at the configured volume.
pub fn kickoff<M: MediaElement>(
    controller: &mut PlayerController<M>,
    app: &mut App,
    settings: &Settings,
) {
    app.build_playlist(controller.playlist());
    controller.load_track(0);
    controller.set_volume(settings.audio.volume);
    controller.highlight_active();
    controller.update_play_icon();
    for update in controller.take_updates() {
        app.apply(update);
    }
}
