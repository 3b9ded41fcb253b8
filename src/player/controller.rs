use std::mem;

use tracing::{debug, info};

use crate::audio::{MediaElement, MediaEvent};
use crate::playlist::Playlist;
use crate::time::format_time;

use super::subscriptions::OnceSubscriptions;
use super::view::ViewUpdate;

/// Reactions the controller schedules on media notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    /// Read the element's duration, show it and cache it on the current track.
    CacheDuration,
}

/// Single authority over the current index and the loaded source.
pub struct PlayerController<M: MediaElement> {
    playlist: Playlist,
    media: M,
    index: usize,
    is_seeking: bool,
    /// Last percentage complete reported to the seek control.
    progress: f64,
    subscriptions: OnceSubscriptions<Pending>,
    updates: Vec<ViewUpdate>,
}

impl<M: MediaElement> PlayerController<M> {
    /// Create a controller at index 0. Nothing is loaded until `load_track`.
    pub fn new(playlist: Playlist, media: M) -> Self {
        Self {
            playlist,
            media,
            index: 0,
            is_seeking: false,
            progress: 0.0,
            subscriptions: OnceSubscriptions::default(),
            updates: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn index(&self) -> usize {
        self.index
    }

    #[cfg(test)]
    pub fn is_seeking(&self) -> bool {
        self.is_seeking
    }

    #[cfg(test)]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Number of one-shot metadata reactions still waiting.
    #[cfg(test)]
    pub fn pending_metadata(&self) -> usize {
        self.subscriptions.pending(MediaEvent::LoadedMetadata)
    }

    /// Drain the view updates produced since the last call.
    pub fn take_updates(&mut self) -> Vec<ViewUpdate> {
        mem::take(&mut self.updates)
    }

    /// Load track `i`, wrapped into range (negative values count from the end).
    ///
    /// Does not start playback.
    pub fn load_track(&mut self, i: isize) {
        let len = self.playlist.len() as isize;
        self.index = i.rem_euclid(len) as usize;

        let Some(track) = self.playlist.track_at(self.index) else {
            return;
        };
        info!(index = self.index, title = %track.title, "loading track");

        self.media.set_src(&track.audio_location);
        debug!(src = self.media.src(), "source requested");
        self.updates.push(ViewUpdate::NowPlaying {
            title: track.title.clone(),
            artist: track.artist.clone(),
            cover: track.cover_location.clone(),
            cover_alt: format!("{} – {} cover", track.title, track.artist),
        });
        self.updates.push(ViewUpdate::Elapsed(format_time(0.0)));
        self.updates.push(ViewUpdate::Duration(track.duration_label()));
        self.updates.push(ViewUpdate::SeekPosition(0.0));
        self.progress = 0.0;

        self.subscriptions
            .subscribe(MediaEvent::LoadedMetadata, Pending::CacheDuration);
    }

    pub fn toggle_play(&mut self) {
        if self.media.paused() {
            self.media.play();
        } else {
            self.media.pause();
        }
    }

    pub fn next_track(&mut self) {
        self.load_track(self.index as isize + 1);
        self.media.play();
        self.highlight_active();
    }

    pub fn prev_track(&mut self) {
        self.load_track(self.index as isize - 1);
        self.media.play();
        self.highlight_active();
    }

    /// Load and play the track behind a playlist row.
    pub fn play_track(&mut self, index: usize) {
        self.load_track(index as isize);
        self.media.play();
        self.highlight_active();
    }

    pub fn update_play_icon(&mut self) {
        let playing = !self.media.paused() && !self.media.ended();
        self.updates.push(ViewUpdate::PlayState { playing });
    }

    pub fn highlight_active(&mut self) {
        self.updates.push(ViewUpdate::ActiveRow(self.index));
    }

    /// The user is dragging the seek control to `value` percent.
    ///
    /// Shows the time under the control without moving the element.
    pub fn seek_input(&mut self, value: f64) {
        self.is_seeking = true;
        let pct = value / 100.0;
        let preview = self.media.duration().map_or(f64::NAN, |d| d * pct);
        self.updates.push(ViewUpdate::Elapsed(format_time(preview)));
    }

    /// The user released the seek control at `value` percent.
    pub fn seek_commit(&mut self, value: f64) {
        let pct = value / 100.0;
        if let Some(d) = self.media.duration().filter(|d| d.is_finite()) {
            self.media.set_current_time(d * pct);
        }
        self.is_seeking = false;
    }

    /// Move the playback position by `delta` seconds through the seek protocol.
    pub fn scrub(&mut self, delta: f64) {
        let Some(d) = self.media.duration().filter(|d| d.is_finite() && *d > 0.0) else {
            return;
        };
        let target = (self.media.current_time() + delta).clamp(0.0, d);
        let value = target / d * 100.0;
        self.updates.push(ViewUpdate::SeekPosition(value));
        self.seek_input(value);
        self.seek_commit(value);
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.media.set_volume(volume);
        self.updates.push(ViewUpdate::Volume(self.media.volume()));
    }

    /// React to a notification from the media element.
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        debug!(?event, index = self.index, "media event");
        match event {
            MediaEvent::LoadedMetadata => {
                for pending in self.subscriptions.take(event) {
                    match pending {
                        Pending::CacheDuration => self.cache_duration(),
                    }
                }
            }
            MediaEvent::TimeUpdate => {
                let current = self.media.current_time();
                if !self.is_seeking {
                    let duration = self.media.duration().filter(|d| *d > 0.0).unwrap_or(1.0);
                    self.progress = current / duration * 100.0;
                    self.updates.push(ViewUpdate::SeekPosition(self.progress));
                }
                self.updates.push(ViewUpdate::Elapsed(format_time(current)));
            }
            MediaEvent::Play | MediaEvent::Pause => self.update_play_icon(),
            MediaEvent::Ended => self.next_track(),
        }
    }

    fn cache_duration(&mut self) {
        let d = self.media.duration().unwrap_or(f64::NAN);
        self.playlist.set_duration(self.index, d);

        // A duration learned earlier wins over whatever this load reports.
        let label = self
            .playlist
            .track_at(self.index)
            .and_then(|t| t.duration)
            .map_or_else(|| format_time(d), format_time);
        self.updates.push(ViewUpdate::Duration(label.clone()));
        self.updates.push(ViewUpdate::RowDuration {
            index: self.index,
            label,
        });
    }
}
