use crate::time::format_time;

/// A single playlist entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub title: String,
    pub artist: String,
    /// Where the audio element loads this track from.
    pub audio_location: String,
    pub cover_location: Option<String>,
    /// Seconds; `None` until the audio element reports it.
    pub duration: Option<f64>,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        audio_location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            audio_location: audio_location.into(),
            cover_location: None,
            duration: None,
        }
    }

    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover_location = Some(cover.into());
        self
    }

    /// Duration text for the playlist row, `0:00` while unknown.
    pub fn duration_label(&self) -> String {
        self.duration.map(format_time).unwrap_or_else(|| format_time(0.0))
    }

    /// `artist - title`, used for sorting and filtering.
    pub fn display(&self) -> String {
        if self.artist.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.artist.trim(), self.title)
        }
    }
}

/// Ordered, fixed-membership list of tracks. Never empty.
#[derive(Clone, Debug)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Build a playlist; `None` when `tracks` is empty.
    pub fn new(tracks: Vec<Track>) -> Option<Self> {
        if tracks.is_empty() {
            None
        } else {
            Some(Self { tracks })
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn track_at(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Cache a learned duration for the track at `index`.
    ///
    /// Only the first finite, non-negative value is kept. Returns whether the
    /// value was stored.
    pub fn set_duration(&mut self, index: usize, secs: f64) -> bool {
        if !secs.is_finite() || secs < 0.0 {
            return false;
        }
        match self.tracks.get_mut(index) {
            Some(track) if track.duration.is_none() => {
                track.duration = Some(secs);
                true
            }
            _ => false,
        }
    }
}
