//! Audio-related small types and handles.
//!
//! This module defines the notifications an element emits, the commands sent
//! to the audio thread and the state shared between the two.

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Notifications emitted by a media element.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MediaEvent {
    /// Duration became known for the current source. Once per load.
    LoadedMetadata,
    /// Periodic position update while playing.
    TimeUpdate,
    /// Playback started or resumed.
    Play,
    /// Playback paused (also sent when a track runs out).
    Pause,
    /// The current source played to its end.
    Ended,
}

#[derive(Debug)]
pub(super) enum AudioCmd {
    /// Replace the current source; `generation` tags the notifications it produces.
    Load { generation: u64, src: String },
    Play,
    Pause,
    /// Jump to an absolute position in seconds.
    Seek(f64),
    SetVolume(f64),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Element state readable from the controller thread.
///
/// Request methods update it immediately; the audio thread updates position,
/// duration and the end-of-track flags as playback progresses.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaState {
    /// Load the properties describe; the audio thread only writes while its
    /// own load is current.
    pub generation: u64,
    pub paused: bool,
    pub ended: bool,
    /// Seconds; `None` until the source has been probed.
    pub duration: Option<f64>,
    /// Current position in seconds.
    pub position: f64,
    pub volume: f64,
    /// Last load failure for the current source.
    pub error: Option<String>,
}

impl Default for MediaState {
    fn default() -> Self {
        Self {
            generation: 0,
            paused: true,
            ended: false,
            duration: None,
            position: 0.0,
            volume: 1.0,
            error: None,
        }
    }
}

pub(super) type MediaHandle = Arc<Mutex<MediaState>>;

#[derive(thiserror::Error, Debug)]
pub enum MediaError {
    #[error("failed to open '{}': {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },

    #[error("no audio output device: {0}")]
    NoOutput(String),
}
