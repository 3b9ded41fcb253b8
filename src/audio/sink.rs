//! Utilities for creating `rodio` sinks from audio locations.
//!
//! The helper here encapsulates opening/decoding a file, probing its duration
//! and preparing a paused `Sink`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::file::AudioFile;
use rodio::mixer::Mixer;
use rodio::{Decoder, Sink, Source};

use super::types::MediaError;

pub(super) struct LoadedSource {
    pub sink: Sink,
    pub duration: Option<Duration>,
}

/// Opens a source into a paused `Sink` on a mixer.
pub(super) type OpenSource = fn(&Mixer, &Path, f64) -> Result<LoadedSource, MediaError>;

/// Create a paused `Sink` for the file at `path`.
pub(super) fn create_sink(
    mixer: &Mixer,
    path: &Path,
    volume: f64,
) -> Result<LoadedSource, MediaError> {
    let file = File::open(path).map_err(|source| MediaError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|source| MediaError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    // Many mp3 streams carry no length header; fall back to the tag reader.
    let duration = source.total_duration().or_else(|| probe_duration(path));

    let sink = Sink::connect_new(mixer);
    sink.set_volume(volume as f32);
    sink.append(source);
    sink.pause();
    Ok(LoadedSource { sink, duration })
}

fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}
