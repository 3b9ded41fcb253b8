/// A change the surface should reflect, emitted by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    /// Now-playing metadata for a freshly loaded track.
    NowPlaying {
        title: String,
        artist: String,
        cover: Option<String>,
        cover_alt: String,
    },
    /// Elapsed time text.
    Elapsed(String),
    /// Total duration text.
    Duration(String),
    /// Seek control position, percent.
    SeekPosition(f64),
    /// Play/pause affordance.
    PlayState { playing: bool },
    /// Duration label of a playlist row, by track index.
    RowDuration { index: usize, label: String },
    /// The playlist row to emphasize, by track index.
    ActiveRow(usize),
    /// Volume control position, `0.0..=1.0`.
    Volume(f64),
}
