//! Surface model types: `App`, `Row`, `Focus` and `HitAreas`.
//!
//! `App` holds what the terminal shows: now-playing text, control positions
//! and the playlist rows. It changes by applying the controller's
//! `ViewUpdate`s and by direct user input on its own controls.

use ratatui::layout::Rect;

use crate::player::ViewUpdate;
use crate::playlist::Playlist;
use crate::time::format_time;

/// Which control receives typed characters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    /// Global shortcuts are active.
    #[default]
    Playlist,
    /// The filter prompt is a text input; shortcuts are ignored.
    Filter,
}

/// One rendered playlist row.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    /// Track index in the playlist.
    pub index: usize,
    pub title: String,
    pub artist: String,
    pub time: String,
}

impl Row {
    /// `artist - title`, the text the filter matches against.
    pub fn display(&self) -> String {
        if self.artist.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.artist.trim(), self.title)
        }
    }
}

/// Clickable regions recorded by the last draw.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HitAreas {
    pub prev: Rect,
    pub play: Rect,
    pub next: Rect,
    pub seek: Rect,
    pub volume: Rect,
    /// Inner area of the playlist block.
    pub list: Rect,
    /// Position in `rows` of the first visible row.
    pub list_start: usize,
}

/// The rendering surface.
#[derive(Debug)]
pub struct App {
    pub title: String,
    pub artist: String,
    pub cover: Option<String>,
    pub cover_alt: String,
    pub elapsed: String,
    pub duration: String,
    /// Seek control position, percent.
    pub seek_value: f64,
    /// Volume control position, `0.0..=1.0`.
    pub volume_value: f64,
    pub playing: bool,
    /// Load failure reported by the media element for the current source.
    pub media_error: Option<String>,

    pub rows: Vec<Row>,
    /// Track index of the emphasized row.
    pub active: Option<usize>,
    /// Position in `rows` of the keyboard cursor.
    pub cursor: usize,

    pub focus: Focus,
    pub filter_query: String,

    pub hit: HitAreas,
    /// A seek drag that started on the seek bar is in progress.
    pub seek_drag: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            artist: String::new(),
            cover: None,
            cover_alt: String::new(),
            elapsed: format_time(0.0),
            duration: format_time(0.0),
            seek_value: 0.0,
            volume_value: 1.0,
            playing: false,
            media_error: None,
            rows: Vec::new(),
            active: None,
            cursor: 0,
            focus: Focus::Playlist,
            filter_query: String::new(),
            hit: HitAreas::default(),
            seek_drag: false,
        }
    }

    /// Reflect a controller update on the surface.
    pub fn apply(&mut self, update: ViewUpdate) {
        match update {
            ViewUpdate::NowPlaying {
                title,
                artist,
                cover,
                cover_alt,
            } => {
                self.title = title;
                self.artist = artist;
                self.cover = cover.filter(|c| !c.trim().is_empty());
                self.cover_alt = cover_alt;
            }
            ViewUpdate::Elapsed(text) => self.elapsed = text,
            ViewUpdate::Duration(text) => self.duration = text,
            ViewUpdate::SeekPosition(v) => self.seek_value = v.clamp(0.0, 100.0),
            ViewUpdate::PlayState { playing } => self.playing = playing,
            ViewUpdate::RowDuration { index, label } => {
                // Rows hidden by the filter are simply not updated.
                if let Some(row) = self.rows.iter_mut().find(|r| r.index == index) {
                    row.time = label;
                }
            }
            ViewUpdate::ActiveRow(index) => {
                self.active = Some(index);
                if let Some(pos) = self.rows.iter().position(|r| r.index == index) {
                    self.cursor = pos;
                }
            }
            ViewUpdate::Volume(v) => self.volume_value = v.clamp(0.0, 1.0),
        }
    }

    /// Rebuild every row from `playlist`, keeping only tracks that match the
    /// current filter.
    pub fn build_playlist(&mut self, playlist: &Playlist) {
        let query = self.filter_query.trim().to_string();
        self.rows = playlist
            .iter()
            .enumerate()
            .filter(|(_, t)| Self::fuzzy_match_positions(&t.display(), &query).is_some())
            .map(|(index, t)| Row {
                index,
                title: t.title.clone(),
                artist: t.artist.clone(),
                time: t.duration_label(),
            })
            .collect();

        let active_pos = self
            .active
            .and_then(|a| self.rows.iter().position(|r| r.index == a));
        self.cursor = match active_pos {
            Some(pos) if query.is_empty() => pos,
            _ => self.cursor.min(self.rows.len().saturating_sub(1)),
        };
    }

    /// Track index under the keyboard cursor.
    pub fn selected_index(&self) -> Option<usize> {
        self.rows.get(self.cursor).map(|r| r.index)
    }

    /// Move the cursor down, wrapping to the first row.
    pub fn cursor_next(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = (self.cursor + 1) % self.rows.len();
        }
    }

    /// Move the cursor up, wrapping to the last row.
    pub fn cursor_prev(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = match self.cursor {
                0 => self.rows.len() - 1,
                c => c - 1,
            };
        }
    }

    /// Label of the play/pause affordance.
    pub fn play_label(&self) -> &'static str {
        if self.playing { "Pause" } else { "Play" }
    }

    pub fn enter_filter_mode(&mut self) {
        self.focus = Focus::Filter;
    }

    /// Leave the prompt but keep the filter applied.
    pub fn exit_filter_mode(&mut self) {
        self.focus = Focus::Playlist;
    }

    /// Leave the prompt and drop the filter.
    pub fn clear_filter(&mut self) {
        self.filter_query.clear();
        self.focus = Focus::Playlist;
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter_query.push(c);
        self.cursor = 0;
    }

    pub fn pop_filter_char(&mut self) {
        self.filter_query.pop();
        self.cursor = 0;
    }

    /// Fuzzy/subsequence match: return the character positions in `title`
    /// that match `query`, or `None` if not matched.
    pub fn fuzzy_match_positions(title: &str, query: &str) -> Option<Vec<usize>> {
        if query.is_empty() {
            return Some(Vec::new());
        }

        let mut positions: Vec<usize> = Vec::new();
        let mut title_iter = title.chars().enumerate();

        for qc in query.chars() {
            let qc_low = qc.to_ascii_lowercase();
            loop {
                match title_iter.next() {
                    Some((ti, tc)) if tc.to_ascii_lowercase() == qc_low => {
                        positions.push(ti);
                        break;
                    }
                    Some(_) => continue,
                    None => return None,
                }
            }
        }

        Some(positions)
    }
}
