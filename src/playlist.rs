//! Playlist module: the fixed, ordered list of tracks the player walks through.
//!
//! Membership and order are decided once at startup, either from configured
//! `[[playlist.tracks]]` entries or by scanning a directory.

mod model;
mod scan;

pub use model::*;
pub use scan::scan;
