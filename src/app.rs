//! Application module: exposes the surface model drawn by the TUI.
//!
//! The `App` model lives in `app::model` and holds the now-playing display,
//! control positions, playlist rows and the filter prompt.

mod model;

pub use model::*;
