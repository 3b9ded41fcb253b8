//! Audio playback: the media element the player controller drives.
//!
//! `MediaElement` is the contract the controller relies on; `AudioElement`
//! implements it on top of `rodio`, running decoding and output on its own
//! thread and reporting notifications back as `MediaEvent`s.

mod element;
mod player;
mod sink;
mod thread;
mod types;

pub use element::MediaElement;
pub use player::AudioElement;
pub use types::{MediaError, MediaEvent};
