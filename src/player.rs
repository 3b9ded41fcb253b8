//! Player module: the state layer between the surface and the media element.
//!
//! `PlayerController` owns the current index and the seek flag, drives a
//! `MediaElement`, and reports what the surface should show as `ViewUpdate`s.

mod controller;
mod subscriptions;
mod view;

pub use controller::PlayerController;
pub use subscriptions::OnceSubscriptions;
pub use view::ViewUpdate;

#[cfg(test)]
pub(crate) mod testing;
