/// A media playback primitive: one source at a time, driven by requests and
/// observed through its properties and notifications.
///
/// Requests are fire-and-forget. The effect on the actual output is observed
/// later through the element's notifications (`Play`, `Pause`, ...), while the
/// properties reflect the request immediately.
pub trait MediaElement {
    /// Replace the current source. Leaves the element paused at position 0 with
    /// an unknown duration; a `LoadedMetadata` notification follows once the
    /// source has been probed.
    fn set_src(&mut self, src: &str);
    fn src(&self) -> &str;

    fn paused(&self) -> bool;
    fn ended(&self) -> bool;
    /// Seconds, `None` while unknown.
    fn duration(&self) -> Option<f64>;
    /// Seconds.
    fn current_time(&self) -> f64;
    /// Jump to `secs`.
    fn set_current_time(&mut self, secs: f64);
    fn volume(&self) -> f64;
    /// `volume` is clamped to `0.0..=1.0`.
    fn set_volume(&mut self, volume: f64);

    fn play(&mut self);
    fn pause(&mut self);
}
