use crate::audio::MediaElement;

/// In-memory media element: requests change state synchronously and are recorded.
#[derive(Default)]
pub(crate) struct FakeMedia {
    pub(crate) src: String,
    pub(crate) paused: bool,
    pub(crate) ended: bool,
    pub(crate) duration: Option<f64>,
    pub(crate) position: f64,
    pub(crate) volume: f64,
    pub(crate) loads: Vec<String>,
    pub(crate) play_requests: usize,
    pub(crate) pause_requests: usize,
}

impl FakeMedia {
    pub(crate) fn new() -> Self {
        Self {
            paused: true,
            volume: 1.0,
            ..Self::default()
        }
    }
}

impl MediaElement for FakeMedia {
    fn set_src(&mut self, src: &str) {
        self.src = src.to_string();
        self.loads.push(src.to_string());
        self.paused = true;
        self.ended = false;
        self.duration = None;
        self.position = 0.0;
    }
    fn src(&self) -> &str {
        &self.src
    }
    fn paused(&self) -> bool {
        self.paused
    }
    fn ended(&self) -> bool {
        self.ended
    }
    fn duration(&self) -> Option<f64> {
        self.duration
    }
    fn current_time(&self) -> f64 {
        self.position
    }
    fn set_current_time(&mut self, secs: f64) {
        self.position = secs;
    }
    fn volume(&self) -> f64 {
        self.volume
    }
    fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }
    fn play(&mut self) {
        self.play_requests += 1;
        self.paused = false;
        self.ended = false;
    }
    fn pause(&mut self) {
        self.pause_requests += 1;
        self.paused = true;
    }
}
