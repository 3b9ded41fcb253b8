use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;

use super::element::MediaElement;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, MediaError, MediaEvent, MediaHandle, MediaState};

/// `rodio`-backed media element.
pub struct AudioElement {
    tx: Sender<AudioCmd>,
    events: Receiver<(u64, MediaEvent)>,
    state: MediaHandle,
    src: String,
    generation: u64,
    join: Option<JoinHandle<()>>,
}

impl AudioElement {
    /// Open the default output device and start the audio thread.
    pub fn new(settings: &AudioSettings) -> Result<Self, MediaError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, events) = mpsc::channel::<(u64, MediaEvent)>();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        let state: MediaHandle = Arc::new(Mutex::new(MediaState {
            volume: settings.volume.clamp(0.0, 1.0),
            ..MediaState::default()
        }));

        let join = spawn_audio_thread(
            rx,
            event_tx,
            state.clone(),
            Duration::from_millis(settings.time_update_ms.max(1)),
            ready_tx,
        );

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(MediaError::NoOutput("audio thread exited".to_string())),
        }

        Ok(Self {
            tx,
            events,
            state,
            src: String::new(),
            generation: 0,
            join: Some(join),
        })
    }

    /// Next pending notification, if any.
    ///
    /// Position, metadata and end notifications left over from a replaced
    /// source are dropped; play/pause always pass through.
    pub fn try_next_event(&mut self) -> Option<MediaEvent> {
        while let Ok((generation, event)) = self.events.try_recv() {
            let current = generation == self.generation;
            if current || matches!(event, MediaEvent::Play | MediaEvent::Pause) {
                return Some(event);
            }
        }
        None
    }

    /// Load failure for the current source, if any.
    pub fn error(&self) -> Option<String> {
        self.read(|st| st.error.clone()).flatten()
    }

    /// Fade out, stop the audio thread and wait for it.
    pub fn quit_softly(&mut self, fade_out: Duration) {
        let _ = self.tx.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }

    fn read<R>(&self, f: impl FnOnce(&MediaState) -> R) -> Option<R> {
        self.state.lock().ok().map(|st| f(&st))
    }

    fn write(&self, f: impl FnOnce(&mut MediaState)) {
        if let Ok(mut st) = self.state.lock() {
            f(&mut st);
        }
    }

    #[cfg(test)]
    pub(super) fn detached() -> (Self, Sender<(u64, MediaEvent)>, Receiver<AudioCmd>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, events) = mpsc::channel::<(u64, MediaEvent)>();
        let element = Self {
            tx,
            events,
            state: Arc::new(Mutex::new(MediaState::default())),
            src: String::new(),
            generation: 0,
            join: None,
        };
        (element, event_tx, rx)
    }

    #[cfg(test)]
    pub(super) fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg(test)]
    pub(super) fn shared_state(&self) -> MediaState {
        self.read(MediaState::clone).unwrap_or_default()
    }
}

impl MediaElement for AudioElement {
    fn set_src(&mut self, src: &str) {
        self.generation += 1;
        self.src = src.to_string();
        let generation = self.generation;
        self.write(|st| {
            st.generation = generation;
            st.paused = true;
            st.ended = false;
            st.duration = None;
            st.position = 0.0;
            st.error = None;
        });
        let _ = self.tx.send(AudioCmd::Load {
            generation: self.generation,
            src: self.src.clone(),
        });
    }

    fn src(&self) -> &str {
        &self.src
    }

    fn paused(&self) -> bool {
        self.read(|st| st.paused).unwrap_or(true)
    }

    fn ended(&self) -> bool {
        self.read(|st| st.ended).unwrap_or(false)
    }

    fn duration(&self) -> Option<f64> {
        self.read(|st| st.duration).flatten()
    }

    fn current_time(&self) -> f64 {
        self.read(|st| st.position).unwrap_or(0.0)
    }

    fn set_current_time(&mut self, secs: f64) {
        let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        self.write(|st| {
            st.position = secs;
            st.ended = false;
        });
        let _ = self.tx.send(AudioCmd::Seek(secs));
    }

    fn volume(&self) -> f64 {
        self.read(|st| st.volume).unwrap_or(1.0)
    }

    fn set_volume(&mut self, volume: f64) {
        let volume = volume.clamp(0.0, 1.0);
        self.write(|st| st.volume = volume);
        let _ = self.tx.send(AudioCmd::SetVolume(volume));
    }

    fn play(&mut self) {
        self.write(|st| {
            st.paused = false;
            st.ended = false;
        });
        let _ = self.tx.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.write(|st| st.paused = true);
        let _ = self.tx.send(AudioCmd::Pause);
    }
}

impl Drop for AudioElement {
    fn drop(&mut self) {
        if self.join.is_some() {
            self.quit_softly(Duration::ZERO);
        }
    }
}
