use std::path::Path;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::mixer::Mixer;
use rodio::{OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use super::sink::{OpenSource, create_sink};
use super::types::{AudioCmd, MediaError, MediaEvent, MediaHandle, MediaState};

/// Everything the audio thread owns for the current source.
struct Playback {
    mixer: Mixer,
    open: OpenSource,
    sink: Option<Sink>,
    src: Option<String>,
    generation: u64,
    volume: f64,
    state: MediaHandle,
    events: Sender<(u64, MediaEvent)>,
}

impl Playback {
    fn new(
        mixer: Mixer,
        open: OpenSource,
        state: MediaHandle,
        events: Sender<(u64, MediaEvent)>,
    ) -> Self {
        let volume = state.lock().map(|st| st.volume).unwrap_or(1.0);
        Self {
            mixer,
            open,
            sink: None,
            src: None,
            generation: 0,
            volume,
            state,
            events,
        }
    }

    fn emit(&self, event: MediaEvent) -> bool {
        self.events.send((self.generation, event)).is_ok()
    }

    /// Write shared state, unless the element has already moved on to a newer load.
    fn update(&self, f: impl FnOnce(&mut MediaState)) {
        if let Ok(mut st) = self.state.lock() {
            if st.generation == self.generation {
                f(&mut st);
            }
        }
    }

    fn load(&mut self, generation: u64, src: String) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.generation = generation;
        self.src = Some(src.clone());

        match (self.open)(&self.mixer, Path::new(&src), self.volume) {
            Ok(loaded) => {
                let duration = loaded.duration.map(|d| d.as_secs_f64());
                self.sink = Some(loaded.sink);
                self.update(|st| st.duration = duration);
                debug!(%src, ?duration, "source loaded");
                self.emit(MediaEvent::LoadedMetadata);
            }
            Err(e) => {
                // The element keeps the failure as its own state; nothing retries.
                warn!(%src, error = %e, "failed to load source");
                self.update(|st| st.error = Some(e.to_string()));
            }
        }
    }

    fn play(&mut self) {
        let needs_restart = self.sink.as_ref().is_some_and(|s| s.empty());
        if needs_restart {
            // Played to the end: start the same source over.
            if let Some(src) = self.src.clone() {
                if let Ok(loaded) = (self.open)(&self.mixer, Path::new(&src), self.volume) {
                    self.sink = Some(loaded.sink);
                    self.update(|st| st.position = 0.0);
                }
            }
        }
        if let Some(s) = self.sink.as_ref() {
            s.play();
        }
        self.update(|st| {
            st.paused = false;
            st.ended = false;
        });
        self.emit(MediaEvent::Play);
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
        self.update(|st| st.paused = true);
        self.emit(MediaEvent::Pause);
    }

    fn seek(&mut self, secs: f64) {
        let Some(s) = self.sink.as_ref() else {
            return;
        };
        let target = Duration::from_secs_f64(secs.max(0.0));
        if let Err(e) = s.try_seek(target) {
            warn!(secs, error = %e, "seek failed");
            return;
        }
        self.update(|st| st.position = target.as_secs_f64());
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(volume as f32);
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(ref s) = self.sink {
            if !s.is_paused() {
                fade_out_sink(s, self.volume, fade_out_ms);
            }
            s.stop();
        }
        self.update(|st| st.paused = true);
    }

    /// Run one command. Returns `false` once the thread should stop.
    fn handle(&mut self, cmd: AudioCmd) -> bool {
        match cmd {
            AudioCmd::Load { generation, src } => self.load(generation, src),
            AudioCmd::Play => self.play(),
            AudioCmd::Pause => self.pause(),
            AudioCmd::Seek(secs) => self.seek(secs),
            AudioCmd::SetVolume(v) => self.set_volume(v),
            AudioCmd::Quit { fade_out_ms } => {
                self.quit(fade_out_ms);
                return false;
            }
        }
        true
    }

    /// Periodic position report and end-of-source detection.
    fn tick(&mut self) -> bool {
        let Some(s) = self.sink.as_ref() else {
            return true;
        };
        if s.is_paused() {
            return true;
        }

        if s.empty() {
            // Keep the sink around so a later `play` can restart it.
            s.pause();
            self.update(|st| {
                st.ended = true;
                st.paused = true;
                if let Some(d) = st.duration {
                    st.position = d;
                }
            });
            return self.emit(MediaEvent::TimeUpdate)
                && self.emit(MediaEvent::Pause)
                && self.emit(MediaEvent::Ended);
        }

        let pos = s.get_pos().as_secs_f64();
        self.update(|st| st.position = pos);
        self.emit(MediaEvent::TimeUpdate)
    }
}

fn fade_out_sink(sink: &Sink, from: f64, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f64 / steps as f64;
        sink.set_volume((from * (1.0 - t)) as f32);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

/// Serve commands and tick every `time_update`, however busy the command
/// channel is.
fn run_loop(playback: &mut Playback, rx: &Receiver<AudioCmd>, time_update: Duration) {
    let mut next_tick = Instant::now() + time_update;
    loop {
        match rx.recv_timeout(next_tick.saturating_duration_since(Instant::now())) {
            Ok(cmd) => {
                if !playback.handle(cmd) {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if Instant::now() >= next_tick {
            if !playback.tick() {
                // Nobody listens for notifications anymore.
                break;
            }
            next_tick = Instant::now() + time_update;
        }
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<(u64, MediaEvent)>,
    state: MediaHandle,
    time_update: Duration,
    ready: SyncSender<Result<(), MediaError>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                let _ = ready.send(Err(MediaError::NoOutput(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mut playback = Playback::new(stream.mixer().clone(), create_sink, state, events);
        run_loop(&mut playback, &rx, time_update);
    })
}
