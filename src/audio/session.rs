use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use rodio::Sink;
use rodio::mixer::Mixer;
use tracing::{debug, info};

use crate::error::{PlayerError, Result};

use super::sink::create_sink_at;
use super::types::{AudioCmd, PlaybackHandle, clamp_position, clamp_volume};

/// The one media session the audio thread owns: the current file, its sink
/// and a wall-clock position estimate.
pub(super) struct Session {
    pub(super) path: Option<PathBuf>,
    pub(super) sink: Option<Sink>,
    pub(super) duration: Option<Duration>,
    pub(super) volume: f32,
    pub(super) playing: bool,
    // Set when the last load failed; the play/seek queued behind it are dropped
    // so the decode error stays the one the user sees.
    load_failed: bool,
    // Track start time and accumulated elapsed when paused.
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Session {
    pub(super) fn new(volume: f32) -> Self {
        Self {
            path: None,
            sink: None,
            duration: None,
            volume: clamp_volume(volume),
            playing: false,
            load_failed: false,
            started_at: None,
            accumulated: Duration::ZERO,
        }
    }

    pub(super) fn handle(&mut self, cmd: AudioCmd, mixer: &Mixer) -> Result<()> {
        match cmd {
            AudioCmd::Load {
                path,
                duration_hint,
            } => self.load(mixer, path, duration_hint),
            AudioCmd::Play => self.play(mixer),
            AudioCmd::Pause => {
                self.pause();
                Ok(())
            }
            AudioCmd::Seek(target) => self.seek(mixer, target),
            AudioCmd::SetVolume(level) => {
                self.set_volume(level);
                Ok(())
            }
            AudioCmd::Stop => {
                self.stop();
                Ok(())
            }
            AudioCmd::Quit { fade_out_ms } => {
                self.quit(fade_out_ms);
                Ok(())
            }
        }
    }

    pub(super) fn position(&self) -> Duration {
        let elapsed = self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed());
        clamp_position(elapsed, self.duration)
    }

    /// The loaded path, or `Ok(None)` when a failed load already reported why
    /// nothing is there.
    fn loaded_path(&self) -> Result<Option<PathBuf>> {
        match &self.path {
            Some(path) => Ok(Some(path.clone())),
            None if self.load_failed => Ok(None),
            None => Err(PlayerError::NothingLoaded),
        }
    }

    fn load(&mut self, mixer: &Mixer, path: PathBuf, duration_hint: Option<Duration>) -> Result<()> {
        self.unload();

        let prepared = match create_sink_at(mixer, &path, Duration::ZERO, self.volume) {
            Ok(prepared) => prepared,
            Err(e) => {
                self.load_failed = true;
                return Err(e);
            }
        };
        self.load_failed = false;
        self.duration = prepared.duration.or(duration_hint);
        info!(path = %path.display(), duration = ?self.duration, "loaded track");

        self.sink = Some(prepared.sink);
        self.path = Some(path);
        Ok(())
    }

    fn play(&mut self, mixer: &Mixer) -> Result<()> {
        let Some(path) = self.loaded_path()? else {
            debug!("play dropped after a failed load");
            return Ok(());
        };
        if self.playing {
            return Ok(());
        }

        // A drained or stopped sink restarts from the top.
        if self.sink.as_ref().is_none_or(|s| s.empty()) {
            let prepared = create_sink_at(mixer, &path, Duration::ZERO, self.volume)?;
            self.sink = Some(prepared.sink);
            self.accumulated = Duration::ZERO;
        }

        if let Some(ref s) = self.sink {
            s.play();
        }
        self.playing = true;
        self.started_at = Some(Instant::now());
        Ok(())
    }

    fn pause(&mut self) {
        if !self.playing {
            return;
        }
        if let Some(ref s) = self.sink {
            s.pause();
        }
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
        self.playing = false;
    }

    /// Rebuild the sink at `target`; the old sink keeps playing if that fails.
    fn seek(&mut self, mixer: &Mixer, target: Duration) -> Result<()> {
        let Some(path) = self.loaded_path()? else {
            debug!("seek dropped after a failed load");
            return Ok(());
        };
        let target = clamp_position(target, self.duration);

        let prepared = create_sink_at(mixer, &path, target, self.volume)?;
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        if self.playing {
            prepared.sink.play();
            self.started_at = Some(Instant::now());
        } else {
            self.started_at = None;
        }
        self.sink = Some(prepared.sink);
        self.accumulated = target;
        debug!(position = ?target, "seeked");
        Ok(())
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = clamp_volume(level);
        if let Some(ref s) = self.sink {
            s.set_volume(self.volume);
        }
    }

    /// Stop and rewind, keeping the track loaded for the next `play`.
    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.playing = false;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    fn unload(&mut self) {
        self.stop();
        self.path = None;
        self.duration = None;
    }

    /// Report a playing sink that ran dry exactly once, then rewind.
    pub(super) fn take_ended(&mut self) -> bool {
        let drained = self.sink.as_ref().is_some_and(|s| s.empty());
        if !(self.playing && drained) {
            return false;
        }
        self.playing = false;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        true
    }

    pub(super) fn quit(&mut self, fade_out_ms: u64) {
        if let Some(ref s) = self.sink {
            if self.playing {
                fade_out_sink(s, self.volume, fade_out_ms);
            }
        }
        self.unload();
    }

    pub(super) fn publish(&self, playback_info: &PlaybackHandle) {
        if let Ok(mut info) = playback_info.lock() {
            info.loaded = self.path.is_some();
            info.position = self.position();
            info.duration = self.duration;
        }
    }
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
