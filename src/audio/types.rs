//! Audio-related small types and handles.
//!
//! This module defines the commands accepted by the audio thread, the events
//! it reports back and the playback snapshot shared with the UI.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Replace the current track with `path`, paused at the start.
    Load {
        path: PathBuf,
        /// Duration probed from tags, used when the decoder cannot tell.
        duration_hint: Option<Duration>,
    },
    /// Start or resume playback.
    Play,
    /// Pause playback, keeping the position.
    Pause,
    /// Jump to an absolute position (clamped to the track duration).
    Seek(Duration),
    /// Set the output volume (clamped to `[0, 1]`).
    SetVolume(f32),
    /// Stop playback and rewind; the track stays loaded.
    Stop,
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Notifications pushed from the audio thread to the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    /// The current track played to the end.
    Ended,
    /// Something the user asked for could not be done.
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
/// Playback snapshot shared with the UI, refreshed by the audio thread.
pub struct PlaybackInfo {
    /// Whether a track is loaded.
    pub loaded: bool,
    /// Position within the loaded track.
    pub position: Duration,
    /// Total duration of the loaded track, when known.
    pub duration: Option<Duration>,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            loaded: false,
            position: Duration::ZERO,
            duration: None,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// Clamp a volume level to `[0, 1]`; NaN counts as silence.
pub fn clamp_volume(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}

/// Clamp a seek target to the track bounds.
pub fn clamp_position(target: Duration, duration: Option<Duration>) -> Duration {
    match duration {
        Some(total) => target.min(total),
        None => target,
    }
}
