//! Playback controller: a dedicated thread owning the `rodio` output stream
//! and the current sink, driven by `AudioCmd` messages.

mod player;
mod session;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::{
    AudioCmd, AudioEvent, PlaybackHandle, PlaybackInfo, clamp_position, clamp_volume,
};
