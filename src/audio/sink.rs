//! Utilities for creating `rodio` sinks from file paths.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::mixer::Mixer;
use rodio::{Decoder, Sink, Source};

use crate::error::{PlayerError, Result};

/// A paused sink plus what the decoder reported about the track.
pub(super) struct PreparedSink {
    pub sink: Sink,
    pub duration: Option<Duration>,
}

/// Create a paused `Sink` on `mixer` for `path` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    mixer: &Mixer,
    path: &Path,
    start_at: Duration,
    volume: f32,
) -> Result<PreparedSink> {
    let file = File::open(path).map_err(|source| PlayerError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| PlayerError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let duration = decoder.total_duration();

    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = decoder.skip_duration(start_at);

    let sink = Sink::connect_new(mixer);
    sink.pause();
    sink.set_volume(volume);
    sink.append(source);
    Ok(PreparedSink { sink, duration })
}
