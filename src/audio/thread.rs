use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::OutputStreamBuilder;
use tracing::{debug, error, info, warn};

use crate::error::PlayerError;

use super::session::Session;
use super::types::{AudioCmd, AudioEvent, PlaybackHandle};

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<AudioEvent>,
    playback_info: PlaybackHandle,
    initial_volume: f32,
    tick: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                let err = PlayerError::NoOutputDevice(e.to_string());
                error!(error = %err, "audio output unavailable");
                let _ = events.send(AudioEvent::Error(err.to_string()));
                run_without_device(rx, events, err.to_string());
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let mut session = Session::new(initial_volume);

        loop {
            match rx.recv_timeout(tick) {
                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    session.quit(fade_out_ms);
                    session.publish(&playback_info);
                    break;
                }
                Ok(cmd) => {
                    debug!(?cmd, "audio command");
                    if let Err(e) = session.handle(cmd, stream.mixer()) {
                        warn!(error = %e, "audio command failed");
                        let _ = events.send(AudioEvent::Error(e.to_string()));
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if session.take_ended() {
                info!("track ended");
                if events.send(AudioEvent::Ended).is_err() {
                    break;
                }
            }
            session.publish(&playback_info);
        }
    })
}

/// Keep answering commands after the output device failed to open, so the UI
/// reports every playback attempt instead of hanging.
pub(super) fn run_without_device(rx: Receiver<AudioCmd>, events: Sender<AudioEvent>, reason: String) {
    while let Ok(cmd) = rx.recv() {
        match cmd {
            AudioCmd::Quit { .. } => break,
            AudioCmd::Load { .. } | AudioCmd::Play | AudioCmd::Seek(_) => {
                let _ = events.send(AudioEvent::Error(reason.clone()));
            }
            AudioCmd::Pause | AudioCmd::SetVolume(_) | AudioCmd::Stop => {}
        }
    }
}
