use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::{AudioSettings, UiSettings};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioEvent, PlaybackHandle, PlaybackInfo};

/// UI-side handle to the playback controller running on the audio thread.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Spawn the audio thread. Returns the player and the receiving end of its
    /// event channel, which the event bridge drains on the UI thread.
    pub fn new(audio: &AudioSettings, ui: &UiSettings) -> (Self, Receiver<AudioEvent>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<AudioEvent>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(
            rx,
            event_tx,
            playback_info.clone(),
            audio.initial_volume,
            Duration::from_millis(ui.poll_interval_ms.max(1)),
        );

        let player = Self {
            tx,
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
        };
        (player, event_rx)
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    /// Send every command in order, stopping at the first failure.
    pub fn send_all(&self, cmds: Vec<AudioCmd>) -> Result<(), mpsc::SendError<AudioCmd>> {
        for cmd in cmds {
            self.send(cmd)?;
        }
        Ok(())
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
