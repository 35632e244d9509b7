//! Event bridge: carries audio-thread notifications back to the UI thread as
//! `UiCommand`s.

use std::sync::mpsc::{Receiver, TryRecvError};

use tracing::{debug, warn};

use crate::app::UiCommand;
use crate::audio::AudioEvent;

pub struct EventBridge {
    rx: Receiver<AudioEvent>,
    disconnected: bool,
}

impl EventBridge {
    pub fn new(rx: Receiver<AudioEvent>) -> Self {
        Self {
            rx,
            disconnected: false,
        }
    }

    /// Map one audio event to the command the UI should apply.
    pub fn translate(event: AudioEvent) -> UiCommand {
        match event {
            AudioEvent::Ended => UiCommand::PlayNext,
            AudioEvent::Error(message) => UiCommand::Failure(message),
        }
    }

    /// Take every pending event without blocking, oldest first.
    pub fn drain(&mut self) -> Vec<UiCommand> {
        let mut cmds = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    debug!(?event, "audio event");
                    cmds.push(Self::translate(event));
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        warn!("audio thread hung up");
                        self.disconnected = true;
                    }
                    break;
                }
            }
        }
        cmds
    }
}
