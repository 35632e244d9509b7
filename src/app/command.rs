use crate::audio::PlaybackInfo;

/// Everything that can happen to the player, whatever its source
/// (keyboard, mouse, the audio thread or the poll timer).
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    TogglePlay,
    PrevTrack,
    NextTrack,
    /// The current track finished; posted by the event bridge.
    PlayNext,
    /// Relative seek in seconds (negative = backwards).
    SeekBy(i64),
    VolumeBy(f32),
    SetVolume(f32),
    PointerDown { column: u16, row: u16 },
    PointerDrag { column: u16, row: u16 },
    PointerUp,
    OpenPrompt,
    PromptInput(char),
    PromptBackspace,
    PromptCancel,
    /// A media error reported by the audio thread.
    Failure(String),
    DismissNotice,
    Resize { width: u16, height: u16 },
    /// Poll-timer refresh with the latest playback snapshot.
    Tick(PlaybackInfo),
}

impl UiCommand {
    /// Commands that come straight from the user and are swallowed while a
    /// modal notice is shown.
    pub fn is_user_input(&self) -> bool {
        !matches!(
            self,
            UiCommand::PlayNext
                | UiCommand::Failure(_)
                | UiCommand::DismissNotice
                | UiCommand::Resize { .. }
                | UiCommand::Tick(_)
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A modal message box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            NoticeKind::Info => "Info",
            NoticeKind::Error => "Error",
        }
    }
}
