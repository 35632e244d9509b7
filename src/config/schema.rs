use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/needle/config.toml` or `~/.config/needle/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `NEEDLE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume applied to the first loaded track, in `[0, 1]`.
    pub initial_volume: f32,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to seek when pressing the left/right arrows.
    pub scrub_seconds: u64,
    /// Volume change applied by the up/down arrows.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 0.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Which player variant to run.
    pub mode: PlayerMode,
    /// Shuffle a folder's tracks right after it is opened (playlist mode only).
    pub shuffle_on_load: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            mode: PlayerMode::Playlist,
            shuffle_on_load: true,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerMode {
    /// Open a folder and play its tracks in (shuffled) order.
    #[serde(alias = "folder")]
    Playlist,
    /// Open and play one file at a time.
    #[serde(alias = "file", alias = "single-track")]
    Single,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "wav".into()],
            follow_links: true,
            include_hidden: false,
            recursive: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// How often the progress slider is refreshed from the audio thread (milliseconds).
    pub poll_interval_ms: u64,
    /// Draw short text labels on the buttons when they are wide enough.
    pub show_labels: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            show_labels: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, overridden by `NEEDLE_LOG`.
    pub level: String,
    /// Log directory. Defaults to `$XDG_STATE_HOME/needle`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}
