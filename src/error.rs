//! Error type shared by the playlist scanner and the audio thread.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },

    #[error("no audio output device: {0}")]
    NoOutputDevice(String),

    #[error("{} is not a folder", .0.display())]
    NotADirectory(PathBuf),

    #[error("{} is not a file", .0.display())]
    NotAFile(PathBuf),

    #[error("{} does not exist", .0.display())]
    Missing(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("no track is loaded")]
    NothingLoaded,
}

pub type Result<T> = std::result::Result<T, PlayerError>;
