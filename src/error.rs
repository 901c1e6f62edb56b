//! Error types shared by the loaders, the menu and the app lifecycle.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that reach the caller. Profile and settings read failures are not
/// here: those fall back to defaults.
#[derive(Error, Debug)]
pub enum GameError {
    /// Map file missing or unreadable; no level state is built
    #[error("failed to read map {}: {source}", path.display())]
    MapRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write profile {}: {source}", path.display())]
    ProfileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode profile: {0}")]
    ProfileEncode(#[from] serde_json::Error),

    #[error("level {level} does not exist (valid levels are 1-20)")]
    LevelOutOfRange { level: u32 },

    #[error("level {level} is locked (highest unlocked is {highest})")]
    LevelLocked { level: u32, highest: u32 },

    #[error("a level is already being played")]
    SessionActive,
}

pub type Result<T> = std::result::Result<T, GameError>;
