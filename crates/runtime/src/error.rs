//! Unified error type surfaced by the runtime API.
//!
//! None of these errors alter the session's in-memory snapshot.

use game_core::{InvalidSaveCode, SaveCode};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no save code is set")]
    MissingSaveCode,

    #[error("no save found for '{code}'")]
    SaveNotFound { code: SaveCode },

    #[error("save '{code}' could not be read: {reason}")]
    CorruptedSave { code: SaveCode, reason: String },

    #[error("invalid event: {0}")]
    InvalidEvent(String),

    #[error("invalid save code: {0}")]
    InvalidSaveCode(#[from] InvalidSaveCode),

    #[error("persistence worker is no longer running")]
    PersistenceClosed,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
