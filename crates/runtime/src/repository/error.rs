//! Errors raised while reading or writing save slots.

use thiserror::Error;

/// Failure of a [`StateRepository`](super::StateRepository) operation.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("save slot lock was poisoned")]
    LockPoisoned,

    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot could not be encoded.
    #[error("could not encode snapshot: {0}")]
    Serialization(String),

    /// Stored text exists but does not decode into a snapshot.
    #[error("save data is corrupted: {0}")]
    CorruptedData(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
