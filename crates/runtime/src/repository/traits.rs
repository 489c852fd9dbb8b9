//! Repository contract for saving and loading game snapshots.

use game_core::{GameState, SaveCode};

use super::Result;

/// Keyed snapshot storage.
///
/// Each save code names exactly one slot; saving overwrites the slot.
/// Loading returns the snapshot verbatim, or `None` for an unused slot.
pub trait StateRepository: Send + Sync {
    /// Save a snapshot under `code`
    fn save(&self, code: &SaveCode, state: &GameState) -> Result<()>;

    /// Load the snapshot stored under `code`
    ///
    /// Data that exists but does not decode as a snapshot yields
    /// [`RepositoryError::CorruptedData`](super::RepositoryError::CorruptedData).
    fn load(&self, code: &SaveCode) -> Result<Option<GameState>>;

    /// Check if a slot is in use
    fn exists(&self, code: &SaveCode) -> bool;

    /// Delete a slot; deleting an unused slot is not an error
    fn delete(&self, code: &SaveCode) -> Result<()>;

    /// List all used save codes
    fn list_codes(&self) -> Result<Vec<SaveCode>> {
        Ok(vec![])
    }
}

/// Serializes a snapshot the way every repository stores it.
pub(crate) fn encode(state: &GameState) -> Result<String> {
    serde_json::to_string_pretty(state)
        .map_err(|e| super::RepositoryError::Serialization(e.to_string()))
}

/// Decodes a stored snapshot, reporting malformed data as corruption.
pub(crate) fn decode(code: &SaveCode, raw: &str) -> Result<GameState> {
    serde_json::from_str(raw)
        .map_err(|e| super::RepositoryError::CorruptedData(format!("save '{code}': {e}")))
}
