//! In-memory StateRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use game_core::{GameState, SaveCode};

use super::{RepositoryError, Result, StateRepository, decode, encode};

/// In-memory implementation of StateRepository.
///
/// Slots hold the serialized JSON text rather than live snapshots, so loads
/// go through the same decoding as on-disk saves.
#[derive(Default)]
pub struct InMemoryStateRepo {
    slots: RwLock<HashMap<SaveCode, String>>,
}

impl InMemoryStateRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw text in a slot without validating it.
    pub fn insert_raw(&self, code: SaveCode, raw: impl Into<String>) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.insert(code, raw.into());
        Ok(())
    }

    /// Returns the raw text stored in a slot.
    pub fn raw(&self, code: &SaveCode) -> Result<Option<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.get(code).cloned())
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, code: &SaveCode, state: &GameState) -> Result<()> {
        let raw = encode(state)?;
        self.insert_raw(code.clone(), raw)
    }

    fn load(&self, code: &SaveCode) -> Result<Option<GameState>> {
        self.raw(code)?.map(|raw| decode(code, &raw)).transpose()
    }

    fn exists(&self, code: &SaveCode) -> bool {
        self.slots
            .read()
            .map(|slots| slots.contains_key(code))
            .unwrap_or(false)
    }

    fn delete(&self, code: &SaveCode) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.remove(code);
        Ok(())
    }

    fn list_codes(&self) -> Result<Vec<SaveCode>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut codes: Vec<SaveCode> = slots.keys().cloned().collect();
        codes.sort_unstable();
        Ok(codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> SaveCode {
        SaveCode::parse(raw).unwrap()
    }

    #[test]
    fn save_then_load_returns_same_snapshot() {
        let repo = InMemoryStateRepo::new();
        let state = GameState::new_game(Some(code("hero")));

        repo.save(&code("hero"), &state).unwrap();

        assert!(repo.exists(&code("hero")));
        assert_eq!(repo.load(&code("hero")).unwrap(), Some(state));
        assert_eq!(repo.load(&code("nobody")).unwrap(), None);
    }

    #[test]
    fn garbage_is_reported_as_corrupted() {
        let repo = InMemoryStateRepo::new();
        repo.insert_raw(code("bad"), "{ not json").unwrap();

        assert!(matches!(
            repo.load(&code("bad")),
            Err(RepositoryError::CorruptedData(_))
        ));
    }

    #[test]
    fn delete_and_list() {
        let repo = InMemoryStateRepo::new();
        let state = GameState::new_game(None);
        repo.save(&code("b"), &state).unwrap();
        repo.save(&code("a"), &state).unwrap();

        assert_eq!(repo.list_codes().unwrap(), [code("a"), code("b")]);

        repo.delete(&code("a")).unwrap();
        repo.delete(&code("missing")).unwrap();
        assert_eq!(repo.list_codes().unwrap(), [code("b")]);
    }
}
