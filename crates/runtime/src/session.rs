//! The session owns the current snapshot and drives every transition.
//!
//! Transitions run synchronously through [`GameEngine`]; the resulting
//! snapshot replaces the current one wholesale. Persistence happens at the
//! edges: after a transition that changed anything worth saving, the
//! snapshot is handed to the [`SnapshotSink`] without waiting for the write.

use std::sync::Arc;

use game_core::{
    Action, GameConfig, GameEngine, GameState, Outcome, SaveCode, StateDelta, StructuredEvent,
};
use tracing::{debug, info};

use crate::error::{Result, RuntimeError};
use crate::event::parse_event;
use crate::repository::{RepositoryError, StateRepository};
use crate::sink::SnapshotSink;

/// What a dispatched transition did to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUpdate {
    pub delta: StateDelta,
    pub outcome: Outcome,
    /// True when the new snapshot was handed off for autosave.
    pub autosaved: bool,
}

pub struct Session {
    state: GameState,
    config: GameConfig,
    repo: Arc<dyn StateRepository>,
    sink: Arc<dyn SnapshotSink>,
    autosave: bool,
}

impl Session {
    /// Starts a session on a fresh seeded character with no save code.
    pub fn new(repo: Arc<dyn StateRepository>, sink: Arc<dyn SnapshotSink>) -> Self {
        let config = GameConfig::default();
        Self {
            state: GameState::from_config(&config, None),
            config,
            repo,
            sink,
            autosave: true,
        }
    }

    /// Replaces the game configuration and reseeds the character from it.
    #[must_use]
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.state = GameState::from_config(&config, self.state.save_code.clone());
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn save_code(&self) -> Option<&SaveCode> {
        self.state.save_code.as_ref()
    }

    pub fn autosave_enabled(&self) -> bool {
        self.autosave
    }

    /// Sets the identity key future saves and loads use.
    ///
    /// Only the key changes; nothing is loaded or saved.
    pub fn set_save_code(&mut self, raw: &str) -> Result<SaveCode> {
        let code = SaveCode::parse(raw)?;
        self.state = self.state.with_save_code(Some(code.clone()));
        info!("Save code set to '{}'", code);
        Ok(code)
    }

    /// Replaces the character with a freshly seeded one, keeping the save code.
    pub fn new_game(&mut self) -> StateDelta {
        let fresh = GameState::from_config(&self.config, self.state.save_code.clone());
        let delta = StateDelta::from_states(&self.state, &fresh);
        self.state = fresh;
        self.autosave_if_needed(&delta);
        info!("Started a new game");
        delta
    }

    /// Runs `action` against the current snapshot.
    pub fn dispatch(&mut self, action: Action) -> SessionUpdate {
        let engine = GameEngine::new(&self.state);
        let outcome = engine.execute(&action);

        self.state = outcome.state;
        let autosaved = self.autosave_if_needed(&outcome.delta);

        SessionUpdate {
            delta: outcome.delta,
            outcome: outcome.outcome,
            autosaved,
        }
    }

    /// Applies an already decoded event.
    pub fn apply_event(&mut self, event: StructuredEvent) -> SessionUpdate {
        self.dispatch(Action::apply_event(event))
    }

    /// Decodes event text and applies it.
    ///
    /// Undecodable text is rejected before the snapshot is touched.
    pub fn apply_event_json(&mut self, raw: &str) -> Result<SessionUpdate> {
        let event = parse_event(raw)?;
        Ok(self.apply_event(event))
    }

    /// Saves the current snapshot, after any autosaves still in flight.
    pub async fn save(&self) -> Result<SaveCode> {
        let code = self.require_code()?;
        self.sink.save_now(&code, &self.state).await?;
        info!("Saved game under '{}'", code);
        Ok(code)
    }

    /// Replaces the current snapshot with the one saved under the save code.
    ///
    /// The stored snapshot is taken as is; if it carries no save code of its
    /// own it keeps the one it was loaded from. On any error the current
    /// snapshot is left untouched.
    pub async fn load(&mut self) -> Result<()> {
        let code = self.require_code()?;
        self.sink.flush().await?;

        let loaded = match self.repo.load(&code) {
            Ok(Some(state)) => state,
            Ok(None) => return Err(RuntimeError::SaveNotFound { code }),
            Err(RepositoryError::CorruptedData(reason)) => {
                return Err(RuntimeError::CorruptedSave { code, reason });
            }
            Err(e) => return Err(e.into()),
        };

        self.state = match loaded.save_code {
            Some(_) => loaded,
            None => loaded.with_save_code(Some(code.clone())),
        };
        info!("Loaded game from '{}'", code);
        Ok(())
    }

    /// Waits for pending autosaves.
    pub async fn flush(&self) -> Result<()> {
        self.sink.flush().await
    }

    fn require_code(&self) -> Result<SaveCode> {
        self.state
            .save_code
            .clone()
            .ok_or(RuntimeError::MissingSaveCode)
    }

    fn autosave_if_needed(&self, delta: &StateDelta) -> bool {
        if !self.autosave || !delta.requires_save() {
            return false;
        }
        let Some(code) = &self.state.save_code else {
            debug!("No save code set; skipping autosave");
            return false;
        };
        self.sink.submit(code, &self.state);
        true
    }
}
