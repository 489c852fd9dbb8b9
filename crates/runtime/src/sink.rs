//! Destinations for snapshots the session wants persisted.

use std::sync::Arc;

use async_trait::async_trait;
use game_core::{GameState, SaveCode};

use crate::error::Result;
use crate::repository::StateRepository;

/// Where a [`Session`](crate::Session) sends snapshots to be saved.
#[async_trait]
pub trait SnapshotSink: Send + Sync {
    /// Queues an autosave. Must not block; failures are logged, not returned.
    fn submit(&self, code: &SaveCode, state: &GameState);

    /// Saves after every earlier submission and reports the outcome.
    async fn save_now(&self, code: &SaveCode, state: &GameState) -> Result<()>;

    /// Returns once every earlier submission has been handled.
    async fn flush(&self) -> Result<()>;
}

/// Saves directly on the caller's task.
///
/// Useful in tests and embeddings that have no background worker.
pub struct InlineSink {
    repo: Arc<dyn StateRepository>,
}

impl InlineSink {
    pub fn new(repo: Arc<dyn StateRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl SnapshotSink for InlineSink {
    fn submit(&self, code: &SaveCode, state: &GameState) {
        if let Err(e) = self.repo.save(code, state) {
            tracing::warn!("Autosave for '{}' failed: {}", code, e);
        }
    }

    async fn save_now(&self, code: &SaveCode, state: &GameState) -> Result<()> {
        self.repo.save(code, state)?;
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}
