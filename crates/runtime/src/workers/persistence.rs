//! Persistence worker that writes snapshots off the caller's path.
//!
//! Commands are handled strictly in submission order, so a snapshot queued
//! later always lands after one queued earlier and an explicit save or flush
//! observes every autosave submitted before it.
//!
//! A failed write is logged and dropped. The worker never retries and never
//! reports back to the session for autosaves; the in-memory snapshot stays
//! authoritative.

use std::sync::Arc;

use async_trait::async_trait;
use game_core::{GameState, SaveCode};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{Result, RuntimeError};
use crate::repository::{RepositoryError, StateRepository};
use crate::sink::SnapshotSink;

/// Commands that can be sent to the persistence worker
pub enum Command {
    /// Write a snapshot, logging any failure
    Save {
        code: SaveCode,
        state: Box<GameState>,
    },

    /// Write a snapshot and report the outcome
    SaveNow {
        code: SaveCode,
        state: Box<GameState>,
        reply: oneshot::Sender<std::result::Result<(), RepositoryError>>,
    },

    /// Reply once every earlier command has been handled
    Flush { reply: oneshot::Sender<()> },

    /// Shutdown the worker gracefully
    Shutdown,
}

/// Background worker that performs repository writes.
pub struct PersistenceWorker {
    repo: Arc<dyn StateRepository>,
    command_rx: mpsc::UnboundedReceiver<Command>,
    failed_saves: u64,
}

impl PersistenceWorker {
    pub fn new(
        repo: Arc<dyn StateRepository>,
        command_rx: mpsc::UnboundedReceiver<Command>,
    ) -> Self {
        Self {
            repo,
            command_rx,
            failed_saves: 0,
        }
    }

    /// Main worker loop
    pub async fn run(mut self) {
        info!("PersistenceWorker started");

        while let Some(command) = self.command_rx.recv().await {
            match command {
                Command::Save { code, state } => {
                    if let Err(e) = self.write(&code, &state) {
                        warn!("Autosave for '{}' failed: {}", code, e);
                    }
                }
                Command::SaveNow { code, state, reply } => {
                    let result = self.write(&code, &state);
                    if reply.send(result).is_err() {
                        debug!("Save requester for '{}' went away", code);
                    }
                }
                Command::Flush { reply } => {
                    let _ = reply.send(());
                }
                Command::Shutdown => {
                    info!("Shutdown command received");
                    break;
                }
            }
        }

        info!(
            failed_saves = self.failed_saves,
            "PersistenceWorker stopped"
        );
    }

    fn write(&mut self, code: &SaveCode, state: &GameState) -> std::result::Result<(), RepositoryError> {
        let result = self.repo.save(code, state);
        match &result {
            Ok(()) => debug!("Persisted snapshot for '{}'", code),
            Err(_) => self.failed_saves += 1,
        }
        result
    }
}

/// Cloneable sender side of a running [`PersistenceWorker`].
#[derive(Clone)]
pub struct PersistenceHandle {
    command_tx: mpsc::UnboundedSender<Command>,
}

impl PersistenceHandle {
    /// Spawns a worker on the current tokio runtime.
    pub fn spawn(repo: Arc<dyn StateRepository>) -> (Self, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let worker = PersistenceWorker::new(repo, command_rx);
        let join = tokio::spawn(worker.run());
        (Self { command_tx }, join)
    }

    fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| RuntimeError::PersistenceClosed)
    }

    /// Asks the worker to stop after handling everything queued before.
    pub fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown)
    }
}

#[async_trait]
impl SnapshotSink for PersistenceHandle {
    fn submit(&self, code: &SaveCode, state: &GameState) {
        let command = Command::Save {
            code: code.clone(),
            state: Box::new(state.clone()),
        };
        if self.send(command).is_err() {
            warn!("Persistence worker is gone; autosave for '{}' dropped", code);
        }
    }

    async fn save_now(&self, code: &SaveCode, state: &GameState) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.send(Command::SaveNow {
            code: code.clone(),
            state: Box::new(state.clone()),
            reply,
        })?;
        response
            .await
            .map_err(|_| RuntimeError::PersistenceClosed)?
            .map_err(RuntimeError::from)
    }

    async fn flush(&self) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Flush { reply })?;
        response.await.map_err(|_| RuntimeError::PersistenceClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryStateRepo;

    fn code(raw: &str) -> SaveCode {
        SaveCode::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn writes_in_submission_order() {
        let repo = Arc::new(InMemoryStateRepo::new());
        let (handle, join) = PersistenceHandle::spawn(repo.clone());

        let mut state = GameState::new_game(Some(code("slot")));
        for n in 0..5 {
            state.log.push(format!("entry {n}"));
            handle.submit(&code("slot"), &state);
        }
        handle.flush().await.unwrap();

        let stored = repo.load(&code("slot")).unwrap().unwrap();
        assert_eq!(stored.log.len(), 5);
        assert_eq!(stored.log.last().map(String::as_str), Some("entry 4"));

        handle.shutdown().unwrap();
        join.await.unwrap();
    }

    #[tokio::test]
    async fn closed_worker_is_reported() {
        let repo = Arc::new(InMemoryStateRepo::new());
        let (handle, join) = PersistenceHandle::spawn(repo);

        handle.shutdown().unwrap();
        join.await.unwrap();

        let state = GameState::new_game(None);
        assert!(matches!(
            handle.save_now(&code("late"), &state).await,
            Err(RuntimeError::PersistenceClosed)
        ));
        assert!(matches!(
            handle.flush().await,
            Err(RuntimeError::PersistenceClosed)
        ));
    }
}
