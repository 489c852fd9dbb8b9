//! Runtime around the deterministic progression engine.
//!
//! This crate owns everything `game-core` deliberately leaves out: the
//! [`Session`] holding the current snapshot, keyed save storage, the
//! background persistence worker, and decoding of structured event text.
//!
//! Modules are organized by responsibility:
//! - [`session`] drives transitions and triggers autosaves
//! - [`repository`] stores snapshots keyed by save code
//! - [`sink`] abstracts where autosaves go
//! - [`event`] turns event text into a [`StructuredEvent`](game_core::StructuredEvent)
//! - `workers` keeps the persistence task internal to the crate
pub mod error;
pub mod event;
pub mod repository;
pub mod session;
pub mod sink;

mod workers;

pub use error::{Result, RuntimeError};
pub use event::parse_event;
pub use repository::{FileStateRepository, InMemoryStateRepo, RepositoryError, StateRepository};
pub use session::{Session, SessionUpdate};
pub use sink::{InlineSink, SnapshotSink};
pub use workers::PersistenceHandle;
