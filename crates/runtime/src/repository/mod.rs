//! Repository layer for saved games.
//!
//! Repositories store whole [`GameState`](game_core::GameState) snapshots
//! keyed by [`SaveCode`](game_core::SaveCode), serialized as JSON.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileStateRepository;
pub use memory::InMemoryStateRepo;
pub use traits::StateRepository;

pub(crate) use traits::{decode, encode};
