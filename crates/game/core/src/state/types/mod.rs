//! Character state types.
//!
//! This module organizes the building blocks of a [`GameState`](super::GameState):
//! - `profile`: Name, level and experience
//! - `item`: Item definitions carried by the character
//! - `inventory`: Collision-safe item collection
//! - `equipment`: Slot-based equipped items
//! - `save_code`: Persistence identity key

mod equipment;
mod inventory;
mod item;
mod profile;
mod save_code;

pub use equipment::{EquipSlot, Equipment};
pub use inventory::InventoryState;
pub use item::{Item, ItemKind};
pub use profile::CharacterProfile;
pub use save_code::{InvalidSaveCode, SaveCode};

#[cfg(feature = "serde")]
pub(crate) use save_code::optional_code;
