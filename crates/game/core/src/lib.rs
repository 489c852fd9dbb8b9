//! Deterministic character-progression rules shared by the runtime and client.
//!
//! `game-core` defines the canonical rules (actions, engine, character state)
//! and exposes pure APIs: every transition reads a [`GameState`] snapshot and
//! produces a new one through [`engine::GameEngine`]. Nothing in this crate
//! performs I/O; persistence and input decoding live in the runtime crate.
pub mod action;
pub mod config;
pub mod engine;
pub mod progression;
pub mod state;
pub mod stats;

pub use action::{
    Action, ActionResult, ActionTransition, ApplyEventAction, DropItemAction, EquipAction,
    EquipDirective, EquipReport, EventReport, GainExperienceAction, NarrateAction, SkipReason,
    StructuredEvent, UnequipAction, UseItemAction,
};
pub use config::GameConfig;
pub use engine::{ExecutionOutcome, GameEngine, Outcome, TransitionPhase, TransitionPhaseError};
pub use progression::{LevelProgress, gain_experience};
pub use state::{
    CharacterProfile, EquipSlot, Equipment, GameState, InvalidSaveCode, InvariantViolation,
    InventoryState, Item, ItemKind, SaveCode, StateDelta, StateFields,
};
pub use stats::{Modifiers, StatBlock, StatKey, apply_modifiers};
