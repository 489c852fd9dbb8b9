//! Action domain: every way the game state can change.
//!
//! # Module Structure
//!
//! - `error`: Skip reasons reported for no-op transitions
//! - `equip`: Equip/unequip and the shared slot-swap routine
//! - `inventory`: Consumable use and dropping items
//! - `experience`: Direct experience grants
//! - `narrate`: Player-authored log lines
//! - `event`: Structured events applied as one transition
//!
//! Each action is a small struct implementing [`ActionTransition`]; the
//! [`Action`] enum is what callers hand to the engine.

pub mod equip;
pub mod error;
pub mod event;
pub mod experience;
pub mod inventory;
pub mod narrate;

pub use equip::{EquipAction, EquipReport, UnequipAction};
pub use error::SkipReason;
pub use event::{ApplyEventAction, EquipDirective, EventReport, StructuredEvent};
pub use experience::GainExperienceAction;
pub use inventory::{DropItemAction, UseItemAction};
pub use narrate::NarrateAction;

use crate::state::{EquipSlot, GameState};

/// Defines how a concrete action variant transforms game state.
///
/// The engine runs the three phases on a private draft copy of the snapshot,
/// so `apply` may mutate freely: if any phase fails the draft is discarded.
pub trait ActionTransition {
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState) -> Result<(), SkipReason> {
        Ok(())
    }

    /// Applies the action to the draft state.
    fn apply(&self, state: &mut GameState) -> Result<Self::Result, SkipReason>;

    /// Validates post-conditions using the state **after** mutation.
    ///
    /// `before` is the snapshot the draft was cloned from. The default
    /// rejects only invariant violations the transition introduced.
    fn post_validate(&self, before: &GameState, state: &GameState) -> Result<(), SkipReason> {
        state.check_invariants_since(before).map_err(SkipReason::from)
    }
}

/// Every state transition a caller can request.
#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Equip(EquipAction),
    Unequip(UnequipAction),
    UseItem(UseItemAction),
    DropItem(DropItemAction),
    GainExperience(GainExperienceAction),
    Narrate(NarrateAction),
    ApplyEvent(ApplyEventAction),
}

impl Action {
    pub fn equip(item_id: impl Into<String>) -> Self {
        Self::Equip(EquipAction::new(item_id))
    }

    pub fn unequip(slot: EquipSlot) -> Self {
        Self::Unequip(UnequipAction::new(slot))
    }

    pub fn use_item(item_id: impl Into<String>) -> Self {
        Self::UseItem(UseItemAction::new(item_id))
    }

    pub fn drop_item(item_id: impl Into<String>) -> Self {
        Self::DropItem(DropItemAction::new(item_id))
    }

    pub fn gain_experience(amount: i64) -> Self {
        Self::GainExperience(GainExperienceAction::new(amount))
    }

    pub fn narrate(text: impl Into<String>) -> Self {
        Self::Narrate(NarrateAction::new(text))
    }

    pub fn apply_event(event: StructuredEvent) -> Self {
        Self::ApplyEvent(ApplyEventAction::new(event))
    }

    /// Stable snake_case name of the action kind, for logs.
    pub fn name(&self) -> &str {
        self.as_ref()
    }
}

/// Action-specific outcome of an applied transition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Equipped(EquipReport),
    Unequipped { item_id: String, slot: EquipSlot },
    Used { item_id: String },
    Dropped { item_id: String },
    ExperienceGained { amount: i64, levels_gained: u32 },
    Narrated,
    EventApplied(EventReport),
}
