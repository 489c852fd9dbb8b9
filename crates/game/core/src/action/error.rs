//! Reasons a transition is skipped.
//!
//! Skips are not failures: the engine reports them alongside the unchanged
//! snapshot and callers may ignore them. They mostly describe affordances a
//! caller should not have offered (equipping a bandage, unequipping an empty
//! slot).

use crate::state::{EquipSlot, InvariantViolation, ItemKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SkipReason {
    #[error("item '{item_id}' is not in the inventory")]
    ItemNotFound { item_id: String },

    #[error("item '{item_id}' of type '{kind}' cannot be equipped")]
    NotEquippable { item_id: String, kind: ItemKind },

    #[error("item '{item_id}' of type '{kind}' is not a consumable")]
    NotConsumable { item_id: String, kind: ItemKind },

    #[error("{slot} slot is empty")]
    SlotEmpty { slot: EquipSlot },

    #[error("'{slot}' is not an equipment slot")]
    UnknownSlot { slot: String },

    #[error("item '{item_id}' of type '{kind}' does not fit the {slot} slot")]
    SlotMismatch {
        item_id: String,
        kind: ItemKind,
        slot: EquipSlot,
    },

    #[error("nothing to narrate")]
    EmptyNarration,

    #[error("experience amount is zero")]
    NoExperience,

    #[error("state invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl SkipReason {
    /// Returns a static string identifier for this reason.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ItemNotFound { .. } => "item_not_found",
            Self::NotEquippable { .. } => "not_equippable",
            Self::NotConsumable { .. } => "not_consumable",
            Self::SlotEmpty { .. } => "slot_empty",
            Self::UnknownSlot { .. } => "unknown_slot",
            Self::SlotMismatch { .. } => "slot_mismatch",
            Self::EmptyNarration => "empty_narration",
            Self::NoExperience => "no_experience",
            Self::Invariant(_) => "invariant",
        }
    }

    /// Returns true if this reason indicates an engine bug rather than misuse.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Invariant(_))
    }

    pub(crate) fn item_not_found(item_id: &str) -> Self {
        Self::ItemNotFound {
            item_id: item_id.to_owned(),
        }
    }
}
