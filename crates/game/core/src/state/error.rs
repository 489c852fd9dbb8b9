use super::EquipSlot;

/// A structural invariant of [`GameState`](super::GameState) that does not hold.
///
/// Transitions are post-validated against these; a violation indicates a bug
/// in a transition, never a caller mistake.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InvariantViolation {
    #[error("experience {xp} is not below the level threshold {xp_to_next}")]
    ExperienceOverflow { xp: u64, xp_to_next: u64 },

    #[error("level must be at least 1")]
    ZeroLevel,

    #[error("inventory holds item id '{id}' more than once")]
    DuplicateInventoryId { id: String },

    #[error("item '{id}' of type '{kind}' sits in the {slot} slot")]
    SlotKindMismatch {
        slot: EquipSlot,
        id: String,
        kind: String,
    },
}
