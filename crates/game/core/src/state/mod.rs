//! Authoritative game state representation.
//!
//! This module owns the data structures that describe the character, its
//! gear, and the narrative log. Runtime layers clone or query this state but
//! obtain new snapshots exclusively through the engine.
pub mod delta;
pub mod error;
pub mod types;

pub use delta::{StateDelta, StateFields};
pub use error::InvariantViolation;
pub use types::{
    CharacterProfile, EquipSlot, Equipment, InvalidSaveCode, InventoryState, Item, ItemKind,
    SaveCode,
};

use crate::config::GameConfig;
use crate::stats::{Modifiers, StatBlock, StatKey};

/// Canonical snapshot of the game state.
///
/// Snapshots are values: transitions produce a new `GameState` and never
/// alter the one they were computed from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GameState {
    /// Identity key the snapshot is persisted under (`None` until chosen).
    #[cfg_attr(
        feature = "serde",
        serde(rename = "userCode", default, with = "types::optional_code")
    )]
    pub save_code: Option<SaveCode>,
    pub profile: CharacterProfile,
    pub stats: StatBlock,
    pub equipment: Equipment,
    pub inventory: InventoryState,
    /// Append-only narrative log, oldest entry first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub log: Vec<String>,
}

impl GameState {
    /// Id of the weapon every new character starts with.
    pub const STARTER_WEAPON_ID: &'static str = "starter_sword";
    /// Id of the consumable every new character starts with.
    pub const STARTER_CONSUMABLE_ID: &'static str = "bandage";

    /// Creates the seeded starting state with default configuration.
    pub fn new_game(save_code: Option<SaveCode>) -> Self {
        Self::from_config(&GameConfig::default(), save_code)
    }

    /// Creates the seeded starting state.
    ///
    /// Level 1, no experience, threshold 100, all stats 3, nothing equipped,
    /// and the two [`starter_items`](Self::starter_items) in the inventory.
    pub fn from_config(config: &GameConfig, save_code: Option<SaveCode>) -> Self {
        Self {
            save_code,
            profile: CharacterProfile::new(config.default_name.clone()),
            stats: StatBlock::default(),
            equipment: Equipment::empty(),
            inventory: InventoryState::new(Self::starter_items()),
            log: Vec::new(),
        }
    }

    /// The items a fresh character carries.
    pub fn starter_items() -> [Item; 2] {
        [
            Item::new(Self::STARTER_WEAPON_ID, "Rusty Sword", ItemKind::Weapon)
                .with_description("A worn blade. Better than nothing.")
                .with_modifiers(Modifiers::new().with(StatKey::Str, 1)),
            Item::new(Self::STARTER_CONSUMABLE_ID, "Bandage", ItemKind::Consumable)
                .with_description("Stops minor bleeding. +1 VIT when used.")
                .with_modifiers(Modifiers::new().with(StatKey::Vit, 1)),
        ]
    }

    /// Same snapshot under a different identity key.
    #[must_use]
    pub fn with_save_code(&self, save_code: Option<SaveCode>) -> Self {
        Self {
            save_code,
            ..self.clone()
        }
    }

    pub(crate) fn push_log(&mut self, entry: impl Into<String>) {
        self.log.push(entry.into());
    }

    /// Checks the structural invariants every completed transition upholds.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        match self.invariant_violations().into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }

    /// Like [`check_invariants`](Self::check_invariants), but tolerates any
    /// violation `before` already had.
    ///
    /// Saves are loaded verbatim, so a snapshot may carry a violation no
    /// transition produced; only newly introduced ones are reported.
    pub fn check_invariants_since(&self, before: &GameState) -> Result<(), InvariantViolation> {
        let inherited = before.invariant_violations();
        match self
            .invariant_violations()
            .into_iter()
            .find(|violation| !inherited.contains(violation))
        {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }

    /// Every structural invariant that does not hold.
    pub fn invariant_violations(&self) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();

        if self.profile.level == 0 {
            violations.push(InvariantViolation::ZeroLevel);
        }
        if self.profile.xp >= self.profile.xp_to_next {
            violations.push(InvariantViolation::ExperienceOverflow {
                xp: self.profile.xp,
                xp_to_next: self.profile.xp_to_next,
            });
        }
        violations.extend(
            self.inventory
                .duplicate_ids()
                .into_iter()
                .map(|id| InvariantViolation::DuplicateInventoryId { id: id.to_owned() }),
        );
        for (slot, item) in self.equipment.iter() {
            if item.kind.slot() != Some(slot) {
                violations.push(InvariantViolation::SlotKindMismatch {
                    slot,
                    id: item.id.clone(),
                    kind: item.kind.to_string(),
                });
            }
        }

        violations
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game(None)
    }
}
