//! Change tracking between two snapshots.
//!
//! A [`StateDelta`] records *which* parts of the state a transition touched,
//! not their values; the values live in the before/after snapshots. The
//! runtime uses it to decide whether a snapshot needs persisting.

use bitflags::bitflags;

use super::GameState;

bitflags! {
    /// Tracks which top-level fields of a [`GameState`] changed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StateFields: u8 {
        const PROFILE   = 1 << 0;
        const STATS     = 1 << 1;
        const EQUIPMENT = 1 << 2;
        const INVENTORY = 1 << 3;
        const LOG       = 1 << 4;
        const SAVE_CODE = 1 << 5;
    }
}

impl StateFields {
    /// Fields whose change makes the snapshot worth saving.
    pub const PERSISTED: StateFields = StateFields::PROFILE
        .union(StateFields::STATS)
        .union(StateFields::EQUIPMENT)
        .union(StateFields::INVENTORY)
        .union(StateFields::LOG);
}

/// Minimal description of a transition's impact on the state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDelta {
    /// Top-level fields that differ between the snapshots.
    pub fields: StateFields,

    /// Log entries the transition appended, oldest first.
    pub appended_log: Vec<String>,
}

impl StateDelta {
    /// Creates a delta by comparing two game states field by field.
    pub fn from_states(before: &GameState, after: &GameState) -> Self {
        let mut fields = StateFields::empty();

        if before.profile != after.profile {
            fields |= StateFields::PROFILE;
        }
        if before.stats != after.stats {
            fields |= StateFields::STATS;
        }
        if before.equipment != after.equipment {
            fields |= StateFields::EQUIPMENT;
        }
        if before.inventory != after.inventory {
            fields |= StateFields::INVENTORY;
        }
        if before.log != after.log {
            fields |= StateFields::LOG;
        }
        if before.save_code != after.save_code {
            fields |= StateFields::SAVE_CODE;
        }

        // The log is append-only; anything else means it was replaced wholesale.
        let appended_log = match after.log.strip_prefix(before.log.as_slice()) {
            Some(tail) => tail.to_vec(),
            None => after.log.clone(),
        };

        Self {
            fields,
            appended_log,
        }
    }

    /// Returns true if no state changes occurred (no-op transition).
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if profile, stats, equipment, inventory or log changed.
    pub fn requires_save(&self) -> bool {
        self.fields.intersects(StateFields::PERSISTED)
    }
}
