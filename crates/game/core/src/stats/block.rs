//! Core attributes (STR, AGI, INT, VIT).

use crate::config::GameConfig;

/// The four recognized attribute identifiers.
///
/// - **STR** (Strength): physical power
/// - **AGI** (Agility): speed and evasion
/// - **INT** (Intelligence): wits and magic
/// - **VIT** (Vitality): health and endurance
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum StatKey {
    Str,
    Agi,
    Int,
    Vit,
}

impl StatKey {
    pub const ALL: [StatKey; 4] = [StatKey::Str, StatKey::Agi, StatKey::Int, StatKey::Vit];
}

/// Attribute values of a character. Values are never negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub str: u32,
    pub agi: u32,
    pub int: u32,
    pub vit: u32,
}

impl StatBlock {
    pub const fn new(str: u32, agi: u32, int: u32, vit: u32) -> Self {
        Self { str, agi, int, vit }
    }

    /// Every attribute set to the same value.
    pub const fn uniform(value: u32) -> Self {
        Self::new(value, value, value, value)
    }

    pub const fn get(&self, key: StatKey) -> u32 {
        match key {
            StatKey::Str => self.str,
            StatKey::Agi => self.agi,
            StatKey::Int => self.int,
            StatKey::Vit => self.vit,
        }
    }

    pub(crate) fn set(&mut self, key: StatKey, value: u32) {
        match key {
            StatKey::Str => self.str = value,
            StatKey::Agi => self.agi = value,
            StatKey::Int => self.int = value,
            StatKey::Vit => self.vit = value,
        }
    }

    /// Iterates `(key, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKey, u32)> + '_ {
        StatKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }
}

impl Default for StatBlock {
    /// Starting attributes of a new character.
    fn default() -> Self {
        Self::uniform(GameConfig::STARTING_STAT)
    }
}
