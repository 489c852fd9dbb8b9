//! Item-related state types.
//!
//! This module contains foundational item types:
//! - ItemKind: Category deciding which actions an item supports
//! - Item: A concrete item carried in the inventory or an equipment slot

use std::fmt;

use super::EquipSlot;
use crate::stats::Modifiers;

/// Category of an item.
///
/// Unrecognized categories are kept verbatim in [`ItemKind::Other`] so that
/// externally authored items survive a save/load cycle; such items can only
/// be dropped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum ItemKind {
    Weapon,
    Armor,
    Accessory,
    Consumable,
    Other(String),
}

impl ItemKind {
    pub fn as_str(&self) -> &str {
        match self {
            ItemKind::Weapon => "weapon",
            ItemKind::Armor => "armor",
            ItemKind::Accessory => "accessory",
            ItemKind::Consumable => "consumable",
            ItemKind::Other(raw) => raw,
        }
    }

    /// The equipment slot this kind occupies, if it is equippable.
    pub fn slot(&self) -> Option<EquipSlot> {
        match self {
            ItemKind::Weapon => Some(EquipSlot::Weapon),
            ItemKind::Armor => Some(EquipSlot::Armor),
            ItemKind::Accessory => Some(EquipSlot::Accessory),
            ItemKind::Consumable | ItemKind::Other(_) => None,
        }
    }

    pub fn is_equippable(&self) -> bool {
        self.slot().is_some()
    }

    pub fn is_consumable(&self) -> bool {
        matches!(self, ItemKind::Consumable)
    }
}

impl Default for ItemKind {
    fn default() -> Self {
        ItemKind::Other(String::new())
    }
}

impl From<String> for ItemKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "weapon" => ItemKind::Weapon,
            "armor" => ItemKind::Armor,
            "accessory" => ItemKind::Accessory,
            "consumable" => ItemKind::Consumable,
            _ => ItemKind::Other(raw),
        }
    }
}

impl From<&str> for ItemKind {
    fn from(raw: &str) -> Self {
        ItemKind::from(raw.to_owned())
    }
}

impl From<ItemKind> for String {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A carried item. Ids are unique within whichever collection holds the item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: ItemKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Modifiers,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
            modifiers: Modifiers::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Same item under a different id.
    #[must_use]
    pub fn renamed(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
