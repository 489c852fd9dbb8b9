//! Equipment slots of the character.
//!
//! Slots own the equipped [`Item`] outright: an item moves out of the
//! inventory when equipped and back into it when unequipped.

use super::Item;

/// The three equipment categories.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum EquipSlot {
    Weapon,
    Armor,
    Accessory,
}

impl EquipSlot {
    pub const ALL: [EquipSlot; 3] = [EquipSlot::Weapon, EquipSlot::Armor, EquipSlot::Accessory];
}

/// Equipment state: at most one item per slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    /// Currently equipped weapon.
    pub weapon: Option<Item>,

    /// Currently equipped armor.
    pub armor: Option<Item>,

    /// Currently equipped accessory.
    pub accessory: Option<Item>,
}

impl Equipment {
    /// Creates empty equipment.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
            EquipSlot::Accessory => self.accessory.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<Item> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Accessory => &mut self.accessory,
        }
    }

    /// Places `item` in `slot`, returning the previous occupant if any.
    pub fn equip(&mut self, slot: EquipSlot, item: Item) -> Option<Item> {
        self.slot_mut(slot).replace(item)
    }

    /// Empties `slot`, returning its occupant if any.
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    /// Occupied slots in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (EquipSlot, &Item)> {
        EquipSlot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|item| (slot, item)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}
