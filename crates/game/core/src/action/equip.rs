//! Moving gear between the inventory and equipment slots.
//!
//! Equipping removes the item from the inventory, returns any previous
//! occupant of the slot to the inventory with its modifiers reversed, then
//! places the item and applies its modifiers. Unequipping does the reverse.
//! Structured events reuse [`equip_into_slot`] so both paths behave alike.

use crate::action::{ActionResult, ActionTransition, SkipReason};
use crate::state::{EquipSlot, GameState, Item};
use crate::stats::apply_modifiers;

/// Equips an inventory item into the slot its kind dictates.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipAction {
    pub item_id: String,
}

impl EquipAction {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
        }
    }

    fn target_slot(&self, state: &GameState) -> Result<EquipSlot, SkipReason> {
        let item = state
            .inventory
            .find(&self.item_id)
            .ok_or_else(|| SkipReason::item_not_found(&self.item_id))?;

        item.kind.slot().ok_or_else(|| SkipReason::NotEquippable {
            item_id: item.id.clone(),
            kind: item.kind.clone(),
        })
    }
}

/// What an equip changed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipReport {
    pub item_id: String,
    pub slot: EquipSlot,
    /// Inventory id of the item the equip displaced, if the slot was occupied.
    pub replaced: Option<String>,
}

impl ActionTransition for EquipAction {
    type Result = ActionResult;

    fn pre_validate(&self, state: &GameState) -> Result<(), SkipReason> {
        self.target_slot(state).map(|_| ())
    }

    fn apply(&self, state: &mut GameState) -> Result<Self::Result, SkipReason> {
        let slot = self.target_slot(state)?;
        equip_into_slot(state, &self.item_id, slot).map(ActionResult::Equipped)
    }
}

/// Returns the item in a slot to the inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnequipAction {
    pub slot: EquipSlot,
}

impl UnequipAction {
    pub fn new(slot: EquipSlot) -> Self {
        Self { slot }
    }
}

impl ActionTransition for UnequipAction {
    type Result = ActionResult;

    fn pre_validate(&self, state: &GameState) -> Result<(), SkipReason> {
        match state.equipment.get(self.slot) {
            Some(_) => Ok(()),
            None => Err(SkipReason::SlotEmpty { slot: self.slot }),
        }
    }

    fn apply(&self, state: &mut GameState) -> Result<Self::Result, SkipReason> {
        let item = state
            .equipment
            .unequip(self.slot)
            .ok_or(SkipReason::SlotEmpty { slot: self.slot })?;

        state.push_log(format!("Unequipped {}.", item.name));
        let item_id = return_to_inventory(state, item);

        Ok(ActionResult::Unequipped {
            item_id,
            slot: self.slot,
        })
    }
}

/// Moves `item_id` from the inventory into `slot`, swapping out any occupant.
///
/// Fails without touching `state` when the item is missing or its kind does
/// not belong in `slot`.
pub(crate) fn equip_into_slot(
    state: &mut GameState,
    item_id: &str,
    slot: EquipSlot,
) -> Result<EquipReport, SkipReason> {
    let item = state
        .inventory
        .find(item_id)
        .cloned()
        .ok_or_else(|| SkipReason::item_not_found(item_id))?;

    if item.kind.slot() != Some(slot) {
        return Err(SkipReason::SlotMismatch {
            item_id: item.id,
            kind: item.kind,
            slot,
        });
    }

    state.inventory = state.inventory.without(item_id);

    let replaced = state
        .equipment
        .equip(slot, item.clone())
        .map(|previous| return_to_inventory(state, previous));

    state.stats = apply_modifiers(&state.stats, &item.modifiers);
    state.push_log(format!("Equipped {} ({}).", item.name, slot));

    tracing::debug!(item = %item.id, %slot, ?replaced, "equipped item");

    Ok(EquipReport {
        item_id: item.id,
        slot,
        replaced,
    })
}

/// Puts a previously equipped item back in the inventory and reverses its
/// modifiers. Returns the id it was stored under, which differs from the
/// original only if the inventory already held that id.
fn return_to_inventory(state: &mut GameState, item: Item) -> String {
    state.stats = apply_modifiers(&state.stats, &item.modifiers.negated());
    state.inventory = state.inventory.merge_items([item]);
    state
        .inventory
        .as_slice()
        .last()
        .map(|stored| stored.id.clone())
        .unwrap_or_default()
}
