//! Consuming and discarding inventory items.

use crate::action::{ActionResult, ActionTransition, SkipReason};
use crate::state::{GameState, Item};
use crate::stats::apply_modifiers;

/// Consumes a consumable, applying its modifiers permanently.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseItemAction {
    pub item_id: String,
}

impl UseItemAction {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
        }
    }

    fn consumable<'a>(&self, state: &'a GameState) -> Result<&'a Item, SkipReason> {
        let item = state
            .inventory
            .find(&self.item_id)
            .ok_or_else(|| SkipReason::item_not_found(&self.item_id))?;

        if !item.kind.is_consumable() {
            return Err(SkipReason::NotConsumable {
                item_id: item.id.clone(),
                kind: item.kind.clone(),
            });
        }
        Ok(item)
    }
}

impl ActionTransition for UseItemAction {
    type Result = ActionResult;

    fn pre_validate(&self, state: &GameState) -> Result<(), SkipReason> {
        self.consumable(state).map(|_| ())
    }

    fn apply(&self, state: &mut GameState) -> Result<Self::Result, SkipReason> {
        let item = self.consumable(state)?.clone();

        state.inventory = state.inventory.without(&item.id);
        state.stats = apply_modifiers(&state.stats, &item.modifiers);
        state.push_log(format!("Used {}.", item.name));

        Ok(ActionResult::Used { item_id: item.id })
    }
}

/// Removes an item from the inventory with no stat effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropItemAction {
    pub item_id: String,
}

impl DropItemAction {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
        }
    }
}

impl ActionTransition for DropItemAction {
    type Result = ActionResult;

    fn pre_validate(&self, state: &GameState) -> Result<(), SkipReason> {
        if state.inventory.contains(&self.item_id) {
            Ok(())
        } else {
            Err(SkipReason::item_not_found(&self.item_id))
        }
    }

    fn apply(&self, state: &mut GameState) -> Result<Self::Result, SkipReason> {
        let name = state
            .inventory
            .find(&self.item_id)
            .map(|item| item.name.clone())
            .ok_or_else(|| SkipReason::item_not_found(&self.item_id))?;

        state.inventory = state.inventory.without(&self.item_id);
        state.push_log(format!("Dropped {name}."));

        Ok(ActionResult::Dropped {
            item_id: self.item_id.clone(),
        })
    }
}
