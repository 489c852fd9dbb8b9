//! Structured events: externally decided batches of changes.
//!
//! An event is applied as one transition in a fixed order regardless of how
//! its fields were authored:
//!
//! 1. append `log`
//! 2. merge `gain_items` into the inventory
//! 3. remove `remove_items` from the post-merge inventory
//! 4. apply `stats_delta`
//! 5. grant `xp`, logging any level-up
//! 6. run the `equip` directive against the resulting inventory
//!
//! Sub-steps that cannot apply are skipped individually; the rest of the
//! event still takes effect.

use crate::action::equip::equip_into_slot;
use crate::action::{ActionResult, ActionTransition, EquipReport, SkipReason};
use crate::progression::gain_experience;
use crate::state::{EquipSlot, GameState, Item};
use crate::stats::{Modifiers, apply_modifiers};

/// Request to equip a named item into a named slot.
///
/// The slot stays a raw string so an unrecognized name skips the directive
/// instead of rejecting the whole event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EquipDirective {
    pub slot: String,
    pub item_id: String,
}

impl EquipDirective {
    pub fn new(slot: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            slot: slot.into(),
            item_id: item_id.into(),
        }
    }
}

/// An externally authored change set. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct StructuredEvent {
    pub log: Option<String>,
    pub gain_items: Vec<Item>,
    pub remove_items: Vec<String>,
    pub xp: Option<i64>,
    pub stats_delta: Modifiers,
    pub equip: Option<EquipDirective>,
}

impl StructuredEvent {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_log(mut self, log: impl Into<String>) -> Self {
        self.log = Some(log.into());
        self
    }

    #[must_use]
    pub fn with_gain_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.gain_items.extend(items);
        self
    }

    #[must_use]
    pub fn with_remove_items<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.remove_items.extend(ids.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_xp(mut self, xp: i64) -> Self {
        self.xp = Some(xp);
        self
    }

    #[must_use]
    pub fn with_stats_delta(mut self, delta: Modifiers) -> Self {
        self.stats_delta = delta;
        self
    }

    #[must_use]
    pub fn with_equip(mut self, directive: EquipDirective) -> Self {
        self.equip = Some(directive);
        self
    }

    /// True when no field would have any effect.
    pub fn is_empty(&self) -> bool {
        self.log.as_deref().is_none_or(str::is_empty)
            && self.gain_items.is_empty()
            && self.remove_items.is_empty()
            && self.xp.is_none_or(|xp| xp == 0)
            && self.stats_delta.is_empty()
            && self.equip.is_none()
    }
}

/// What an applied event changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventReport {
    /// Final ids of granted items, after collision renaming.
    pub items_gained: Vec<String>,
    /// Ids that were present and removed.
    pub items_removed: Vec<String>,
    pub levels_gained: u32,
    /// Outcome of the equip directive, if the event carried one.
    pub equip: Option<Result<EquipReport, SkipReason>>,
}

/// Applies a [`StructuredEvent`] as a single transition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApplyEventAction {
    pub event: StructuredEvent,
}

impl ApplyEventAction {
    pub fn new(event: StructuredEvent) -> Self {
        Self { event }
    }
}

impl ActionTransition for ApplyEventAction {
    type Result = ActionResult;

    fn apply(&self, state: &mut GameState) -> Result<Self::Result, SkipReason> {
        let event = &self.event;
        let mut report = EventReport::default();

        if let Some(log) = event.log.as_deref().filter(|log| !log.is_empty()) {
            state.push_log(log);
        }

        if !event.gain_items.is_empty() {
            let before = state.inventory.len();
            state.inventory = state.inventory.merge_items(event.gain_items.iter().cloned());
            report.items_gained = state.inventory.as_slice()[before..]
                .iter()
                .map(|item| item.id.clone())
                .collect();
        }

        if !event.remove_items.is_empty() {
            report.items_removed = event
                .remove_items
                .iter()
                .filter(|id| state.inventory.contains(id))
                .cloned()
                .collect();
            state.inventory = state.inventory.remove_items(&event.remove_items);
        }

        if !event.stats_delta.is_empty() {
            state.stats = apply_modifiers(&state.stats, &event.stats_delta);
        }

        if let Some(xp) = event.xp.filter(|&xp| xp != 0) {
            let progress = gain_experience(&state.profile, xp);
            state.profile = progress.profile;
            report.levels_gained = progress.levels_gained;
            if report.levels_gained > 0 {
                state.push_log(format!("Level up! You are now level {}.", state.profile.level));
            }
        }

        if let Some(directive) = &event.equip {
            let result = directive
                .slot
                .parse::<EquipSlot>()
                .map_err(|_| SkipReason::UnknownSlot {
                    slot: directive.slot.clone(),
                })
                .and_then(|slot| equip_into_slot(state, &directive.item_id, slot));

            if let Err(reason) = &result {
                tracing::debug!(%reason, "event equip directive skipped");
            }
            report.equip = Some(result);
        }

        Ok(ActionResult::EventApplied(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::engine::{ExecutionOutcome, GameEngine, Outcome};
    use crate::state::ItemKind;
    use crate::stats::{StatBlock, StatKey};

    fn run(state: &GameState, event: StructuredEvent) -> ExecutionOutcome {
        GameEngine::new(state).execute(&Action::apply_event(event))
    }

    fn report(outcome: &ExecutionOutcome) -> &EventReport {
        match &outcome.outcome {
            Outcome::Applied(ActionResult::EventApplied(report)) => report,
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn duplicate_grant_is_renamed() {
        let state = GameState::new_game(None);
        let event = StructuredEvent::new().with_gain_items([Item::new(
            "starter_sword",
            "Dup Sword",
            ItemKind::Weapon,
        )]);
        let outcome = run(&state, event);

        let inventory = &outcome.state.inventory;
        assert_eq!(
            inventory.find("starter_sword").map(|item| item.name.as_str()),
            Some("Rusty Sword")
        );
        assert_eq!(
            inventory.find("starter_sword_2").map(|item| item.name.as_str()),
            Some("Dup Sword")
        );
        assert_eq!(report(&outcome).items_gained, ["starter_sword_2"]);
    }

    #[test]
    fn steps_run_in_fixed_order() {
        let state = GameState::new_game(None);
        let helm = Item::new("iron_helm", "Iron Helm", ItemKind::Armor)
            .with_modifiers(Modifiers::new().with(StatKey::Vit, 2));
        let event = StructuredEvent::new()
            .with_equip(EquipDirective::new("armor", "iron_helm"))
            .with_xp(120)
            .with_stats_delta(Modifiers::new().with(StatKey::Agi, -1))
            .with_remove_items(["bandage", "ghost"])
            .with_gain_items([helm])
            .with_log("A goblin drops its helmet.");

        let outcome = run(&state, event);
        let next = &outcome.state;

        assert_eq!(
            next.log,
            [
                "A goblin drops its helmet.",
                "Level up! You are now level 2.",
                "Equipped Iron Helm (armor).",
            ]
        );
        assert_eq!(next.stats, StatBlock::new(3, 2, 3, 5));
        assert_eq!((next.profile.level, next.profile.xp), (2, 20));
        assert_eq!(next.inventory.ids().collect::<Vec<_>>(), ["starter_sword"]);
        assert_eq!(
            next.equipment.armor.as_ref().map(|item| item.id.as_str()),
            Some("iron_helm")
        );

        let report = report(&outcome);
        assert_eq!(report.items_removed, ["bandage"]);
        assert_eq!(report.levels_gained, 1);
        assert!(matches!(report.equip, Some(Ok(_))));
    }

    #[test]
    fn equip_directive_returns_the_occupant() {
        let state = GameState::new_game(None);
        let armed = GameEngine::new(&state)
            .execute(&Action::equip("starter_sword"))
            .state;
        assert_eq!(armed.stats.str, 4);

        let blade = Item::new("steel_sword", "Steel Sword", ItemKind::Weapon).with_modifiers(
            Modifiers::new()
                .with(StatKey::Str, 3)
                .with(StatKey::Agi, -1),
        );
        let event = StructuredEvent::new()
            .with_gain_items([blade])
            .with_equip(EquipDirective::new("weapon", "steel_sword"));

        let outcome = run(&armed, event);
        let next = &outcome.state;

        assert_eq!(next.stats, StatBlock::new(6, 2, 3, 3));
        assert_eq!(
            next.equipment.weapon.as_ref().map(|item| item.id.as_str()),
            Some("steel_sword")
        );
        assert_eq!(
            next.inventory.ids().collect::<Vec<_>>(),
            ["bandage", "starter_sword"]
        );
        assert_eq!(
            report(&outcome).equip,
            Some(Ok(EquipReport {
                item_id: "steel_sword".into(),
                slot: EquipSlot::Weapon,
                replaced: Some("starter_sword".into()),
            }))
        );
    }

    #[test]
    fn failed_equip_directive_keeps_the_rest() {
        let state = GameState::new_game(None);
        let event = StructuredEvent::new()
            .with_log("You find nothing useful.")
            .with_xp(10)
            .with_equip(EquipDirective::new("armor", "starter_sword"));

        let outcome = run(&state, event);

        assert!(outcome.is_applied());
        assert_eq!(outcome.state.profile.xp, 10);
        assert_eq!(outcome.state.log, ["You find nothing useful."]);
        assert!(outcome.state.equipment.is_empty());
        assert!(matches!(
            report(&outcome).equip,
            Some(Err(SkipReason::SlotMismatch { .. }))
        ));
    }

    #[test]
    fn unknown_slot_skips_directive() {
        let state = GameState::new_game(None);
        let outcome = run(
            &state,
            StructuredEvent::new().with_equip(EquipDirective::new("boots", "starter_sword")),
        );

        assert_eq!(outcome.state, state);
        assert_eq!(
            report(&outcome).equip,
            Some(Err(SkipReason::UnknownSlot {
                slot: "boots".into()
            }))
        );
    }

    #[test]
    fn removed_then_equipped_item_is_skipped() {
        let state = GameState::new_game(None);
        let event = StructuredEvent::new()
            .with_remove_items(["starter_sword"])
            .with_equip(EquipDirective::new("weapon", "starter_sword"));

        let outcome = run(&state, event);

        assert!(!outcome.state.inventory.contains("starter_sword"));
        assert!(outcome.state.equipment.weapon.is_none());
        assert!(matches!(
            report(&outcome).equip,
            Some(Err(SkipReason::ItemNotFound { .. }))
        ));
    }

    #[test]
    fn empty_event_changes_nothing() {
        let state = GameState::new_game(None);
        let event = StructuredEvent::new().with_log("").with_xp(0);
        assert!(event.is_empty());

        let outcome = run(&state, event);
        assert_eq!(outcome.state, state);
        assert!(outcome.delta.is_empty());
    }

    #[test]
    fn stat_delta_floors_at_zero() {
        let state = GameState::new_game(None);
        let outcome = run(
            &state,
            StructuredEvent::new().with_stats_delta(Modifiers::new().with(StatKey::Int, -10)),
        );
        assert_eq!(outcome.state.stats.int, 0);
    }
}
