//! Text presentation of the game state for the terminal.

use std::fmt::Write;

use game_core::{
    ActionResult, EquipSlot, GameState, Item, Modifiers, Outcome, SkipReason, StatKey,
};
use runtime::SessionUpdate;

pub const HELP: &str = "\
Commands:
  code <save code>     choose the save slot
  new                  start a new character (keeps the save code)
  save | load          save or load the current slot
  equip <item id>      equip an inventory item
  unequip <slot>       unequip weapon, armor or accessory
  use <item id>        use a consumable
  drop <item id>       drop an item
  xp <amount>          gain experience
  event <json>         apply a structured event
  say <text>           add a line to the story (or just type it)
  show                 print the character sheet
  help | quit";

/// Full character sheet.
pub fn sheet(state: &GameState) -> String {
    let mut out = String::new();
    let profile = &state.profile;

    let code = state
        .save_code
        .as_ref()
        .map_or("(no save code)", |code| code.as_str());
    let _ = writeln!(out, "{} [{}]", profile.name, code);
    let _ = writeln!(
        out,
        "Level {}  XP {}/{}",
        profile.level, profile.xp, profile.xp_to_next
    );

    let stats: Vec<String> = StatKey::ALL
        .iter()
        .map(|&key| format!("{} {}", key.as_ref().to_uppercase(), state.stats.get(key)))
        .collect();
    let _ = writeln!(out, "{}", stats.join("  "));

    let _ = writeln!(out, "Equipment:");
    for slot in EquipSlot::ALL {
        match state.equipment.get(slot) {
            Some(item) => {
                let _ = writeln!(out, "  {:<9} {}", slot.as_ref(), item_line(item));
            }
            None => {
                let _ = writeln!(out, "  {:<9} -", slot.as_ref());
            }
        }
    }

    let _ = writeln!(out, "Inventory:");
    if state.inventory.is_empty() {
        let _ = writeln!(out, "  (empty)");
    }
    for item in &state.inventory {
        let _ = writeln!(out, "  {}", item_line(item));
    }

    out.trim_end().to_owned()
}

fn item_line(item: &Item) -> String {
    let mut line = format!("{} ({}, {})", item.name, item.id, item.kind);
    let modifiers = modifiers_text(&item.modifiers);
    if !modifiers.is_empty() {
        let _ = write!(line, " {modifiers}");
    }
    line
}

fn modifiers_text(modifiers: &Modifiers) -> String {
    modifiers
        .iter()
        .filter(|&(_, delta)| delta != 0)
        .map(|(key, delta)| format!("{delta:+} {}", key.as_ref().to_uppercase()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Lines to print after a dispatched transition.
pub fn update(update: &SessionUpdate) -> Vec<String> {
    match &update.outcome {
        Outcome::Applied(result) => {
            let mut lines = update.delta.appended_log.clone();
            if let ActionResult::EventApplied(report) = result
                && let Some(Err(reason)) = &report.equip
            {
                lines.push(format!("(equip skipped: {})", skip_message(reason)));
            }
            lines
        }
        Outcome::Skipped(skip) => vec![format!("Nothing happens: {}.", skip_message(&skip.error))],
    }
}

/// Player-facing wording for a skipped transition.
pub fn skip_message(reason: &SkipReason) -> String {
    match reason {
        SkipReason::ItemNotFound { item_id } => format!("you have no '{item_id}'"),
        SkipReason::NotEquippable { item_id, .. } => format!("'{item_id}' cannot be equipped"),
        SkipReason::NotConsumable { item_id, .. } => format!("'{item_id}' cannot be used"),
        SkipReason::SlotEmpty { slot } => format!("nothing is equipped as {slot}"),
        SkipReason::EmptyNarration => "there is nothing to say".into(),
        SkipReason::NoExperience => "no experience gained".into(),
        other => other.to_string(),
    }
}
