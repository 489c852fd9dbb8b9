//! Input processing for the terminal client.
//!
//! This module owns the line-to-command mapping so the rest of the
//! application never inspects raw text.

use game_core::{Action, EquipSlot};

/// High-level outcome of processing one input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineCommand {
    /// Exit the application.
    Quit,
    /// Submit the decoded game action to the session.
    Submit(Action),
    /// Apply a structured event given as JSON text.
    Event(String),
    /// Set the save code.
    SetCode(String),
    NewGame,
    Save,
    Load,
    /// Print the character sheet.
    Show,
    Help,
    /// A known command used wrongly; carries the usage hint.
    Usage(&'static str),
    /// Blank input.
    None,
}

/// Maps a line of input to a command.
///
/// Lines that do not start with a known command word are narration.
pub fn parse_line(line: &str) -> LineCommand {
    let line = line.trim();
    if line.is_empty() {
        return LineCommand::None;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "quit" | "exit" => LineCommand::Quit,
        "help" | "?" => LineCommand::Help,
        "show" | "sheet" => LineCommand::Show,
        "new" => LineCommand::NewGame,
        "save" => LineCommand::Save,
        "load" => LineCommand::Load,
        "code" => required(rest, "code <save code>", |code| {
            LineCommand::SetCode(code.to_owned())
        }),
        "equip" => required(rest, "equip <item id>", |id| {
            LineCommand::Submit(Action::equip(id))
        }),
        "use" => required(rest, "use <item id>", |id| {
            LineCommand::Submit(Action::use_item(id))
        }),
        "drop" => required(rest, "drop <item id>", |id| {
            LineCommand::Submit(Action::drop_item(id))
        }),
        "unequip" => match rest.to_lowercase().parse::<EquipSlot>() {
            Ok(slot) => LineCommand::Submit(Action::unequip(slot)),
            Err(_) => LineCommand::Usage("unequip <weapon|armor|accessory>"),
        },
        "xp" => match rest.parse::<i64>() {
            Ok(amount) => LineCommand::Submit(Action::gain_experience(amount)),
            Err(_) => LineCommand::Usage("xp <amount>"),
        },
        "event" => required(rest, "event <json>", |json| {
            LineCommand::Event(json.to_owned())
        }),
        "say" => required(rest, "say <text>", |text| {
            LineCommand::Submit(Action::narrate(text))
        }),
        _ => LineCommand::Submit(Action::narrate(line)),
    }
}

fn required(rest: &str, usage: &'static str, build: impl FnOnce(&str) -> LineCommand) -> LineCommand {
    if rest.is_empty() {
        LineCommand::Usage(usage)
    } else {
        build(rest)
    }
}
