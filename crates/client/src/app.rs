//! Command loop tying input, session and rendering together.

use game_core::SaveCode;
use runtime::{RuntimeError, Session};

use crate::input::{LineCommand, parse_line};
use crate::render;

/// Whether the loop should keep reading input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    session: Session,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Handles one line of input, returning the lines to print.
    pub async fn handle_line(&mut self, line: &str) -> (Flow, Vec<String>) {
        let command = parse_line(line);
        tracing::debug!(?command, "handling input");

        let output = match command {
            LineCommand::None => Vec::new(),
            LineCommand::Quit => return (Flow::Quit, vec!["Farewell.".into()]),
            LineCommand::Help => vec![render::HELP.to_owned()],
            LineCommand::Show => vec![render::sheet(self.session.state())],
            LineCommand::Usage(usage) => vec![format!("Usage: {usage}")],
            LineCommand::Submit(action) => render::update(&self.session.dispatch(action)),
            LineCommand::Event(json) => match self.session.apply_event_json(&json) {
                Ok(update) => render::update(&update),
                Err(e) => vec![error_message(&e)],
            },
            LineCommand::SetCode(raw) => match self.session.set_save_code(&raw) {
                Ok(code) => vec![format!("Save code set to '{code}'.")],
                Err(e) => vec![error_message(&e)],
            },
            LineCommand::NewGame => {
                self.session.new_game();
                vec!["A new adventure begins.".into()]
            }
            LineCommand::Save => match self.session.save().await {
                Ok(code) => vec![format!("Game saved to '{code}'.")],
                Err(e) => vec![error_message(&e)],
            },
            LineCommand::Load => match self.session.load().await {
                Ok(()) => vec![
                    format!("Loaded '{}'.", self.current_code()),
                    render::sheet(self.session.state()),
                ],
                Err(e) => vec![error_message(&e)],
            },
        };

        (Flow::Continue, output)
    }

    /// Waits for pending saves before exit.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.session.flush().await
    }

    fn current_code(&self) -> &str {
        self.session.save_code().map_or("", SaveCode::as_str)
    }
}

/// Player-facing wording for runtime errors.
fn error_message(error: &RuntimeError) -> String {
    match error {
        RuntimeError::MissingSaveCode => "Set your save code first (code <name>).".into(),
        RuntimeError::SaveNotFound { .. } => "No save found for this code.".into(),
        RuntimeError::CorruptedSave { .. } => "Save data is corrupted.".into(),
        RuntimeError::InvalidEvent(reason) => format!("Invalid event JSON: {reason}"),
        RuntimeError::InvalidSaveCode(reason) => format!("Invalid save code: {reason}"),
        other => format!("Error: {other}"),
    }
}
