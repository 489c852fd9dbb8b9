use crate::action::{ActionResult, ActionTransition, SkipReason};
use crate::state::GameState;

/// Appends a player-authored line to the narrative log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NarrateAction {
    pub text: String,
}

impl NarrateAction {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ActionTransition for NarrateAction {
    type Result = ActionResult;

    fn pre_validate(&self, _state: &GameState) -> Result<(), SkipReason> {
        if self.text.trim().is_empty() {
            return Err(SkipReason::EmptyNarration);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState) -> Result<Self::Result, SkipReason> {
        state.push_log(format!("You: {}", self.text.trim()));
        Ok(ActionResult::Narrated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::engine::GameEngine;
    use crate::state::StateFields;

    #[test]
    fn narration_is_trimmed_and_prefixed() {
        let state = GameState::new_game(None);
        let outcome = GameEngine::new(&state).execute(&Action::narrate("  I open the door.\n"));

        assert_eq!(outcome.state.log, ["You: I open the door."]);
        assert_eq!(outcome.delta.fields, StateFields::LOG);
        assert_eq!(outcome.delta.appended_log, ["You: I open the door."]);
    }

    #[test]
    fn blank_narration_is_skipped() {
        let state = GameState::new_game(None);
        let outcome = GameEngine::new(&state).execute(&Action::narrate(" \t "));

        assert_eq!(outcome.skip_reason(), Some(&SkipReason::EmptyNarration));
        assert!(outcome.state.log.is_empty());
    }
}
