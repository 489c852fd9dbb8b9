//! Action execution pipeline.
//!
//! The [`GameEngine`] is the single entry point for changing a [`GameState`].
//! It never touches the snapshot it was given: each call clones a draft, runs
//! the transition phases on it, and hands back either the draft or, when the
//! transition was skipped, an unchanged copy of the input.

mod errors;
mod transition;

pub use errors::{TransitionPhase, TransitionPhaseError};

use crate::action::{Action, ActionResult, SkipReason};
use crate::state::{GameState, StateDelta};

/// Whether a transition took effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Applied(ActionResult),
    /// The transition was a no-op; the returned snapshot equals the input.
    Skipped(TransitionPhaseError<SkipReason>),
}

/// Complete outcome of action execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// The snapshot after the transition.
    pub state: GameState,

    /// State change metadata (which fields changed).
    pub delta: StateDelta,

    pub outcome: Outcome,
}

impl ExecutionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self.outcome, Outcome::Applied(_))
    }

    pub fn result(&self) -> Option<&ActionResult> {
        match &self.outcome {
            Outcome::Applied(result) => Some(result),
            Outcome::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match &self.outcome {
            Outcome::Applied(_) => None,
            Outcome::Skipped(skip) => Some(&skip.error),
        }
    }
}

/// Computes new snapshots from an existing one.
///
/// All state changes flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self { state }
    }

    /// Executes `action` against the snapshot.
    ///
    /// Never fails: a skipped transition returns a copy of the input snapshot
    /// with an empty delta and the reason in [`Outcome::Skipped`].
    pub fn execute(&self, action: &Action) -> ExecutionOutcome {
        let mut draft = self.state.clone();

        match transition::execute_transition(action, self.state, &mut draft) {
            Ok(result) => {
                let delta = StateDelta::from_states(self.state, &draft);
                tracing::debug!(
                    action = action.name(),
                    changed = ?delta.fields,
                    "transition applied"
                );
                ExecutionOutcome {
                    state: draft,
                    delta,
                    outcome: Outcome::Applied(result),
                }
            }
            Err(skip) => {
                if skip.phase == TransitionPhase::PostValidate || skip.error.is_internal() {
                    tracing::error!(action = action.name(), error = %skip, "transition discarded");
                } else {
                    tracing::debug!(action = action.name(), reason = %skip, "transition skipped");
                }
                ExecutionOutcome {
                    state: self.state.clone(),
                    delta: StateDelta::default(),
                    outcome: Outcome::Skipped(skip),
                }
            }
        }
    }

    /// The snapshot this engine reads from.
    pub fn state(&self) -> &GameState {
        self.state
    }
}
