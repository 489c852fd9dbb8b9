//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionResult, ActionTransition, SkipReason};
use crate::state::GameState;

use super::errors::{TransitionPhase, TransitionPhaseError};

/// Runs a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the draft state and return result
/// 3. `post_validate` - Verify invariants after mutation
#[inline]
pub(super) fn drive_transition<T>(
    transition: &T,
    before: &GameState,
    state: &mut GameState,
) -> Result<T::Result, TransitionPhaseError<SkipReason>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(before, state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes an action to its transition.
pub(super) fn execute_transition(
    action: &Action,
    before: &GameState,
    state: &mut GameState,
) -> Result<ActionResult, TransitionPhaseError<SkipReason>> {
    match action {
        Action::Equip(transition) => drive_transition(transition, before, state),
        Action::Unequip(transition) => drive_transition(transition, before, state),
        Action::UseItem(transition) => drive_transition(transition, before, state),
        Action::DropItem(transition) => drive_transition(transition, before, state),
        Action::GainExperience(transition) => drive_transition(transition, before, state),
        Action::Narrate(transition) => drive_transition(transition, before, state),
        Action::ApplyEvent(transition) => drive_transition(transition, before, state),
    }
}
