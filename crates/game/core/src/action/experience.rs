use crate::action::{ActionResult, ActionTransition, SkipReason};
use crate::progression::gain_experience;
use crate::state::GameState;

/// Grants (or, for a negative amount, removes) experience directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GainExperienceAction {
    pub amount: i64,
}

impl GainExperienceAction {
    pub fn new(amount: i64) -> Self {
        Self { amount }
    }
}

impl ActionTransition for GainExperienceAction {
    type Result = ActionResult;

    fn pre_validate(&self, _state: &GameState) -> Result<(), SkipReason> {
        if self.amount == 0 {
            return Err(SkipReason::NoExperience);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState) -> Result<Self::Result, SkipReason> {
        let progress = gain_experience(&state.profile, self.amount);
        let leveled_up = progress.leveled_up();
        state.profile = progress.profile;

        let message = if leveled_up {
            format!(
                "You gained {} XP and leveled up to {}!",
                self.amount, state.profile.level
            )
        } else {
            format!("You gained {} XP.", self.amount)
        };
        state.push_log(message);

        Ok(ActionResult::ExperienceGained {
            amount: self.amount,
            levels_gained: progress.levels_gained,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::engine::{GameEngine, Outcome};

    #[test]
    fn grant_without_level_up() {
        let state = GameState::new_game(None);
        let outcome = GameEngine::new(&state).execute(&Action::gain_experience(40));

        assert_eq!(outcome.state.profile.xp, 40);
        assert_eq!(outcome.state.log, ["You gained 40 XP."]);
    }

    #[test]
    fn multi_level_grant_reports_final_level() {
        let state = GameState::new_game(None);
        let outcome = GameEngine::new(&state).execute(&Action::gain_experience(250));

        assert_eq!(outcome.state.profile.level, 3);
        assert_eq!(outcome.state.log, ["You gained 250 XP and leveled up to 3!"]);
        assert_eq!(
            outcome.outcome,
            Outcome::Applied(ActionResult::ExperienceGained {
                amount: 250,
                levels_gained: 2
            })
        );
    }

    #[test]
    fn zero_grant_is_skipped() {
        let state = GameState::new_game(None);
        let outcome = GameEngine::new(&state).execute(&Action::gain_experience(0));

        assert_eq!(outcome.state, state);
        assert_eq!(outcome.skip_reason(), Some(&SkipReason::NoExperience));
    }
}
