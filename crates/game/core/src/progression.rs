//! Experience accumulation and level resolution.
//!
//! Experience is tracked per level: `xp` counts points earned since the last
//! level-up and each level-up consumes `xp_to_next` points. The threshold
//! then grows to `round(xp_to_next * 1.25 + 10)`.
//!
//! Resolution loops until the remaining experience fits below the threshold,
//! so a single large grant may resolve several level-ups, and splitting a
//! grant into smaller pieces lands on the same profile.

use crate::config::GameConfig;
use crate::state::CharacterProfile;

/// Result of [`gain_experience`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelProgress {
    pub profile: CharacterProfile,
    pub levels_gained: u32,
}

impl LevelProgress {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Adds `amount` experience to `profile` and resolves every level-up it earns.
///
/// A zero amount leaves the profile unchanged. A negative amount removes
/// experience within the current level only: `xp` floors at zero and the
/// level never decreases.
pub fn gain_experience(profile: &CharacterProfile, amount: i64) -> LevelProgress {
    let mut next = profile.clone();
    let mut levels_gained = 0;

    next.xp = if amount >= 0 {
        next.xp.saturating_add(amount.unsigned_abs())
    } else {
        next.xp.saturating_sub(amount.unsigned_abs())
    };

    while next.xp >= next.xp_to_next {
        next.xp -= next.xp_to_next;
        next.level = next.level.saturating_add(1);
        next.xp_to_next = next_threshold(next.xp_to_next);
        levels_gained += 1;
    }

    LevelProgress {
        profile: next,
        levels_gained,
    }
}

/// Threshold for the level after one whose threshold is `current`.
///
/// Computes `round(current * 1.25 + 10)` with halves rounded up, in integer
/// arithmetic: `(5 * current + 40) / 4` plus one half is `(5 * current + 42) / 4`.
pub fn next_threshold(current: u64) -> u64 {
    let den = GameConfig::THRESHOLD_GROWTH_DEN;
    current
        .saturating_mul(GameConfig::THRESHOLD_GROWTH_NUM)
        .saturating_add(GameConfig::THRESHOLD_GROWTH_FLAT * den)
        .saturating_add(den / 2)
        / den
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> CharacterProfile {
        CharacterProfile::new("Tester")
    }

    #[test]
    fn threshold_growth_rounds_half_up() {
        assert_eq!(next_threshold(100), 135);
        assert_eq!(next_threshold(135), 179); // 178.75
        assert_eq!(next_threshold(2), 13); // 12.5
        assert_eq!(next_threshold(0), 10);
    }

    #[test]
    fn small_grant_accumulates_without_leveling() {
        let progress = gain_experience(&fresh(), 10);
        assert!(!progress.leveled_up());
        assert_eq!(progress.profile.xp, 10);
        assert_eq!(progress.profile.level, 1);
    }

    #[test]
    fn two_hundred_fifty_xp_from_level_one() {
        let progress = gain_experience(&fresh(), 250);

        // 250 - 100 = 150 >= 135 → level 3 with 15 left, threshold 179.
        assert!(progress.leveled_up());
        assert_eq!(progress.levels_gained, 2);
        assert_eq!(progress.profile.level, 3);
        assert_eq!(progress.profile.xp, 15);
        assert_eq!(progress.profile.xp_to_next, 179);
    }

    #[test]
    fn one_fifty_xp_lands_on_level_two_with_fifty() {
        let progress = gain_experience(&fresh(), 150);

        assert_eq!(progress.levels_gained, 1);
        assert_eq!(progress.profile.level, 2);
        assert_eq!(progress.profile.xp, 50);
        assert_eq!(progress.profile.xp_to_next, 135);
    }

    #[test]
    fn exact_threshold_levels_up_with_zero_remainder() {
        let progress = gain_experience(&fresh(), 100);
        assert_eq!(progress.profile.level, 2);
        assert_eq!(progress.profile.xp, 0);
    }

    #[test]
    fn invariant_holds_for_many_grants() {
        let mut profile = fresh();
        for amount in [0, 1, 7, 99, 100, 101, 250, 1_000, 12_345, 1_000_000] {
            let start_level = profile.level;
            profile = gain_experience(&profile, amount).profile;
            assert!(profile.xp < profile.xp_to_next);
            assert!(profile.level >= start_level);
        }
    }

    #[test]
    fn split_grants_match_a_single_grant() {
        let total = 5_000;
        let lump = gain_experience(&fresh(), total).profile;

        for step in [1, 3, 10, 99, 250, 1_234] {
            let mut profile = fresh();
            let mut remaining = total;
            while remaining > 0 {
                let chunk = remaining.min(step);
                profile = gain_experience(&profile, chunk).profile;
                remaining -= chunk;
            }
            assert_eq!(profile, lump, "step {step}");
        }
    }

    #[test]
    fn zero_is_a_no_op() {
        let profile = gain_experience(&fresh(), 40).profile;
        let progress = gain_experience(&profile, 0);
        assert_eq!(progress.profile, profile);
        assert!(!progress.leveled_up());
    }

    #[test]
    fn negative_grant_floors_within_level() {
        let profile = gain_experience(&fresh(), 130).profile;
        assert_eq!((profile.level, profile.xp), (2, 30));

        let drained = gain_experience(&profile, -500).profile;
        assert_eq!(drained.level, 2);
        assert_eq!(drained.xp, 0);
        assert_eq!(drained.xp_to_next, 135);
    }
}
