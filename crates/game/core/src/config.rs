/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Name given to a freshly created character.
    pub default_name: String,
}

impl GameConfig {
    // ===== progression =====
    /// Experience threshold of a level-1 character.
    pub const STARTING_XP_TO_NEXT: u64 = 100;
    /// Threshold growth is `round(t * GROWTH_NUM / GROWTH_DEN + GROWTH_FLAT)`.
    pub const THRESHOLD_GROWTH_NUM: u64 = 5;
    pub const THRESHOLD_GROWTH_DEN: u64 = 4;
    pub const THRESHOLD_GROWTH_FLAT: u64 = 10;

    // ===== seeded character =====
    pub const STARTING_LEVEL: u32 = 1;
    pub const STARTING_STAT: u32 = 3;
    pub const DEFAULT_NAME: &'static str = "Unnamed Hero";

    pub fn new() -> Self {
        Self {
            default_name: Self::DEFAULT_NAME.to_owned(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
