use crate::config::GameConfig;

/// Identity and progression of the character.
///
/// `xp` counts experience accumulated within the current level and always
/// stays below `xp_to_next` once a transition completes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CharacterProfile {
    pub name: String,
    pub level: u32,
    pub xp: u64,
    pub xp_to_next: u64,
}

impl CharacterProfile {
    /// Creates a level-1 profile with no experience.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: GameConfig::STARTING_LEVEL,
            xp: 0,
            xp_to_next: GameConfig::STARTING_XP_TO_NEXT,
        }
    }
}

impl Default for CharacterProfile {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT_NAME)
    }
}
