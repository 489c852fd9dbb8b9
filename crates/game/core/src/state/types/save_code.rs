use std::fmt;

/// Reasons a string cannot serve as a save code.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSaveCode {
    #[error("save code is empty")]
    Empty,

    #[error("save code '{0}' is reserved")]
    Reserved(String),

    #[error("save code contains forbidden character {ch:?}")]
    ForbiddenCharacter { ch: char },
}

/// Identity key a snapshot is persisted under.
///
/// Codes are trimmed and must be non-empty. Path separators and control
/// characters are rejected because repositories may use the code as part of
/// a file name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct SaveCode(String);

impl SaveCode {
    pub fn parse(raw: &str) -> Result<Self, InvalidSaveCode> {
        let code = raw.trim();
        if code.is_empty() {
            return Err(InvalidSaveCode::Empty);
        }
        if code == "." || code == ".." {
            return Err(InvalidSaveCode::Reserved(code.to_owned()));
        }
        if let Some(ch) = code
            .chars()
            .find(|ch| matches!(ch, '/' | '\\' | ':') || ch.is_control())
        {
            return Err(InvalidSaveCode::ForbiddenCharacter { ch });
        }
        Ok(Self(code.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SaveCode {
    type Error = InvalidSaveCode;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<SaveCode> for String {
    fn from(code: SaveCode) -> Self {
        code.0
    }
}

impl std::str::FromStr for SaveCode {
    type Err = InvalidSaveCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for SaveCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SaveCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serde adapter storing an optional code as a plain string, `""` meaning none.
#[cfg(feature = "serde")]
pub(crate) mod optional_code {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::SaveCode;

    pub fn serialize<S>(code: &Option<SaveCode>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(code.as_ref().map(SaveCode::as_str).unwrap_or(""))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SaveCode>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if raw.trim().is_empty() {
            return Ok(None);
        }
        SaveCode::parse(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_trimmed() {
        let code = SaveCode::parse("  hero-01 ").unwrap();
        assert_eq!(code.as_str(), "hero-01");
    }

    #[test]
    fn unsafe_codes_are_rejected() {
        assert_eq!(SaveCode::parse("   "), Err(InvalidSaveCode::Empty));
        assert_eq!(
            SaveCode::parse(".."),
            Err(InvalidSaveCode::Reserved("..".into()))
        );
        assert_eq!(
            SaveCode::parse("a/b"),
            Err(InvalidSaveCode::ForbiddenCharacter { ch: '/' })
        );
        assert!(SaveCode::parse("tab\there").is_err());
    }
}
