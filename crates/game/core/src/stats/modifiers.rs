//! Signed per-stat adjustments and the floor-clamped arithmetic applying them.

use std::collections::BTreeMap;

use super::block::{StatBlock, StatKey};

/// A set of signed per-stat deltas applied or reversed as a unit.
///
/// Stats absent from the mapping are treated as a zero delta.
///
/// Deserialization is lenient: keys that are not stat names and values that
/// are not numbers are dropped rather than failing the enclosing document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Modifiers(BTreeMap<StatKey, i32>);

impl Modifiers {
    /// Create an empty modifier mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion, replacing any previous delta for `key`.
    #[must_use]
    pub fn with(mut self, key: StatKey, delta: i32) -> Self {
        self.0.insert(key, delta);
        self
    }

    /// Builds a mapping from loosely-typed `(name, delta)` pairs.
    ///
    /// Names that are not recognized stat keys are ignored, and deltas outside
    /// the `i32` range saturate.
    pub fn from_raw<'a, I>(raw: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        raw.into_iter()
            .filter_map(|(name, delta)| {
                let key = name.parse::<StatKey>().ok()?;
                let delta = delta.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
                Some((key, delta))
            })
            .collect()
    }

    /// Returns the delta for `key`, zero when absent.
    pub fn get(&self, key: StatKey) -> i32 {
        self.0.get(&key).copied().unwrap_or(0)
    }

    /// Returns the mapping that reverses this one.
    #[must_use]
    pub fn negated(&self) -> Self {
        self.0
            .iter()
            .map(|(&key, &delta)| (key, delta.saturating_neg()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKey, i32)> + '_ {
        self.0.iter().map(|(&key, &delta)| (key, delta))
    }
}

impl FromIterator<(StatKey, i32)> for Modifiers {
    fn from_iter<T: IntoIterator<Item = (StatKey, i32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Applies `modifiers` to `stats`, clamping each touched stat at zero.
///
/// This is the sole path through which a [`StatBlock`] changes. Reverse a
/// prior application with `apply_modifiers(stats, &modifiers.negated())`.
pub fn apply_modifiers(stats: &StatBlock, modifiers: &Modifiers) -> StatBlock {
    let mut next = *stats;
    for (key, delta) in modifiers.iter() {
        let value = i64::from(next.get(key)) + i64::from(delta);
        next.set(key, value.clamp(0, i64::from(u32::MAX)) as u32);
    }
    next
}

#[cfg(feature = "serde")]
mod de {
    use std::fmt;

    use serde::de::{Deserialize, Deserializer, Error, IgnoredAny, MapAccess, SeqAccess, Visitor};

    use super::Modifiers;

    impl<'de> Deserialize<'de> for Modifiers {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(ModifiersVisitor)
        }
    }

    struct ModifiersVisitor;

    impl<'de> Visitor<'de> for ModifiersVisitor {
        type Value = Modifiers;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of stat deltas")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Modifiers, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut raw = Vec::new();
            while let Some((key, delta)) = map.next_entry::<String, Delta>()? {
                if let Some(delta) = delta.0 {
                    raw.push((key, delta));
                }
            }
            Ok(Modifiers::from_raw(
                raw.iter().map(|(key, delta)| (key.as_str(), *delta)),
            ))
        }

        fn visit_unit<E>(self) -> Result<Modifiers, E>
        where
            E: Error,
        {
            Ok(Modifiers::new())
        }

        fn visit_none<E>(self) -> Result<Modifiers, E>
        where
            E: Error,
        {
            Ok(Modifiers::new())
        }
    }

    /// One delta value; `None` when it is not usable as a number.
    struct Delta(Option<i64>);

    impl<'de> Deserialize<'de> for Delta {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(DeltaVisitor)
        }
    }

    struct DeltaVisitor;

    impl DeltaVisitor {
        fn float(value: f64) -> Delta {
            Delta(value.is_finite().then(|| value.trunc() as i64))
        }
    }

    impl<'de> Visitor<'de> for DeltaVisitor {
        type Value = Delta;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a stat delta")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Delta, E>
        where
            E: Error,
        {
            Ok(Delta(Some(value)))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Delta, E>
        where
            E: Error,
        {
            Ok(Delta(Some(i64::try_from(value).unwrap_or(i64::MAX))))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Delta, E>
        where
            E: Error,
        {
            Ok(Self::float(value))
        }

        fn visit_str<E>(self, value: &str) -> Result<Delta, E>
        where
            E: Error,
        {
            Ok(value.trim().parse::<f64>().map_or(Delta(None), Self::float))
        }

        fn visit_bool<E>(self, _value: bool) -> Result<Delta, E>
        where
            E: Error,
        {
            Ok(Delta(None))
        }

        fn visit_unit<E>(self) -> Result<Delta, E>
        where
            E: Error,
        {
            Ok(Delta(None))
        }

        fn visit_none<E>(self) -> Result<Delta, E>
        where
            E: Error,
        {
            Ok(Delta(None))
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Delta, A::Error>
        where
            A: SeqAccess<'de>,
        {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(Delta(None))
        }

        fn visit_map<A>(self, mut map: A) -> Result<Delta, A::Error>
        where
            A: MapAccess<'de>,
        {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(Delta(None))
        }
    }
}
