//! Attribute stats and the modifier arithmetic that mutates them.
//!
//! A [`StatBlock`] holds the four attributes of a character. The only way a
//! stat block changes is [`apply_modifiers`], which adds a signed
//! [`Modifiers`] mapping and clamps every result at zero. Equipment bonuses
//! are reversed by applying the negated mapping.
//!
//! Reversal is exact unless a clamp discarded part of a delta: applying
//! `{str: -5}` to `str = 3` yields `0`, and the reversing `{str: +5}` then
//! yields `5`, not `3`.

pub mod block;
pub mod modifiers;

pub use block::{StatBlock, StatKey};
pub use modifiers::{Modifiers, apply_modifiers};
