//! StatValue - a stat's printed value, numeric or textual.
//!
//! Catalog data mixes plain integers (`3`, `7`) with textual values such
//! as save strings (`"2+"`), dice notation (`"D6"`), and the `"-"` used
//! for inapplicable stats. The untagged serde form round-trips either
//! JSON shape unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stat value as printed on a datasheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i32),
    Text(String),
}

impl StatValue {
    /// The placeholder shown for stats that do not apply (e.g. Range on
    /// a melee weapon).
    pub fn dash() -> Self {
        Self::Text("-".to_string())
    }

    /// Numeric value, if this is a plain integer.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// Splits a digit-leading string like `"2+"` into its numeric core and
    /// suffix. Returns `None` for plain integers and for strings that do
    /// not start with a digit (`"D6"`, `"-"`).
    pub fn numeric_core(&self) -> Option<(i32, &str)> {
        let text = match self {
            Self::Int(_) => return None,
            Self::Text(s) => s.as_str(),
        };
        let digits = text.len() - text.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 {
            return None;
        }
        let core = text[..digits].parse().ok()?;
        Some((core, &text[digits..]))
    }
}

impl From<i32> for StatValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for StatValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for StatValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}
