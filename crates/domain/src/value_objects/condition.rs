//! Modifier activation conditions and the unit wound/model state they
//! are evaluated against.
//!
//! Unknown condition tokens are deliberately permissive: an unrecognized
//! token evaluates to `true` rather than silently blocking a modifier.
//! Existing saved lists rely on this, so it must not be tightened into
//! fail-closed behavior.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Live strength state of a unit, derived from its wound pool.
///
/// `current_models` is recomputed on construction from the authoritative
/// `current_wounds`; `None` wounds means undamaged, full health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitConditionState {
    starting_models: u32,
    wounds_per_model: u32,
    current_wounds: Option<u32>,
    current_models: u32,
}

impl UnitConditionState {
    /// Single constructor keeping the model-count derivation in one place.
    ///
    /// `current_wounds = None` short-circuits to full strength without
    /// division. Otherwise `current_models = ceil(wounds / wounds_per_model)`
    /// clamped to `[0, starting_models]`.
    pub fn new(starting_models: u32, wounds_per_model: u32, current_wounds: Option<u32>) -> Self {
        let current_models = match current_wounds {
            None => starting_models,
            Some(wounds) => wounds
                .div_ceil(wounds_per_model.max(1))
                .min(starting_models),
        };
        Self {
            starting_models,
            wounds_per_model,
            current_wounds,
            current_models,
        }
    }

    pub fn starting_models(&self) -> u32 {
        self.starting_models
    }

    pub fn wounds_per_model(&self) -> u32 {
        self.wounds_per_model
    }

    pub fn current_wounds(&self) -> Option<u32> {
        self.current_wounds
    }

    pub fn current_models(&self) -> u32 {
        self.current_models
    }

    /// True the instant any whole model is lost, even if wounds remain
    /// on the damaged model.
    pub fn is_below_starting_strength(&self) -> bool {
        self.current_models < self.starting_models
    }

    /// True strictly below half. Exactly half is NOT below half:
    /// 2 of 4 models remaining is at half strength, not below it.
    pub fn is_below_half_strength(&self) -> bool {
        self.current_models < self.starting_models.div_ceil(2)
    }
}

/// Activation condition carried by a modifier.
///
/// Parsed leniently from the persisted token string; anything that does
/// not normalize to a known token becomes `Unknown` and evaluates `true`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModifierCondition {
    /// Always active
    #[default]
    None,
    BelowStartingStrength,
    BelowHalfStrength,
    /// Unrecognized token, kept verbatim for round-tripping. Fail-open.
    Unknown(String),
}

impl ModifierCondition {
    /// Parse a condition token. Never fails: normalization lowercases and
    /// collapses whitespace/hyphens to underscores, and anything still
    /// unrecognized is preserved as `Unknown`.
    pub fn parse(token: &str) -> Self {
        let lowered = token.trim().to_lowercase();
        // runs of separators collapse into a single underscore
        let normalized = lowered
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_");
        match normalized.as_str() {
            "" | "none" => Self::None,
            "below_starting_strength" => Self::BelowStartingStrength,
            "below_half_strength" => Self::BelowHalfStrength,
            _ => Self::Unknown(token.to_string()),
        }
    }

    /// Canonical token string.
    pub fn as_token(&self) -> &str {
        match self {
            Self::None => "none",
            Self::BelowStartingStrength => "below_starting_strength",
            Self::BelowHalfStrength => "below_half_strength",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Evaluate against the unit's current strength state.
    ///
    /// Pure and total: unknown conditions evaluate `true`.
    pub fn evaluate(&self, state: &UnitConditionState) -> bool {
        match self {
            Self::None | Self::Unknown(_) => true,
            Self::BelowStartingStrength => state.is_below_starting_strength(),
            Self::BelowHalfStrength => state.is_below_half_strength(),
        }
    }
}

impl fmt::Display for ModifierCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_token())
    }
}

impl Serialize for ModifierCondition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_token())
    }
}

// Lenient deserialization: any string is accepted, unknown tokens fall
// through to `Unknown` instead of erroring.
impl<'de> Deserialize<'de> for ModifierCondition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Ok(Self::parse(&token))
    }
}
