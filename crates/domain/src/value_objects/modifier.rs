//! Modifier - a single numeric rule effect targeting one stat.
//!
//! Modifiers are immutable value objects owned by rule-effect sources
//! (enhancements, stances, stratagems, twists, detachment rule choices).
//! Application is an ordered left fold: order is significant once `Set`
//! or `Multiply` mix with `Add`/`Subtract`.

use serde::{Deserialize, Serialize};

use super::condition::ModifierCondition;
use super::stat::StatKey;
use super::stat_value::StatValue;

/// Arithmetic operation a modifier performs on the base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModifierOperation {
    Add,
    Subtract,
    Multiply,
    /// Replaces the base value entirely.
    Set,
}

/// The class of target a modifier applies to.
///
/// `Model`/`Unit` target unit-profile stats; `Melee`/`Ranged`/`Weapon`/`All`
/// target weapon-profile stats. A `Melee` modifier never touches a ranged
/// weapon and vice versa; `Weapon` and `All` affect both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModifierScope {
    Model,
    Unit,
    Melee,
    Ranged,
    Weapon,
    All,
}

impl ModifierScope {
    /// True if this scope applies to unit-profile stat queries.
    pub fn applies_to_unit(self) -> bool {
        matches!(self, Self::Model | Self::Unit)
    }

    /// True if this scope applies to a melee weapon's stats.
    pub fn applies_to_melee_weapon(self) -> bool {
        matches!(self, Self::Melee | Self::Weapon | Self::All)
    }

    /// True if this scope applies to a ranged weapon's stats.
    pub fn applies_to_ranged_weapon(self) -> bool {
        matches!(self, Self::Ranged | Self::Weapon | Self::All)
    }
}

/// A single rule effect: one stat, one operation, one scope, an optional
/// activation condition, and (once collected) the name of the source it
/// came from.
///
/// Never mutated after creation; use the builder-style methods to create
/// modified copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifier {
    /// The stat this modifier targets
    pub stat: StatKey,
    pub operation: ModifierOperation,
    pub value: i32,
    pub scope: ModifierScope,
    /// Activation condition; absent or `"none"` means always active
    #[serde(default, skip_serializing_if = "ModifierCondition::is_none")]
    pub condition: ModifierCondition,
    /// Display name of the owning source, filled in during collection
    /// for UI attribution. Does not change numeric behavior.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Modifier {
    pub fn new(stat: StatKey, operation: ModifierOperation, value: i32, scope: ModifierScope) -> Self {
        Self {
            stat,
            operation,
            value,
            scope,
            condition: ModifierCondition::None,
            source: None,
        }
    }

    /// Create a copy gated on the given condition.
    pub fn with_condition(self, condition: ModifierCondition) -> Self {
        Self { condition, ..self }
    }

    /// Create a copy attributed to the given source.
    pub fn with_source(self, source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..self
        }
    }
}

/// Folds `modifiers` over `base` in the order supplied.
///
/// Non-numeric bases (`"2+"`, `"D6"`) pass through unchanged - callers
/// that understand such strings extract the numeric core themselves
/// before calling this. No clamping, no rounding.
pub fn apply_modifiers(base: &StatValue, modifiers: &[Modifier]) -> StatValue {
    let Some(start) = base.as_int() else {
        return base.clone();
    };
    let folded = modifiers.iter().fold(start, |value, modifier| {
        match modifier.operation {
            ModifierOperation::Add => value + modifier.value,
            ModifierOperation::Subtract => value - modifier.value,
            ModifierOperation::Multiply => value * modifier.value,
            ModifierOperation::Set => modifier.value,
        }
    });
    StatValue::Int(folded)
}
