//! Rule-effect sources - the entities that carry modifiers.
//!
//! Enhancements, army-rule stances, stratagems, mission twists, and
//! detachment rule choices are structurally different types unified by
//! the `HasModifiers` capability. `ActiveSources` gathers the currently
//! active set into explicit typed slots so the collection priority order
//! is enforced by construction, not by array concatenation order.

use serde::{Deserialize, Serialize};

use crate::value_objects::Modifier;

/// Capability: may carry modifiers and a display name.
///
/// The display name is what collected modifiers are attributed to in
/// tooltips.
pub trait HasModifiers {
    fn name(&self) -> &str;
    fn modifiers(&self) -> &[Modifier];
}

/// A Character upgrade chosen at list-build time. One may be active per
/// Character; it persists into play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enhancement {
    pub id: String,
    pub name: String,
    pub points: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
}

/// An army-wide rule state. At most one stance is active per unit at any
/// time, freely re-selectable during play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmyRuleStance {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
}

/// How often a stratagem may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UsageLimit {
    #[default]
    Unlimited,
    OncePerBattle,
    TwicePerBattle,
    OncePerPhase,
}

impl UsageLimit {
    /// Total uses allowed across the battle, where that is bounded.
    pub fn uses_per_battle(self) -> Option<u32> {
        match self {
            Self::OncePerBattle => Some(1),
            Self::TwicePerBattle => Some(2),
            Self::Unlimited | Self::OncePerPhase => None,
        }
    }
}

/// An on-demand, cost-gated activatable rule effect. Zero or more may be
/// simultaneously active; each activation consumes Command Points.
///
/// Usage accounting belongs to the play-state layer; the engine only
/// reads the active set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stratagem {
    pub id: String,
    pub name: String,
    /// Command Point cost per activation.
    pub cost: u32,
    #[serde(default)]
    pub limit: UsageLimit,
    /// Phase hint for the UI (e.g. "Fight phase"). Free-form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
}

/// A scenario-level modifier source, independent of any specific unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionTwist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
}

/// A detachment-level rule offering named choices. At most one choice is
/// selected per rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetachmentRule {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<DetachmentRuleChoice>,
}

impl DetachmentRule {
    pub fn choice(&self, choice_id: &str) -> Option<&DetachmentRuleChoice> {
        self.choices.iter().find(|c| c.id == choice_id)
    }
}

/// A named choice within a detachment rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetachmentRuleChoice {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
}

macro_rules! impl_has_modifiers {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl HasModifiers for $ty {
                fn name(&self) -> &str {
                    &self.name
                }

                fn modifiers(&self) -> &[Modifier] {
                    &self.modifiers
                }
            }
        )+
    };
}

impl_has_modifiers!(
    Enhancement,
    ArmyRuleStance,
    Stratagem,
    MissionTwist,
    DetachmentRuleChoice,
);

/// The rule-effect sources currently in force for one unit.
///
/// Slots are typed and iterated in a fixed priority order - stratagems,
/// mission twists, enhancement, stance, detachment rule choices - which
/// is also the order their modifiers are later folded. Saved lists were
/// computed under this order, so it must not change.
#[derive(Clone, Copy, Default)]
pub struct ActiveSources<'a> {
    pub stratagems: &'a [Stratagem],
    pub twists: &'a [MissionTwist],
    pub enhancement: Option<&'a Enhancement>,
    pub stance: Option<&'a ArmyRuleStance>,
    pub rule_choices: &'a [DetachmentRuleChoice],
}

impl<'a> ActiveSources<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    /// All active sources in collection priority order.
    pub fn in_priority_order(&self) -> impl Iterator<Item = &'a dyn HasModifiers> {
        self.stratagems
            .iter()
            .map(|s| s as &dyn HasModifiers)
            .chain(self.twists.iter().map(|t| t as &dyn HasModifiers))
            .chain(self.enhancement.map(|e| e as &dyn HasModifiers))
            .chain(self.stance.map(|s| s as &dyn HasModifiers))
            .chain(self.rule_choices.iter().map(|c| c as &dyn HasModifiers))
    }
}
