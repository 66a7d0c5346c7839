//! Stat resolution - the single source of truth for effective values.
//!
//! Export and UI consumers take `ResolvedStat` as-is and never
//! reimplement modifier logic themselves.

use serde::{Deserialize, Serialize};

use crate::entities::{ActiveSources, Unit, Weapon};
use crate::value_objects::{apply_modifiers, Modifier, StatKey, StatValue, UnitConditionState};

use super::collection::{collect_unit_modifiers, collect_weapon_modifiers};

/// The effective value of one stat after modifier application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStat {
    pub value: StatValue,
    /// True iff the resolved value differs from the printed value.
    /// A modifier stack that cancels out to no net change reports false.
    pub modified: bool,
    /// Display names of the sources whose modifiers were applied, one
    /// entry per applied modifier, in application order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

impl ResolvedStat {
    fn unchanged(value: StatValue) -> Self {
        Self {
            value,
            modified: false,
            sources: Vec::new(),
        }
    }

    /// Placeholder for a stat that does not apply (e.g. Range on a melee
    /// weapon).
    fn missing() -> Self {
        Self::unchanged(StatValue::dash())
    }
}

/// Resolve a unit-profile stat (M/T/SV/W/LD/OC).
pub fn resolve_unit_stat(
    base: Option<&StatValue>,
    stat: StatKey,
    sources: &ActiveSources<'_>,
    state: &UnitConditionState,
) -> ResolvedStat {
    let Some(base) = base else {
        return ResolvedStat::missing();
    };
    resolve(base, collect_unit_modifiers(sources, stat, state))
}

/// Resolve one stat of one weapon, honoring melee/ranged scoping.
pub fn resolve_weapon_stat(
    base: Option<&StatValue>,
    stat: StatKey,
    weapon: &Weapon,
    sources: &ActiveSources<'_>,
    state: &UnitConditionState,
) -> ResolvedStat {
    let Some(base) = base else {
        return ResolvedStat::missing();
    };
    resolve(
        base,
        collect_weapon_modifiers(sources, stat, weapon.kind, state),
    )
}

/// Resolve a unit's full profile line in datasheet order.
pub fn resolve_unit_profile(
    unit: &Unit,
    sources: &ActiveSources<'_>,
    state: &UnitConditionState,
) -> Vec<(StatKey, ResolvedStat)> {
    StatKey::unit_stats()
        .into_iter()
        .map(|stat| {
            (
                stat,
                resolve_unit_stat(unit.stats.get(stat), stat, sources, state),
            )
        })
        .collect()
}

/// Resolve a weapon's full profile line. The skill column is WS for
/// melee weapons, BS for ranged.
pub fn resolve_weapon_profile(
    weapon: &Weapon,
    sources: &ActiveSources<'_>,
    state: &UnitConditionState,
) -> Vec<(StatKey, ResolvedStat)> {
    let skill = if weapon.is_melee() {
        StatKey::Ws
    } else {
        StatKey::Bs
    };
    [
        StatKey::Range,
        StatKey::A,
        skill,
        StatKey::S,
        StatKey::Ap,
        StatKey::D,
    ]
    .into_iter()
    .map(|stat| {
        (
            stat,
            resolve_weapon_stat(weapon.stats.get(stat), stat, weapon, sources, state),
        )
    })
    .collect()
}

fn resolve(base: &StatValue, modifiers: Vec<Modifier>) -> ResolvedStat {
    if modifiers.is_empty() {
        return ResolvedStat::unchanged(base.clone());
    }

    let resolved = match base {
        StatValue::Int(_) => apply_modifiers(base, &modifiers),
        StatValue::Text(_) => match base.numeric_core() {
            // Save-style strings: fold the numeric core, re-attach "+".
            Some((core, "+")) => match apply_modifiers(&StatValue::Int(core), &modifiers) {
                StatValue::Int(folded) => StatValue::Text(format!("{folded}+")),
                other => other,
            },
            // Dice notation and other text never gets silently mutated.
            _ => return ResolvedStat::unchanged(base.clone()),
        },
    };

    let modified = resolved != *base;
    ResolvedStat {
        value: resolved,
        modified,
        sources: modifiers.into_iter().filter_map(|m| m.source).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ArmyRuleStance, Enhancement, MissionTwist, WeaponKind, WeaponStats};
    use crate::value_objects::{ModifierOperation, ModifierScope};

    fn full_strength() -> UnitConditionState {
        UnitConditionState::new(4, 2, None)
    }

    fn enhancement_with(stat: StatKey, operation: ModifierOperation, value: i32) -> Enhancement {
        Enhancement {
            id: "auric-mantle".to_string(),
            name: "Auric Mantle".to_string(),
            points: 20,
            description: String::new(),
            modifiers: vec![Modifier::new(stat, operation, value, ModifierScope::All)],
        }
    }

    fn unit_enhancement_with(stat: StatKey, operation: ModifierOperation, value: i32) -> Enhancement {
        Enhancement {
            id: "auric-mantle".to_string(),
            name: "Auric Mantle".to_string(),
            points: 20,
            description: String::new(),
            modifiers: vec![Modifier::new(stat, operation, value, ModifierScope::Unit)],
        }
    }

    fn spear() -> Weapon {
        Weapon {
            id: "guardian-spear".to_string(),
            name: "Guardian Spear".to_string(),
            kind: WeaponKind::Melee,
            stats: WeaponStats {
                a: Some(StatValue::Int(5)),
                ws: Some(StatValue::from("2+")),
                s: Some(StatValue::Int(7)),
                ap: Some(StatValue::Int(-2)),
                d: Some(StatValue::from("D6")),
                ..WeaponStats::default()
            },
            abilities: vec![],
        }
    }

    mod identity {
        use super::*;

        #[test]
        fn missing_base_resolves_to_dash() {
            let resolved = resolve_unit_stat(None, StatKey::M, &ActiveSources::none(), &full_strength());
            assert_eq!(resolved.value, StatValue::dash());
            assert!(!resolved.modified);
            assert!(resolved.sources.is_empty());
        }

        #[test]
        fn no_modifiers_returns_base_unchanged() {
            let base = StatValue::Int(6);
            let resolved = resolve_unit_stat(
                Some(&base),
                StatKey::M,
                &ActiveSources::none(),
                &full_strength(),
            );
            assert_eq!(resolved.value, base);
            assert!(!resolved.modified);
            assert!(resolved.sources.is_empty());
        }

        #[test]
        fn resolution_is_idempotent() {
            let enhancement = unit_enhancement_with(StatKey::T, ModifierOperation::Add, 1);
            let sources = ActiveSources {
                enhancement: Some(&enhancement),
                ..ActiveSources::none()
            };
            let base = StatValue::Int(6);
            let first = resolve_unit_stat(Some(&base), StatKey::T, &sources, &full_strength());
            let second = resolve_unit_stat(Some(&base), StatKey::T, &sources, &full_strength());
            assert_eq!(first, second);
            assert_eq!(first.value, StatValue::Int(7));
        }
    }

    mod numeric_bases {
        use super::*;

        #[test]
        fn net_zero_stack_reports_unmodified() {
            let enhancement = Enhancement {
                modifiers: vec![
                    Modifier::new(StatKey::T, ModifierOperation::Add, 1, ModifierScope::Unit),
                    Modifier::new(StatKey::T, ModifierOperation::Subtract, 1, ModifierScope::Unit),
                ],
                ..unit_enhancement_with(StatKey::T, ModifierOperation::Add, 0)
            };
            let sources = ActiveSources {
                enhancement: Some(&enhancement),
                ..ActiveSources::none()
            };
            let base = StatValue::Int(6);
            let resolved = resolve_unit_stat(Some(&base), StatKey::T, &sources, &full_strength());
            assert_eq!(resolved.value, StatValue::Int(6));
            assert!(!resolved.modified);
        }

        #[test]
        fn weapon_stat_resolves_with_scope() {
            let enhancement = enhancement_with(StatKey::S, ModifierOperation::Add, 1);
            let sources = ActiveSources {
                enhancement: Some(&enhancement),
                ..ActiveSources::none()
            };
            let weapon = spear();
            let resolved = resolve_weapon_stat(
                weapon.stats.get(StatKey::S),
                StatKey::S,
                &weapon,
                &sources,
                &full_strength(),
            );
            assert_eq!(resolved.value, StatValue::Int(8));
            assert!(resolved.modified);
            assert_eq!(resolved.sources, vec!["Auric Mantle".to_string()]);
        }
    }

    mod text_bases {
        use super::*;

        #[test]
        fn save_string_folds_numeric_core_and_keeps_suffix() {
            let enhancement = unit_enhancement_with(StatKey::Sv, ModifierOperation::Subtract, 1);
            let sources = ActiveSources {
                enhancement: Some(&enhancement),
                ..ActiveSources::none()
            };
            let base = StatValue::from("3+");
            let resolved = resolve_unit_stat(Some(&base), StatKey::Sv, &sources, &full_strength());
            assert_eq!(resolved.value, StatValue::from("2+"));
            assert!(resolved.modified);
        }

        #[test]
        fn dice_notation_passes_through_even_with_modifiers() {
            let enhancement = enhancement_with(StatKey::D, ModifierOperation::Add, 1);
            let sources = ActiveSources {
                enhancement: Some(&enhancement),
                ..ActiveSources::none()
            };
            let weapon = spear();
            let resolved = resolve_weapon_stat(
                weapon.stats.get(StatKey::D),
                StatKey::D,
                &weapon,
                &sources,
                &full_strength(),
            );
            assert_eq!(resolved.value, StatValue::from("D6"));
            assert!(!resolved.modified);
            assert!(resolved.sources.is_empty());
        }
    }

    mod profiles {
        use super::*;

        #[test]
        fn weapon_profile_uses_ws_for_melee() {
            let profile = resolve_weapon_profile(&spear(), &ActiveSources::none(), &full_strength());
            let stats: Vec<StatKey> = profile.iter().map(|(k, _)| *k).collect();
            assert!(stats.contains(&StatKey::Ws));
            assert!(!stats.contains(&StatKey::Bs));
            // melee weapons have no range
            let (_, range) = &profile[0];
            assert_eq!(range.value, StatValue::dash());
        }

        #[test]
        fn two_all_scope_sources_stack_on_strength() {
            let enhancement = enhancement_with(StatKey::S, ModifierOperation::Add, 1);
            let twist = MissionTwist {
                id: "raging-storm".to_string(),
                name: "Raging Storm".to_string(),
                description: String::new(),
                modifiers: vec![Modifier::new(
                    StatKey::S,
                    ModifierOperation::Add,
                    1,
                    ModifierScope::All,
                )],
            };
            let twists = vec![twist];
            let sources = ActiveSources {
                twists: &twists,
                enhancement: Some(&enhancement),
                ..ActiveSources::none()
            };
            let weapon = spear();
            let resolved = resolve_weapon_stat(
                weapon.stats.get(StatKey::S),
                StatKey::S,
                &weapon,
                &sources,
                &full_strength(),
            );
            assert_eq!(resolved.value, StatValue::Int(9));
            assert!(resolved.modified);
            assert_eq!(resolved.sources.len(), 2);
        }

        #[test]
        fn stance_modifier_reaches_profile_resolution() {
            let stance = ArmyRuleStance {
                id: "dacatarai".to_string(),
                name: "Dacatarai".to_string(),
                description: String::new(),
                modifiers: vec![Modifier::new(
                    StatKey::A,
                    ModifierOperation::Add,
                    1,
                    ModifierScope::Melee,
                )],
            };
            let sources = ActiveSources {
                stance: Some(&stance),
                ..ActiveSources::none()
            };
            let profile = resolve_weapon_profile(&spear(), &sources, &full_strength());
            let attacks = profile
                .iter()
                .find(|(k, _)| *k == StatKey::A)
                .map(|(_, r)| r)
                .expect("attacks resolved");
            assert_eq!(attacks.value, StatValue::Int(6));
            assert_eq!(attacks.sources, vec!["Dacatarai".to_string()]);
        }
    }
}
