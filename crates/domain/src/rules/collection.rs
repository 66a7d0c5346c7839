//! Modifier collection - gathers the modifiers relevant to one stat query.
//!
//! Sources are visited in the fixed priority order `ActiveSources`
//! defines; within a source, modifiers keep their declared order. The
//! resulting list is exactly what `apply_modifiers` later folds, so this
//! ordering determines final values whenever `set`/`multiply` mix with
//! `add`/`subtract`.

use crate::entities::{ActiveSources, WeaponKind};
use crate::value_objects::{Modifier, ModifierScope, StatKey, UnitConditionState};

/// Modifiers affecting a unit-profile stat (M/T/SV/W/LD/OC).
///
/// Accepts `model`/`unit` scopes only. Each surviving modifier is tagged
/// with its source's display name for UI attribution.
pub fn collect_unit_modifiers(
    sources: &ActiveSources<'_>,
    stat: StatKey,
    state: &UnitConditionState,
) -> Vec<Modifier> {
    collect(sources, stat, state, ModifierScope::applies_to_unit)
}

/// Modifiers affecting one weapon's stat (A/WS/BS/S/AP/D/Range).
///
/// `melee`-scoped modifiers never reach a ranged weapon and vice versa;
/// `weapon`/`all` reach both.
pub fn collect_weapon_modifiers(
    sources: &ActiveSources<'_>,
    stat: StatKey,
    kind: WeaponKind,
    state: &UnitConditionState,
) -> Vec<Modifier> {
    let scope_matches = match kind {
        WeaponKind::Melee => ModifierScope::applies_to_melee_weapon,
        WeaponKind::Ranged => ModifierScope::applies_to_ranged_weapon,
    };
    collect(sources, stat, state, scope_matches)
}

fn collect(
    sources: &ActiveSources<'_>,
    stat: StatKey,
    state: &UnitConditionState,
    scope_matches: impl Fn(ModifierScope) -> bool,
) -> Vec<Modifier> {
    let mut collected = Vec::new();
    for source in sources.in_priority_order() {
        for modifier in source.modifiers() {
            if modifier.stat != stat {
                continue;
            }
            if !modifier.condition.evaluate(state) {
                continue;
            }
            if !scope_matches(modifier.scope) {
                continue;
            }
            collected.push(modifier.clone().with_source(source.name()));
        }
    }
    collected
}
