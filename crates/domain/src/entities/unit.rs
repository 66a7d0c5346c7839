//! Catalog data model - units, weapons, and abilities.
//!
//! This is the immutable reference data the army catalog loader supplies,
//! shaped to round-trip the faction JSON produced by the BSData importer.
//! The engine only ever borrows it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::value_objects::{StatKey, StatValue};

/// Keyword that marks a unit as a Character (and thus a potential leader,
/// never a host).
const CHARACTER_KEYWORD: &str = "character";

/// Ability id/name identifying the Leader ability.
const LEADER_ABILITY_ID: &str = "leader";
const LEADER_ABILITY_NAME: &str = "Leader";

/// Unit-profile stat line (M/T/SV/W/LD/OC).
///
/// Values mirror the printed datasheet: mostly integers, with save-style
/// strings like `"2+"` for SV. Absent entries deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sv: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ld: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oc: Option<StatValue>,
}

impl UnitStats {
    /// Look up a stat by key. Weapon-profile keys return `None`.
    pub fn get(&self, key: StatKey) -> Option<&StatValue> {
        match key {
            StatKey::M => self.m.as_ref(),
            StatKey::T => self.t.as_ref(),
            StatKey::Sv => self.sv.as_ref(),
            StatKey::W => self.w.as_ref(),
            StatKey::Ld => self.ld.as_ref(),
            StatKey::Oc => self.oc.as_ref(),
            _ => None,
        }
    }
}

/// Weapon-profile stat line. Melee weapons use `ws` and carry no `range`;
/// ranged weapons use `bs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bs: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ap: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<StatValue>,
}

impl WeaponStats {
    /// Look up a stat by key. Unit-profile keys return `None`.
    pub fn get(&self, key: StatKey) -> Option<&StatValue> {
        match key {
            StatKey::Range => self.range.as_ref(),
            StatKey::A => self.a.as_ref(),
            StatKey::Ws => self.ws.as_ref(),
            StatKey::Bs => self.bs.as_ref(),
            StatKey::S => self.s.as_ref(),
            StatKey::Ap => self.ap.as_ref(),
            StatKey::D => self.d.as_ref(),
            _ => None,
        }
    }
}

/// Whether a weapon is used in melee or at range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    Melee,
    Ranged,
}

/// A weapon profile on a datasheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub id: String,
    pub name: String,
    /// Serialized as `"type": "melee" | "ranged"` in the catalog JSON.
    #[serde(rename = "type")]
    pub kind: WeaponKind,
    pub stats: WeaponStats,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub abilities: Vec<Ability>,
}

impl Weapon {
    pub fn is_melee(&self) -> bool {
        self.kind == WeaponKind::Melee
    }

    pub fn is_ranged(&self) -> bool {
        self.kind == WeaponKind::Ranged
    }
}

/// A unit or weapon ability. Only the Leader ability carries
/// `eligible_units`: the whitelist of unit ids it may attach to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub eligible_units: Vec<String>,
}

impl Ability {
    pub fn is_leader(&self) -> bool {
        self.id == LEADER_ABILITY_ID || self.name == LEADER_ABILITY_NAME
    }
}

/// Static datasheet for one unit. Owned by the army catalog, loaded once
/// per session, never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub name: String,
    /// Allowed model count -> points cost, e.g. `{4: 170, 5: 215}`.
    #[serde(default)]
    pub points: BTreeMap<u32, u32>,
    #[serde(default)]
    pub stats: UnitStats,
    /// Invulnerable save, e.g. `"4+"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invuln: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weapons: Vec<Weapon>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub abilities: Vec<Ability>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl Unit {
    /// True if the datasheet carries the Character keyword
    /// (case-insensitive). Characters may lead; they never host a leader.
    pub fn is_character(&self) -> bool {
        self.keywords
            .iter()
            .any(|k| k.eq_ignore_ascii_case(CHARACTER_KEYWORD))
    }

    /// The Leader ability, if this unit can be attached to a host unit.
    pub fn leader_ability(&self) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.is_leader())
    }

    pub fn has_leader_ability(&self) -> bool {
        self.leader_ability().is_some()
    }

    /// True if this unit's Leader ability lists `unit_id` as attachable.
    pub fn can_lead(&self, unit_id: &str) -> bool {
        self.leader_ability()
            .is_some_and(|a| a.eligible_units.iter().any(|u| u == unit_id))
    }

    /// Points cost at the given model count, if that count is a legal size.
    pub fn points_for(&self, model_count: u32) -> Option<u32> {
        self.points.get(&model_count).copied()
    }

    /// Legal unit sizes in ascending order.
    pub fn allowed_model_counts(&self) -> impl Iterator<Item = u32> + '_ {
        self.points.keys().copied()
    }

    pub fn weapon(&self, weapon_id: &str) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.id == weapon_id)
    }
}

/// The army catalog: id-keyed lookup over the faction's datasheets.
///
/// Every engine entry point tolerates a missing or empty catalog by
/// returning safe defaults rather than erroring - a unit can be looked
/// up mid-removal while the surrounding app is still editing the list.
#[derive(Debug, Clone, Default)]
pub struct UnitCatalog {
    units: HashMap<String, Unit>,
}

impl UnitCatalog {
    pub fn new(units: Vec<Unit>) -> Self {
        Self {
            units: units.into_iter().map(|u| (u.id.clone(), u)).collect(),
        }
    }

    pub fn get(&self, unit_id: &str) -> Option<&Unit> {
        self.units.get(unit_id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }
}
