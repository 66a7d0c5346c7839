//! Warboard domain - rule-effect computation and list-integrity
//! validation for the army-list builder.
//!
//! The crate is pure, synchronous computation: it borrows the army
//! catalog and the roster, and returns fresh results. It owns no state
//! and performs no I/O; persistence, transport, and rendering live in
//! the surrounding application. Export consumers must take resolved
//! stat values from [`rules`] rather than reimplementing modifier
//! logic.

pub mod entities;
pub mod error;
pub mod ids;
pub mod rules;
pub mod value_objects;

pub use error::DomainError;

// Re-export ID types
pub use ids::{ListUnitId, RosterId};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    apply_modifiers, Modifier, ModifierCondition, ModifierOperation, ModifierScope, StatKey,
    StatValue, UnitConditionState,
};

// Re-export entities (explicit list in entities/mod.rs)
pub use entities::{
    Ability, ActiveSources, ArmyRuleStance, DetachmentRule, DetachmentRuleChoice, Enhancement,
    HasModifiers, MissionTwist, Roster, RosterUnit, Stratagem, Unit, UnitCatalog, UnitStats,
    UsageLimit, Weapon, WeaponKind, WeaponStats,
};

// Re-export the rules engine
pub use rules::{
    collect_unit_modifiers, collect_weapon_modifiers, resolve_unit_profile, resolve_unit_stat,
    resolve_weapon_profile, resolve_weapon_stat, AttachError, LeaderAttachmentEngine,
    ResolvedStat, RosterValidator, ValidationError, ValidationErrorKind,
};
