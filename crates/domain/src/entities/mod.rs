//! Entities - catalog reference data, rule-effect sources, and the roster

mod roster;
mod sources;
mod unit;

pub use roster::{Roster, RosterUnit};
pub use sources::{
    ActiveSources, ArmyRuleStance, DetachmentRule, DetachmentRuleChoice, Enhancement,
    HasModifiers, MissionTwist, Stratagem, UsageLimit,
};
pub use unit::{Ability, Unit, UnitCatalog, UnitStats, Weapon, WeaponKind, WeaponStats};
