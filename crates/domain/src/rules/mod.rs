//! Rules engine - modifier collection, stat resolution, leader
//! attachment, and list validation.
//!
//! Everything here is synchronous, pure computation over borrowed
//! catalog/roster data. Mutation happens only through caller-supplied
//! hooks, never inside the engine.

mod collection;
mod leadership;
mod resolution;
mod validation;

pub use collection::{collect_unit_modifiers, collect_weapon_modifiers};
pub use leadership::{AttachError, LeaderAttachmentEngine};
pub use resolution::{
    resolve_unit_profile, resolve_unit_stat, resolve_weapon_profile, resolve_weapon_stat,
    ResolvedStat,
};
pub use validation::{RosterValidator, ValidationError, ValidationErrorKind};
