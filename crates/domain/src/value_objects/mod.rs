//! Value objects - Immutable objects defined by their attributes

mod condition;
mod modifier;
mod stat;
mod stat_value;

pub use condition::{ModifierCondition, UnitConditionState};
pub use modifier::{apply_modifiers, Modifier, ModifierOperation, ModifierScope};
pub use stat::StatKey;
pub use stat_value::StatValue;
