use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// List entry handles. Attachment references use these stable ids rather
// than positions in the roster's unit array, so reordering or removing
// unrelated units can never re-point an existing attachment.
define_id!(ListUnitId);

// Roster IDs
define_id!(RosterId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(ListUnitId::new(), ListUnitId::new());
    }

    #[test]
    fn id_uuid_roundtrip() {
        let id = ListUnitId::new();
        let uuid = id.to_uuid();
        assert_eq!(ListUnitId::from_uuid(uuid), id);
    }

    #[test]
    fn id_serde_roundtrip() {
        let id = RosterId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: RosterId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
