//! StatKey value object - identifies a modifiable statistic.
//!
//! Provides type safety for stat references instead of using magic strings
//! like "sv" or "bs". A modifier targets exactly one `StatKey`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// A modifiable unit or weapon statistic.
///
/// Unit-level keys: `m, t, sv, w, ld, oc`. Weapon-level keys add
/// `a, ws, bs, s, ap, d, range`. Serde names match the lowercase keys
/// used by the persisted catalog JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKey {
    /// Movement
    M,
    /// Toughness
    T,
    /// Save
    Sv,
    /// Wounds
    W,
    /// Leadership
    Ld,
    /// Objective Control
    Oc,
    /// Attacks
    A,
    /// Weapon Skill (melee)
    Ws,
    /// Ballistic Skill (ranged)
    Bs,
    /// Strength
    S,
    /// Armour Penetration
    Ap,
    /// Damage
    D,
    /// Range
    Range,
}

impl StatKey {
    /// Returns the short lowercase string representation (e.g., "sv", "oc").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M => "m",
            Self::T => "t",
            Self::Sv => "sv",
            Self::W => "w",
            Self::Ld => "ld",
            Self::Oc => "oc",
            Self::A => "a",
            Self::Ws => "ws",
            Self::Bs => "bs",
            Self::S => "s",
            Self::Ap => "ap",
            Self::D => "d",
            Self::Range => "range",
        }
    }

    /// Returns the full name of the stat (e.g., "Toughness").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::M => "Movement",
            Self::T => "Toughness",
            Self::Sv => "Save",
            Self::W => "Wounds",
            Self::Ld => "Leadership",
            Self::Oc => "Objective Control",
            Self::A => "Attacks",
            Self::Ws => "Weapon Skill",
            Self::Bs => "Ballistic Skill",
            Self::S => "Strength",
            Self::Ap => "Armour Penetration",
            Self::D => "Damage",
            Self::Range => "Range",
        }
    }

    /// True for the six unit-profile stats (M/T/SV/W/LD/OC).
    pub fn is_unit_stat(&self) -> bool {
        matches!(
            self,
            Self::M | Self::T | Self::Sv | Self::W | Self::Ld | Self::Oc
        )
    }

    /// True for the weapon-profile stats (A/WS/BS/S/AP/D/Range).
    pub fn is_weapon_stat(&self) -> bool {
        !self.is_unit_stat()
    }

    /// All unit-profile stats in datasheet order.
    pub fn unit_stats() -> [StatKey; 6] {
        [Self::M, Self::T, Self::Sv, Self::W, Self::Ld, Self::Oc]
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m" => Ok(Self::M),
            "t" => Ok(Self::T),
            "sv" => Ok(Self::Sv),
            "w" => Ok(Self::W),
            "ld" => Ok(Self::Ld),
            "oc" => Ok(Self::Oc),
            "a" => Ok(Self::A),
            "ws" => Ok(Self::Ws),
            "bs" => Ok(Self::Bs),
            "s" => Ok(Self::S),
            "ap" => Ok(Self::Ap),
            "d" => Ok(Self::D),
            "range" => Ok(Self::Range),
            other => Err(DomainError::parse(format!("unknown stat key: {other}"))),
        }
    }
}
