//! Roster aggregate - a saved army list and its placed units.
//!
//! # Invariants
//!
//! - Entries are addressed by stable `ListUnitId` handles minted at
//!   insertion. Reordering or removing unrelated units never re-points
//!   an existing `attached_leader` reference.
//! - Removing an entry clears any `attached_leader` reference to it.
//! - Everything else about attachments (host eligibility, no leader
//!   shared between hosts) is *validated*, not enforced here: see
//!   `rules::leadership`. The roster is deliberately a dumb store so the
//!   engine stays side-effect-free over it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ids::{ListUnitId, RosterId};
use crate::value_objects::UnitConditionState;

use super::unit::Unit;

/// A placed instance of a catalog unit inside a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterUnit {
    /// Stable handle minted when the unit is added to the list.
    #[serde(default)]
    pub id: ListUnitId,
    /// Catalog id of the underlying datasheet.
    pub unit_id: String,
    pub model_count: u32,
    /// Chosen enhancement id, if any (Characters only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhancement_id: Option<String>,
    /// Weapon id -> how many models carry it.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub weapon_counts: HashMap<String, u32>,
    /// Remaining wounds across the unit. `None` means undamaged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_wounds: Option<u32>,
    /// Remaining wounds of an attached leader, tracked separately.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_current_wounds: Option<u32>,
    /// The list entry currently leading this unit, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attached_leader: Option<ListUnitId>,
}

impl RosterUnit {
    pub fn new(unit_id: impl Into<String>, model_count: u32) -> Self {
        Self {
            id: ListUnitId::new(),
            unit_id: unit_id.into(),
            model_count,
            enhancement_id: None,
            weapon_counts: HashMap::new(),
            current_wounds: None,
            leader_current_wounds: None,
            attached_leader: None,
        }
    }

    /// The wound/model state used for condition evaluation, derived
    /// against this entry's catalog datasheet.
    pub fn condition_state(&self, unit: &Unit) -> UnitConditionState {
        let wounds_per_model = unit
            .stats
            .w
            .as_ref()
            .and_then(|w| w.as_int())
            .map(|w| w.max(1) as u32)
            .unwrap_or(1);
        UnitConditionState::new(self.model_count, wounds_per_model, self.current_wounds)
    }
}

/// A saved army list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roster {
    #[serde(default)]
    id: RosterId,
    name: String,
    points_limit: u32,
    #[serde(default)]
    units: Vec<RosterUnit>,
}

impl Roster {
    pub fn new(name: impl Into<String>, points_limit: u32) -> Self {
        Self {
            id: RosterId::new(),
            name: name.into(),
            points_limit,
            units: Vec::new(),
        }
    }

    pub fn id(&self) -> RosterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points_limit(&self) -> u32 {
        self.points_limit
    }

    pub fn units(&self) -> &[RosterUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn unit(&self, id: ListUnitId) -> Option<&RosterUnit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: ListUnitId) -> Option<&mut RosterUnit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    /// Add a unit to the list, returning the minted handle.
    pub fn add_unit(&mut self, unit_id: impl Into<String>, model_count: u32) -> ListUnitId {
        let unit = RosterUnit::new(unit_id, model_count);
        let id = unit.id;
        self.units.push(unit);
        id
    }

    /// Remove a unit. Clears any attachment referencing the removed
    /// entry, so no dangling leader references survive the removal.
    pub fn remove_unit(&mut self, id: ListUnitId) -> Option<RosterUnit> {
        let index = self.units.iter().position(|u| u.id == id)?;
        let removed = self.units.remove(index);
        for unit in &mut self.units {
            if unit.attached_leader == Some(id) {
                unit.attached_leader = None;
                unit.leader_current_wounds = None;
            }
        }
        Some(removed)
    }

    /// Set or clear the attached leader on a host entry. This is the
    /// mutation hook the attachment engine's callbacks are wired to;
    /// legality is the engine's concern, not the roster's.
    ///
    /// Returns false if the host entry does not exist.
    pub fn set_attached_leader(&mut self, host: ListUnitId, leader: Option<ListUnitId>) -> bool {
        match self.unit_mut(host) {
            Some(unit) => {
                unit.attached_leader = leader;
                if leader.is_none() {
                    unit.leader_current_wounds = None;
                }
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::StatValue;

    fn two_unit_roster() -> (Roster, ListUnitId, ListUnitId) {
        let mut roster = Roster::new("Talons of the Emperor", 2000);
        let guard = roster.add_unit("custodian-guard", 4);
        let captain = roster.add_unit("shield-captain", 1);
        (roster, guard, captain)
    }

    #[test]
    fn add_and_lookup_by_handle() {
        let (roster, guard, captain) = two_unit_roster();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.unit(guard).map(|u| u.unit_id.as_str()), Some("custodian-guard"));
        assert_ne!(guard, captain);
        assert!(roster.unit(ListUnitId::new()).is_none());
    }

    #[test]
    fn removal_clears_attachments_to_removed_entry() {
        let (mut roster, guard, captain) = two_unit_roster();
        assert!(roster.set_attached_leader(guard, Some(captain)));

        roster.remove_unit(captain);
        assert_eq!(roster.unit(guard).and_then(|u| u.attached_leader), None);
    }

    #[test]
    fn removing_unrelated_unit_keeps_attachment_valid() {
        let (mut roster, guard, captain) = two_unit_roster();
        let extra = roster.add_unit("witchseekers", 5);
        roster.set_attached_leader(guard, Some(captain));

        // With index-addressed references this would have silently
        // re-pointed the attachment; stable handles keep it intact.
        roster.remove_unit(extra);
        assert_eq!(
            roster.unit(guard).and_then(|u| u.attached_leader),
            Some(captain)
        );
    }

    #[test]
    fn detach_clears_leader_wounds() {
        let (mut roster, guard, captain) = two_unit_roster();
        roster.set_attached_leader(guard, Some(captain));
        roster
            .unit_mut(guard)
            .expect("host exists")
            .leader_current_wounds = Some(3);

        roster.set_attached_leader(guard, None);
        let host = roster.unit(guard).expect("host exists");
        assert_eq!(host.attached_leader, None);
        assert_eq!(host.leader_current_wounds, None);
    }

    #[test]
    fn condition_state_uses_datasheet_wounds() {
        let unit: Unit = serde_json::from_value(serde_json::json!({
            "id": "custodian-guard",
            "name": "Custodian Guard",
            "stats": {"w": 3}
        }))
        .unwrap();
        assert_eq!(unit.stats.w, Some(StatValue::Int(3)));

        let mut entry = RosterUnit::new("custodian-guard", 4);
        entry.current_wounds = Some(7);
        // 7 wounds at 3 per model = 3 models left
        let state = entry.condition_state(&unit);
        assert_eq!(state.current_models(), 3);
        assert!(state.is_below_starting_strength());
    }

    #[test]
    fn serde_roundtrip_preserves_handles() {
        let (mut roster, guard, captain) = two_unit_roster();
        roster.set_attached_leader(guard, Some(captain));

        let json = serde_json::to_string(&roster).unwrap();
        let back: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(back, roster);
        assert_eq!(
            back.unit(guard).and_then(|u| u.attached_leader),
            Some(captain)
        );
    }
}
