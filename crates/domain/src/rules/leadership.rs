//! Leader attachment engine - eligibility, attach/detach legality, and
//! list-wide consistency checking.
//!
//! The engine computes whether a mutation is legal; it never mutates the
//! roster itself. On a successful attach/detach it delegates to a
//! caller-supplied hook, which the host application wires to its own
//! state-update mechanism (`Roster::set_attached_leader` in the simplest
//! case). This keeps the engine trivially testable without a real store.

use thiserror::Error;

use crate::entities::{Roster, RosterUnit, Unit, UnitCatalog};
use crate::ids::ListUnitId;

use super::validation::{ValidationError, ValidationErrorKind};

/// Why an attach request was rejected. Messages are user-facing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AttachError {
    #[error("target unit is no longer in the list")]
    HostNotFound,

    #[error("leader unit is no longer in the list")]
    LeaderNotFound,

    #[error("unknown unit '{unit_id}' in the army catalog")]
    UnknownUnit { unit_id: String },

    #[error("a unit cannot lead itself")]
    SelfAttachment,

    #[error("{name} is a Character and cannot have a leader attached")]
    HostIsCharacter { name: String },

    #[error("{name} does not have the Leader ability")]
    NotALeader { name: String },

    #[error("{leader} cannot attach to {host}")]
    NotEligible { leader: String, host: String },

    #[error("{host} already has a leader attached")]
    AlreadyLed { host: String },
}

/// Read-only view over one roster and its catalog.
#[derive(Clone, Copy)]
pub struct LeaderAttachmentEngine<'a> {
    catalog: &'a UnitCatalog,
    roster: &'a Roster,
}

impl<'a> LeaderAttachmentEngine<'a> {
    pub fn new(catalog: &'a UnitCatalog, roster: &'a Roster) -> Self {
        Self { catalog, roster }
    }

    fn entry(&self, id: ListUnitId) -> Option<(&'a RosterUnit, &'a Unit)> {
        let entry = self.roster.unit(id)?;
        let unit = self.catalog.get(&entry.unit_id)?;
        Some((entry, unit))
    }

    /// True iff the list entry's datasheet carries the Leader ability.
    /// False for unknown handles or catalog gaps; never panics.
    pub fn is_leader_unit(&self, id: ListUnitId) -> bool {
        self.entry(id).is_some_and(|(_, unit)| unit.has_leader_ability())
    }

    /// Every list entry that could be attached to `host` right now:
    /// carries the Leader ability, lists the host's datasheet as
    /// eligible, and is not already leading a *different* unit.
    ///
    /// Empty for Character hosts and unknown handles.
    pub fn available_leaders(&self, host: ListUnitId) -> Vec<ListUnitId> {
        let Some((host_entry, host_unit)) = self.entry(host) else {
            return Vec::new();
        };
        if host_unit.is_character() {
            return Vec::new();
        }
        self.roster
            .units()
            .iter()
            .filter(|candidate| candidate.id != host)
            .filter(|candidate| {
                self.catalog
                    .get(&candidate.unit_id)
                    .is_some_and(|unit| unit.can_lead(&host_entry.unit_id))
            })
            .filter(|candidate| {
                // leading this host already is fine; leading another is not
                self.attached_to_unit(candidate.id)
                    .map_or(true, |led| led == host)
            })
            .map(|candidate| candidate.id)
            .collect()
    }

    /// Existence check: a non-Character host with at least one available
    /// leader. Does not require an attachment to exist yet.
    pub fn can_have_leader_attached(&self, host: ListUnitId) -> bool {
        !self.available_leaders(host).is_empty()
    }

    /// The leader attached to `host`, if any.
    pub fn attached_leader(&self, host: ListUnitId) -> Option<ListUnitId> {
        self.roster.unit(host)?.attached_leader
    }

    /// The host the given leader is attached to, if any. O(n) reverse scan.
    pub fn attached_to_unit(&self, leader: ListUnitId) -> Option<ListUnitId> {
        self.roster
            .units()
            .iter()
            .find(|entry| entry.attached_leader == Some(leader))
            .map(|entry| entry.id)
    }

    /// Is `attach_leader(host, leader)` legal right now? Checks run in a
    /// fixed order and the first failure wins. No state is touched.
    pub fn check_attach(&self, host: ListUnitId, leader: ListUnitId) -> Result<(), AttachError> {
        let host_entry = self.roster.unit(host).ok_or(AttachError::HostNotFound)?;
        let leader_entry = self.roster.unit(leader).ok_or(AttachError::LeaderNotFound)?;
        if host == leader {
            return Err(AttachError::SelfAttachment);
        }
        let host_unit = self
            .catalog
            .get(&host_entry.unit_id)
            .ok_or_else(|| AttachError::UnknownUnit {
                unit_id: host_entry.unit_id.clone(),
            })?;
        let leader_unit =
            self.catalog
                .get(&leader_entry.unit_id)
                .ok_or_else(|| AttachError::UnknownUnit {
                    unit_id: leader_entry.unit_id.clone(),
                })?;
        if host_unit.is_character() {
            return Err(AttachError::HostIsCharacter {
                name: host_unit.name.clone(),
            });
        }
        if !leader_unit.has_leader_ability() {
            return Err(AttachError::NotALeader {
                name: leader_unit.name.clone(),
            });
        }
        if !leader_unit.can_lead(&host_entry.unit_id) {
            return Err(AttachError::NotEligible {
                leader: leader_unit.name.clone(),
                host: host_unit.name.clone(),
            });
        }
        if host_entry
            .attached_leader
            .is_some_and(|current| current != leader)
        {
            return Err(AttachError::AlreadyLed {
                host: host_unit.name.clone(),
            });
        }
        Ok(())
    }

    /// Validate and, on success, delegate the mutation to `on_attach`.
    ///
    /// Non-transactional by design: if `leader` is already attached to a
    /// different host, this does NOT detach it first. The caller owns
    /// that detach, and a missed one surfaces through
    /// [`validate_leader_attachments`](Self::validate_leader_attachments)
    /// rather than being silently repaired here.
    pub fn attach_leader<F>(
        &self,
        host: ListUnitId,
        leader: ListUnitId,
        on_attach: F,
    ) -> Result<(), AttachError>
    where
        F: FnOnce(ListUnitId, ListUnitId),
    {
        self.check_attach(host, leader)?;
        on_attach(host, leader);
        Ok(())
    }

    /// Delegate a detach to `on_detach`. Unconditional: removing a
    /// relationship cannot violate any list invariant.
    pub fn detach_leader<F>(&self, host: ListUnitId, on_detach: F)
    where
        F: FnOnce(ListUnitId),
    {
        on_detach(host);
    }

    /// Full O(n) consistency scan over every `attached_leader` reference.
    ///
    /// Produces one error per broken reference (dangling handle, leader
    /// missing from the catalog, leader without the Leader ability,
    /// ineligible host) and one aggregate error per leader attached to
    /// multiple hosts at once.
    pub fn validate_leader_attachments(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut host_counts: Vec<(ListUnitId, u32)> = Vec::new();

        for host_entry in self.roster.units() {
            let Some(leader_id) = host_entry.attached_leader else {
                continue;
            };

            match host_counts.iter_mut().find(|(id, _)| *id == leader_id) {
                Some((_, count)) => *count += 1,
                None => host_counts.push((leader_id, 1)),
            }

            let host_name = self
                .catalog
                .get(&host_entry.unit_id)
                .map(|u| u.name.as_str())
                .unwrap_or(host_entry.unit_id.as_str());

            let Some(leader_entry) = self.roster.unit(leader_id) else {
                errors.push(ValidationError::leader(format!(
                    "{host_name} references a leader that is no longer in the list"
                )));
                continue;
            };
            let Some(leader_unit) = self.catalog.get(&leader_entry.unit_id) else {
                errors.push(ValidationError::leader(format!(
                    "{host_name} is led by unknown unit '{}'",
                    leader_entry.unit_id
                )));
                continue;
            };
            if !leader_unit.has_leader_ability() {
                errors.push(ValidationError::leader(format!(
                    "{} is attached to {host_name} but does not have the Leader ability",
                    leader_unit.name
                )));
                continue;
            }
            if !leader_unit.can_lead(&host_entry.unit_id) {
                errors.push(ValidationError::leader(format!(
                    "{} cannot attach to {host_name}",
                    leader_unit.name
                )));
            }
        }

        for (leader_id, count) in host_counts {
            if count > 1 {
                let name = self
                    .roster
                    .unit(leader_id)
                    .and_then(|entry| self.catalog.get(&entry.unit_id))
                    .map(|unit| unit.name.clone())
                    .unwrap_or_else(|| leader_id.to_string());
                errors.push(ValidationError::new(
                    ValidationErrorKind::Leader,
                    format!("{name} is attached to multiple units ({count})"),
                ));
            }
        }

        errors
    }
}
