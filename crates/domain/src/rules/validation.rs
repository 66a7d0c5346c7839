//! List validation - the gate a list must pass before entering play mode.
//!
//! The validator returns every violation at once so the UI can enumerate
//! them, rather than surfacing one failure at a time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entities::{Enhancement, Roster, UnitCatalog};

use super::leadership::LeaderAttachmentEngine;

/// Maximum copies of one datasheet in a list ("rule of three").
const MAX_DATASHEET_COPIES: usize = 3;

/// Which check a validation error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationErrorKind {
    Points,
    Format,
    Leader,
    MaxModels,
}

/// A single user-facing list violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    #[serde(rename = "type")]
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn points(message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::Points, message)
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::Format, message)
    }

    pub fn leader(message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::Leader, message)
    }

    pub fn max_models(message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::MaxModels, message)
    }
}

/// Composes the leader-attachment scan with points-limit and format
/// checks. Any non-empty result blocks the transition into play mode.
pub struct RosterValidator<'a> {
    catalog: &'a UnitCatalog,
    roster: &'a Roster,
    enhancements: &'a [Enhancement],
}

impl<'a> RosterValidator<'a> {
    pub fn new(
        catalog: &'a UnitCatalog,
        roster: &'a Roster,
        enhancements: &'a [Enhancement],
    ) -> Self {
        Self {
            catalog,
            roster,
            enhancements,
        }
    }

    /// Run every check and collect all violations.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        self.check_points_and_sizes(&mut errors);
        self.check_format(&mut errors);
        errors.extend(
            LeaderAttachmentEngine::new(self.catalog, self.roster).validate_leader_attachments(),
        );
        errors
    }

    /// Total cost of the list. Entries with an illegal model count or an
    /// unknown datasheet contribute nothing.
    pub fn total_points(&self) -> u32 {
        let mut total = 0;
        for entry in self.roster.units() {
            if let Some(unit) = self.catalog.get(&entry.unit_id) {
                total += unit.points_for(entry.model_count).unwrap_or(0);
            }
            if let Some(enhancement) = self.enhancement(entry.enhancement_id.as_deref()) {
                total += enhancement.points;
            }
        }
        total
    }

    fn enhancement(&self, id: Option<&str>) -> Option<&Enhancement> {
        let id = id?;
        self.enhancements.iter().find(|e| e.id == id)
    }

    fn check_points_and_sizes(&self, errors: &mut Vec<ValidationError>) {
        for entry in self.roster.units() {
            // unknown datasheets are a transient editing state, not an error
            let Some(unit) = self.catalog.get(&entry.unit_id) else {
                continue;
            };
            if !unit.points.is_empty() && unit.points_for(entry.model_count).is_none() {
                let sizes: Vec<String> = unit
                    .allowed_model_counts()
                    .map(|n| n.to_string())
                    .collect();
                errors.push(ValidationError::max_models(format!(
                    "{} cannot be taken with {} models (allowed sizes: {})",
                    unit.name,
                    entry.model_count,
                    sizes.join(", ")
                )));
            }
        }

        let total = self.total_points();
        if total > self.roster.points_limit() {
            errors.push(ValidationError::points(format!(
                "list total {total} pts exceeds the {} pts limit",
                self.roster.points_limit()
            )));
        }
    }

    fn check_format(&self, errors: &mut Vec<ValidationError>) {
        let mut datasheet_counts: HashMap<&str, usize> = HashMap::new();
        let mut enhancement_uses: HashMap<&str, usize> = HashMap::new();

        for entry in self.roster.units() {
            *datasheet_counts.entry(entry.unit_id.as_str()).or_default() += 1;

            let Some(enhancement_id) = entry.enhancement_id.as_deref() else {
                continue;
            };
            *enhancement_uses.entry(enhancement_id).or_default() += 1;

            let enhancement_name = self
                .enhancement(Some(enhancement_id))
                .map(|e| e.name.as_str())
                .unwrap_or(enhancement_id);
            if let Some(unit) = self.catalog.get(&entry.unit_id) {
                if !unit.is_character() {
                    errors.push(ValidationError::format(format!(
                        "{enhancement_name} can only be given to a Character ({} is not one)",
                        unit.name
                    )));
                }
            }
        }

        for (unit_id, count) in datasheet_counts {
            if count > MAX_DATASHEET_COPIES {
                let name = self
                    .catalog
                    .get(unit_id)
                    .map(|u| u.name.as_str())
                    .unwrap_or(unit_id);
                errors.push(ValidationError::format(format!(
                    "{name} appears {count} times; a list may include at most {MAX_DATASHEET_COPIES} copies of the same datasheet"
                )));
            }
        }

        for (enhancement_id, count) in enhancement_uses {
            if count > 1 {
                let name = self
                    .enhancement(Some(enhancement_id))
                    .map(|e| e.name.as_str())
                    .unwrap_or(enhancement_id);
                errors.push(ValidationError::format(format!(
                    "{name} is taken {count} times; each enhancement may be taken once"
                )));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Unit;
    use crate::ids::ListUnitId;

    fn catalog() -> UnitCatalog {
        let units: Vec<Unit> = serde_json::from_value(serde_json::json!([
            {
                "id": "custodian-guard",
                "name": "Custodian Guard",
                "points": {"4": 170, "5": 215},
                "stats": {"w": 3},
                "keywords": ["Infantry"]
            },
            {
                "id": "shield-captain",
                "name": "Shield-Captain",
                "points": {"1": 130},
                "stats": {"w": 6},
                "abilities": [{
                    "id": "leader",
                    "name": "Leader",
                    "eligibleUnits": ["custodian-guard"]
                }],
                "keywords": ["Character"]
            }
        ]))
        .unwrap();
        UnitCatalog::new(units)
    }

    fn enhancements() -> Vec<Enhancement> {
        vec![Enhancement {
            id: "auric-mantle".to_string(),
            name: "Auric Mantle".to_string(),
            points: 20,
            description: String::new(),
            modifiers: vec![],
        }]
    }

    #[test]
    fn clean_list_passes() {
        let catalog = catalog();
        let enhancements = enhancements();
        let mut roster = Roster::new("Talons", 2000);
        let guard = roster.add_unit("custodian-guard", 4);
        let captain = roster.add_unit("shield-captain", 1);
        roster.set_attached_leader(guard, Some(captain));

        let validator = RosterValidator::new(&catalog, &roster, &enhancements);
        assert_eq!(validator.total_points(), 300);
        assert!(validator.validate().is_empty());
    }

    #[test]
    fn enhancement_points_count_toward_total() {
        let catalog = catalog();
        let enhancements = enhancements();
        let mut roster = Roster::new("Talons", 2000);
        let captain = roster.add_unit("shield-captain", 1);
        roster
            .unit_mut(captain)
            .expect("captain exists")
            .enhancement_id = Some("auric-mantle".to_string());

        let validator = RosterValidator::new(&catalog, &roster, &enhancements);
        assert_eq!(validator.total_points(), 150);
    }

    #[test]
    fn over_limit_list_reports_points_error() {
        let catalog = catalog();
        let enhancements = enhancements();
        let mut roster = Roster::new("Patrol", 300);
        roster.add_unit("custodian-guard", 4);
        roster.add_unit("shield-captain", 1);

        let validator = RosterValidator::new(&catalog, &roster, &enhancements);
        let errors = validator.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::Points);
        assert!(errors[0].message.contains("300"));
    }

    #[test]
    fn illegal_model_count_reports_max_models() {
        let catalog = catalog();
        let enhancements = enhancements();
        let mut roster = Roster::new("Talons", 2000);
        roster.add_unit("custodian-guard", 7);

        let validator = RosterValidator::new(&catalog, &roster, &enhancements);
        let errors = validator.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::MaxModels);
        assert!(errors[0].message.contains("7 models"));
        // illegal sizes contribute nothing to the total
        assert_eq!(validator.total_points(), 0);
    }

    #[test]
    fn rule_of_three_reports_format_error() {
        let catalog = catalog();
        let enhancements = enhancements();
        let mut roster = Roster::new("Talons", 5000);
        for _ in 0..4 {
            roster.add_unit("custodian-guard", 4);
        }

        let validator = RosterValidator::new(&catalog, &roster, &enhancements);
        let errors = validator.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::Format);
        assert!(errors[0].message.contains("4 times"));
    }

    #[test]
    fn enhancement_on_non_character_reports_format_error() {
        let catalog = catalog();
        let enhancements = enhancements();
        let mut roster = Roster::new("Talons", 2000);
        let guard = roster.add_unit("custodian-guard", 4);
        roster.unit_mut(guard).expect("guard exists").enhancement_id =
            Some("auric-mantle".to_string());

        let validator = RosterValidator::new(&catalog, &roster, &enhancements);
        let errors = validator.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::Format);
        assert!(errors[0].message.contains("Character"));
    }

    #[test]
    fn duplicate_enhancement_reports_format_error() {
        let catalog = catalog();
        let enhancements = enhancements();
        let mut roster = Roster::new("Talons", 2000);
        for _ in 0..2 {
            let captain = roster.add_unit("shield-captain", 1);
            roster
                .unit_mut(captain)
                .expect("captain exists")
                .enhancement_id = Some("auric-mantle".to_string());
        }

        let validator = RosterValidator::new(&catalog, &roster, &enhancements);
        let errors = validator.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Auric Mantle"));
        assert!(errors[0].message.contains("2 times"));
    }

    #[test]
    fn all_violations_are_reported_at_once() {
        let catalog = catalog();
        let enhancements = enhancements();
        let mut roster = Roster::new("Patrol", 100);
        let guard = roster.add_unit("custodian-guard", 4);
        roster
            .unit_mut(guard)
            .expect("guard exists")
            .attached_leader = Some(ListUnitId::new());

        let validator = RosterValidator::new(&catalog, &roster, &enhancements);
        let errors = validator.validate();
        let kinds: Vec<ValidationErrorKind> = errors.iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&ValidationErrorKind::Points));
        assert!(kinds.contains(&ValidationErrorKind::Leader));
    }

    #[test]
    fn error_kind_serializes_like_the_ui_expects() {
        let error = ValidationError::max_models("too many");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["type"], "maxModels");
        assert_eq!(json["message"], "too many");
        let leader = ValidationError::leader("x");
        assert_eq!(
            serde_json::to_value(&leader).unwrap()["type"],
            "leader"
        );
    }
}
