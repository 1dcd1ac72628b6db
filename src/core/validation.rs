//! Authoring rules checked before a save is accepted.

use crate::models::{HolidayRecord, OwnerRef, OwnerType};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorKind {
    #[error("name is empty")]
    EmptyName,
    #[error("start date is missing")]
    MissingStartDate,
    #[error("end date is missing for a period")]
    MissingEndDate,
    #[error("end date is before start date")]
    EndBeforeStart,
    #[error("store holidays cannot cascade to children")]
    ApplyChildOnStore,
}

/// One violation, pointing at the offending row of the submitted set.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("row {row} '{name}': {kind}")]
pub struct ValidationError {
    pub row: usize,
    pub name: String,
    pub kind: ValidationErrorKind,
}

pub struct ValidationGate;

impl ValidationGate {
    /// Check every row owned by `owner` and report all violations.
    /// Rows owned by someone else are read-only here and skipped.
    pub fn validate(owner: OwnerRef, drafts: &[HolidayRecord]) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (row, h) in drafts.iter().enumerate() {
            if h.owner() != owner {
                continue;
            }

            let mut push = |kind| {
                errors.push(ValidationError {
                    row,
                    name: h.name.clone(),
                    kind,
                })
            };

            if h.name.trim().is_empty() {
                push(ValidationErrorKind::EmptyName);
            }

            if h.start_date.is_none() {
                push(ValidationErrorKind::MissingStartDate);
            }

            if h.has_period {
                match (h.start_date, h.end_date) {
                    (_, None) => push(ValidationErrorKind::MissingEndDate),
                    (Some(start), Some(end)) if end < start => {
                        push(ValidationErrorKind::EndBeforeStart)
                    }
                    _ => {}
                }
            }

            if h.owner_type == OwnerType::Store && !h.apply_child_types.is_empty() {
                push(ValidationErrorKind::ApplyChildOnStore);
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApplyChildType;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn valid_rows_pass() {
        let owner = OwnerRef::head_office(1);
        let rows = vec![
            HolidayRecord::new(owner, 2025, "창립기념일", d("2025-05-10")),
            HolidayRecord::new(owner, 2025, "여름휴가", d("2025-08-01")).with_period(d("2025-08-01")),
        ];
        assert!(ValidationGate::validate(owner, &rows).is_empty());
    }

    #[test]
    fn collects_every_violation_in_order() {
        let owner = OwnerRef::store(10);
        let mut no_start = HolidayRecord::new(owner, 2025, "", d("2025-01-01"));
        no_start.start_date = None;
        let backwards = HolidayRecord::new(owner, 2025, "역순", d("2025-03-10")).with_period(d("2025-03-01"));
        let cascading = HolidayRecord::new(owner, 2025, "전파", d("2025-04-01"))
            .applying_to(&[ApplyChildType::AllHeadOfficeStores]);

        let errors = ValidationGate::validate(owner, &[no_start, backwards, cascading]);
        let kinds: Vec<(usize, ValidationErrorKind)> = errors.iter().map(|e| (e.row, e.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (0, ValidationErrorKind::EmptyName),
                (0, ValidationErrorKind::MissingStartDate),
                (1, ValidationErrorKind::EndBeforeStart),
                (2, ValidationErrorKind::ApplyChildOnStore),
            ]
        );
    }

    #[test]
    fn period_without_end_is_rejected() {
        let owner = OwnerRef::franchise(5);
        let mut h = HolidayRecord::new(owner, 2025, "기간", d("2025-02-01"));
        h.has_period = true;
        let errors = ValidationGate::validate(owner, &[h]);
        assert_eq!(errors[0].kind, ValidationErrorKind::MissingEndDate);
        assert_eq!(errors[0].to_string(), "row 0 '기간': end date is missing for a period");
    }

    #[test]
    fn inherited_rows_are_not_validated() {
        let mut inherited = HolidayRecord::new(OwnerRef::head_office(1), 2025, "", d("2025-05-10"));
        inherited.start_date = None;
        assert!(ValidationGate::validate(OwnerRef::store(10), &[inherited]).is_empty());
    }
}
