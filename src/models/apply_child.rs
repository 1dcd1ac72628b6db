use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Which descendants an ancestor holiday cascades to.
/// Only meaningful on records owned by a non-`STORE` level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplyChildType {
    /// The head office itself.
    HeadOffice,
    /// Stores owned directly by the head office (no franchise in between).
    AllHeadOfficeStores,
    /// Stores owned by any franchise under the head office.
    AllFranchiseStores,
}

impl ApplyChildType {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ApplyChildType::HeadOffice => "HEAD_OFFICE",
            ApplyChildType::AllHeadOfficeStores => "ALL_HEAD_OFFICE_STORES",
            ApplyChildType::AllFranchiseStores => "ALL_FRANCHISE_STORES",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "HEAD_OFFICE" => Some(ApplyChildType::HeadOffice),
            "ALL_HEAD_OFFICE_STORES" => Some(ApplyChildType::AllHeadOfficeStores),
            "ALL_FRANCHISE_STORES" => Some(ApplyChildType::AllFranchiseStores),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        ApplyChildType::from_db_str(&code.trim().replace('-', "_").to_uppercase())
    }
}

/// Stored as a comma-separated column, e.g. `ALL_HEAD_OFFICE_STORES,ALL_FRANCHISE_STORES`.
pub fn join_for_db(types: &[ApplyChildType]) -> String {
    types
        .iter()
        .map(|t| t.to_db_str())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn split_from_db(raw: &str) -> Option<Vec<ApplyChildType>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ApplyChildType::from_db_str)
        .collect()
}

/// Parse a CLI list such as `all-head-office-stores,all-franchise-stores`.
/// Duplicates are collapsed, order is normalized.
pub fn parse_list(raw: &str) -> AppResult<Vec<ApplyChildType>> {
    let mut out = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let t = ApplyChildType::from_code(part)
            .ok_or_else(|| AppError::InvalidApplyChildType(part.to_string()))?;
        if !out.contains(&t) {
            out.push(t);
        }
    }
    out.sort();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_column_round_trips_and_skips_blanks() {
        let types = vec![
            ApplyChildType::AllHeadOfficeStores,
            ApplyChildType::AllFranchiseStores,
        ];
        let raw = join_for_db(&types);
        assert_eq!(raw, "ALL_HEAD_OFFICE_STORES,ALL_FRANCHISE_STORES");
        assert_eq!(split_from_db(&raw), Some(types));
        assert_eq!(split_from_db(""), Some(vec![]));
        assert_eq!(split_from_db("NOPE"), None);
    }

    #[test]
    fn cli_list_is_deduplicated() {
        let parsed = parse_list("all-franchise-stores, head-office,ALL_FRANCHISE_STORES").unwrap();
        assert_eq!(
            parsed,
            vec![ApplyChildType::HeadOffice, ApplyChildType::AllFranchiseStores]
        );
        assert!(parse_list("everyone").is_err());
    }
}
