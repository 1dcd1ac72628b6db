//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::core::validation::ValidationError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid year: {0}")]
    InvalidYear(String),

    #[error("Invalid owner type: {0}")]
    InvalidOwnerType(String),

    #[error("Invalid apply-child type: {0}")]
    InvalidApplyChildType(String),

    #[error("Invalid holiday source type: {0}")]
    InvalidSourceType(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Org hierarchy
    // ---------------------------
    #[error("Invalid name: '{0}'")]
    InvalidName(String),

    #[error("Unknown {kind} id {id}")]
    UnknownOrgNode { kind: &'static str, id: i64 },

    #[error("Franchise {franchise_id} does not belong to head office {head_office_id}")]
    FranchiseOutsideHeadOffice {
        franchise_id: i64,
        head_office_id: i64,
    },

    // ---------------------------
    // Holiday logic
    // ---------------------------
    #[error("{} validation error(s): {}", .0.len(), join_violations(.0))]
    Validation(Vec<ValidationError>),

    #[error("Holiday {0} not found")]
    HolidayNotFound(i64),

    #[error("Holiday {id} is not owned by {owner}")]
    HolidayNotOwned { id: i64, owner: String },

    #[error("No holiday at draft row {0}")]
    DraftRow(usize),

    #[error("Invalid save bundle: {0}")]
    InvalidBundle(String),

    #[error("Store {store_id} does not inherit holiday {source_id} for {year}")]
    OverrideNotInherited {
        store_id: i64,
        source_id: i64,
        year: i32,
    },

    #[error("Calendar {owner}/{year} changed: expected revision {expected}, found {actual}")]
    StaleRevision {
        owner: String,
        year: i32,
        expected: i64,
        actual: i64,
    },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

fn join_violations(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Export(e.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(e: serde_yaml::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
