//! Organizational nodes: head office → (franchise) → store.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadOffice {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Franchise {
    pub id: i64,
    pub head_office_id: i64,
    pub name: String,
}

/// A store without `franchise_id` is owned directly by its head office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: i64,
    pub head_office_id: i64,
    pub franchise_id: Option<i64>,
    pub name: String,
}
