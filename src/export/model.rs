// src/export/model.rs

use crate::models::{HolidayView, OwnerRef, apply_child};
use serde::Serialize;

/// Flat export row: one resolved holiday of one calendar.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct HolidayExport {
    pub calendar: String,
    pub year: i32,
    pub id: Option<i64>,
    pub level: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub inherited: bool,
    pub is_operating: bool,
    pub effective_is_operating: bool,
    pub overridden: bool,
    pub apply_child_types: String,
}

impl HolidayExport {
    pub fn from_view(calendar: OwnerRef, year: i32, view: &HolidayView) -> Self {
        let src = &view.source;
        Self {
            calendar: calendar.to_string(),
            year,
            id: src.id,
            level: view.badge_level.to_db_str().to_string(),
            name: src.name.clone(),
            start_date: src.start_date.map(|d| d.to_string()).unwrap_or_default(),
            end_date: src
                .end_date
                .filter(|_| src.has_period)
                .map(|d| d.to_string())
                .unwrap_or_default(),
            inherited: view.is_inherited,
            is_operating: src.is_operating,
            effective_is_operating: view.effective_is_operating,
            overridden: view.is_overridden,
            apply_child_types: apply_child::join_for_db(&src.apply_child_types),
        }
    }
}
