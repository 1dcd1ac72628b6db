use crate::models::holiday::HolidayRecord;
use crate::models::owner::{OwnerRef, OwnerType};
use serde::Serialize;

/// One row of an effective calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayView {
    pub source: HolidayRecord,
    pub is_inherited: bool,
    pub effective_is_operating: bool,
    /// Set when a store override supplied `effective_is_operating`.
    pub is_overridden: bool,
    pub badge_level: OwnerType,
}

/// Response of a calendar resolution: the owner header plus its rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCalendar {
    pub holiday_own_type: OwnerType,
    pub owner_id: i64,
    pub owner_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_office_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub franchise_name: Option<String>,
    pub year: i32,
    pub revision: i64,
    pub infos: Vec<HolidayView>,
}

impl ResolvedCalendar {
    pub fn owner(&self) -> OwnerRef {
        OwnerRef::new(self.holiday_own_type, self.owner_id)
    }

    /// Presentation filter: drop inherited rows.
    pub fn own_only(mut self) -> Self {
        self.infos.retain(|v| !v.is_inherited);
        self
    }
}
