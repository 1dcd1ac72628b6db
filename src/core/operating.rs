//! Open/closed answer for one date of an effective calendar.
//!
//! When several holidays cover the same date, the date is closed as soon as
//! one of them is closed.

use crate::models::HolidayView;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingDay {
    pub date: NaiveDate,
    pub operating: bool,
    /// Holidays covering the date, in calendar order.
    pub covering: Vec<HolidayView>,
}

impl OperatingDay {
    pub fn closing(&self) -> impl Iterator<Item = &HolidayView> {
        self.covering.iter().filter(|v| !v.effective_is_operating)
    }
}

pub fn evaluate(views: &[HolidayView], date: NaiveDate) -> OperatingDay {
    let covering: Vec<HolidayView> = views
        .iter()
        .filter(|v| v.source.covers(date))
        .cloned()
        .collect();

    OperatingDay {
        date,
        operating: covering.iter().all(|v| v.effective_is_operating),
        covering,
    }
}
