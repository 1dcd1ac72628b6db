use crate::models::apply_child::ApplyChildType;
use crate::models::override_setting::HolidaySourceType;
use crate::models::owner::{OwnerRef, OwnerType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A holiday as authored by one owner for one year.
///
/// `id` is `None` for drafts that were never persisted. `start_date` is
/// optional so that an incomplete draft can be represented and rejected by
/// the validation gate; persisted rows always carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub owner_type: OwnerType,
    pub owner_id: i64,
    pub year: i32,
    pub name: String,
    pub has_period: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_operating: bool,
    #[serde(default)]
    pub apply_child_types: Vec<ApplyChildType>,
}

impl HolidayRecord {
    /// Single-day, closed holiday with no cascading.
    pub fn new(owner: OwnerRef, year: i32, name: impl Into<String>, start: NaiveDate) -> Self {
        Self {
            id: None,
            owner_type: owner.owner_type,
            owner_id: owner.owner_id,
            year,
            name: name.into(),
            has_period: false,
            start_date: Some(start),
            end_date: None,
            is_operating: false,
            apply_child_types: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_period(mut self, end: NaiveDate) -> Self {
        self.has_period = true;
        self.end_date = Some(end);
        self
    }

    pub fn operating(mut self, is_operating: bool) -> Self {
        self.is_operating = is_operating;
        self
    }

    pub fn applying_to(mut self, types: &[ApplyChildType]) -> Self {
        self.apply_child_types = types.to_vec();
        self
    }

    pub fn owner(&self) -> OwnerRef {
        OwnerRef::new(self.owner_type, self.owner_id)
    }

    pub fn applies_to_child(&self, kind: ApplyChildType) -> bool {
        self.apply_child_types.contains(&kind)
    }

    /// How a store refers to this record when it overrides it.
    pub fn source_type(&self) -> HolidaySourceType {
        HolidaySourceType::for_owner(self.owner_type)
    }

    /// Last calendar day covered by the holiday.
    pub fn last_day(&self) -> Option<NaiveDate> {
        if self.has_period {
            self.end_date
        } else {
            self.start_date
        }
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        match (self.start_date, self.last_day()) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }

    /// Drop an `end_date` left over from a period that was switched off.
    pub fn normalized(mut self) -> Self {
        if !self.has_period {
            self.end_date = None;
        }
        self
    }
}

/// A holiday row as sent inside a save bundle: the owner and year come from
/// the bundle itself. Entries without `id` are inserts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub has_period: bool,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_operating: bool,
    #[serde(default)]
    pub apply_child_types: Vec<ApplyChildType>,
}

impl HolidayDraft {
    pub fn into_record(self, owner: OwnerRef, year: i32) -> HolidayRecord {
        HolidayRecord {
            id: self.id,
            owner_type: owner.owner_type,
            owner_id: owner.owner_id,
            year,
            name: self.name,
            has_period: self.has_period,
            start_date: self.start_date,
            end_date: self.end_date,
            is_operating: self.is_operating,
            apply_child_types: self.apply_child_types,
        }
    }
}

impl From<HolidayRecord> for HolidayDraft {
    fn from(r: HolidayRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            has_period: r.has_period,
            start_date: r.start_date,
            end_date: r.end_date,
            is_operating: r.is_operating,
            apply_child_types: r.apply_child_types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn single_day_covers_only_its_start() {
        let h = HolidayRecord::new(OwnerRef::legal(), 2025, "설날", d("2025-01-29"));
        assert!(h.covers(d("2025-01-29")));
        assert!(!h.covers(d("2025-01-30")));
        assert_eq!(h.source_type(), HolidaySourceType::Legal);
    }

    #[test]
    fn period_covers_inclusive_range() {
        let h = HolidayRecord::new(OwnerRef::head_office(1), 2025, "여름휴가", d("2025-08-01"))
            .with_period(d("2025-08-03"));
        assert!(h.covers(d("2025-08-01")));
        assert!(h.covers(d("2025-08-03")));
        assert!(!h.covers(d("2025-08-04")));
        assert_eq!(h.source_type(), HolidaySourceType::Branch);
    }

    #[test]
    fn normalized_clears_end_without_period() {
        let mut h = HolidayRecord::new(OwnerRef::store(3), 2025, "x", d("2025-03-01"));
        h.end_date = Some(d("2025-03-09"));
        let h = h.normalized();
        assert_eq!(h.end_date, None);
        assert_eq!(h.last_day(), Some(d("2025-03-01")));
    }

    #[test]
    fn draft_json_uses_camel_case_and_optional_id() {
        let json = r#"{"name":"창립기념일","startDate":"2025-05-10","applyChildTypes":["ALL_HEAD_OFFICE_STORES"]}"#;
        let draft: HolidayDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.id, None);
        assert!(!draft.has_period);
        let rec = draft.into_record(OwnerRef::head_office(1), 2025);
        assert!(rec.applies_to_child(ApplyChildType::AllHeadOfficeStores));
        assert_eq!(rec.start_date, Some(d("2025-05-10")));
    }
}
