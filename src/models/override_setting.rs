use crate::models::owner::OwnerType;
use serde::{Deserialize, Serialize};

/// How a store names the ancestor holiday it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HolidaySourceType {
    Legal,
    /// Any non-legal ancestor (head office or franchise).
    Branch,
}

impl HolidaySourceType {
    pub fn for_owner(owner_type: OwnerType) -> Self {
        match owner_type {
            OwnerType::Legal => HolidaySourceType::Legal,
            _ => HolidaySourceType::Branch,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            HolidaySourceType::Legal => "LEGAL",
            HolidaySourceType::Branch => "BRANCH",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "LEGAL" => Some(HolidaySourceType::Legal),
            "BRANCH" => Some(HolidaySourceType::Branch),
            _ => None,
        }
    }
}

/// A store's local operating decision for one inherited holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentHolidayOperatingSetting {
    pub holiday_source_type: HolidaySourceType,
    pub holiday_source_id: i64,
    pub is_operating: bool,
}
