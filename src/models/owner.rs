use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Owner id used by `LEGAL` records, which have no organizational node.
pub const LEGAL_OWNER_ID: i64 = 0;

/// Level of the organization that authored a holiday or that a calendar is
/// resolved for.
///
/// The declaration order is the badge precedence used to break same-date
/// ties: `LEGAL < HEAD_OFFICE < FRANCHISE < STORE`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnerType {
    Legal,
    HeadOffice,
    Franchise,
    Store,
}

impl OwnerType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            OwnerType::Legal => "LEGAL",
            OwnerType::HeadOffice => "HEAD_OFFICE",
            OwnerType::Franchise => "FRANCHISE",
            OwnerType::Store => "STORE",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "LEGAL" => Some(OwnerType::Legal),
            "HEAD_OFFICE" => Some(OwnerType::HeadOffice),
            "FRANCHISE" => Some(OwnerType::Franchise),
            "STORE" => Some(OwnerType::Store),
            _ => None,
        }
    }

    /// Short label rendered as the level badge.
    pub fn badge(&self) -> &'static str {
        match self {
            OwnerType::Legal => "LEGAL",
            OwnerType::HeadOffice => "HQ",
            OwnerType::Franchise => "FRANCHISE",
            OwnerType::Store => "STORE",
        }
    }
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

/// A concrete node of the hierarchy: the owner type plus the node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRef {
    pub owner_type: OwnerType,
    pub owner_id: i64,
}

impl OwnerRef {
    pub fn new(owner_type: OwnerType, owner_id: i64) -> Self {
        // Legal records have a single, id-less owner.
        let owner_id = if owner_type == OwnerType::Legal {
            LEGAL_OWNER_ID
        } else {
            owner_id
        };
        Self {
            owner_type,
            owner_id,
        }
    }

    pub fn legal() -> Self {
        Self::new(OwnerType::Legal, LEGAL_OWNER_ID)
    }

    pub fn head_office(id: i64) -> Self {
        Self::new(OwnerType::HeadOffice, id)
    }

    pub fn franchise(id: i64) -> Self {
        Self::new(OwnerType::Franchise, id)
    }

    pub fn store(id: i64) -> Self {
        Self::new(OwnerType::Store, id)
    }

    pub fn is_store(&self) -> bool {
        self.owner_type == OwnerType::Store
    }
}

impl fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner_type {
            OwnerType::Legal => f.write_str("LEGAL"),
            other => write!(f, "{}#{}", other, self.owner_id),
        }
    }
}
