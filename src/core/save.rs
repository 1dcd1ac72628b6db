//! Full-set save protocol: one owner, one year, one transaction.
//!
//! The bundle carries every own holiday of the owner for the year (rows with
//! an id are updates, rows without are inserts, missing ids are deletions)
//! and, for stores, the complete override set for that year.

use crate::core::calendar::CalendarLogic;
use crate::core::hierarchy::HierarchyIndex;
use crate::core::resolver::{HierarchyResolver, cascades_to};
use crate::core::validation::ValidationGate;
use crate::db::log::{AuditOp, AuditTarget, ttlog};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{
    HolidayDraft, HolidayRecord, OwnerRef, OwnerType, ParentHolidayOperatingSetting,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveBundle {
    pub owner_type: OwnerType,
    #[serde(default)]
    pub owner_id: i64,
    pub year: i32,
    #[serde(default)]
    pub holiday_infos: Vec<HolidayDraft>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_holiday_settings: Option<Vec<ParentHolidayOperatingSetting>>,
    /// Revision the editor started from; `None` means last writer wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_revision: Option<i64>,
}

impl SaveBundle {
    pub fn owner(&self) -> OwnerRef {
        OwnerRef::new(self.owner_type, self.owner_id)
    }

    /// Bundle rows as owned records, with stale end dates dropped.
    pub fn records(&self) -> Vec<HolidayRecord> {
        let owner = self.owner();
        self.holiday_infos
            .iter()
            .cloned()
            .map(|d| d.into_record(owner, self.year).normalized())
            .collect()
    }

    /// Structural checks that need no database.
    fn check_shape(&self) -> AppResult<()> {
        let owner = self.owner();
        let settings = self.parent_holiday_settings.as_deref().unwrap_or_default();

        if !owner.is_store() && !settings.is_empty() {
            return Err(AppError::InvalidBundle(format!(
                "{owner} cannot hold parent holiday settings"
            )));
        }

        let mut seen = BTreeSet::new();
        for s in settings {
            if !seen.insert((s.holiday_source_type, s.holiday_source_id)) {
                return Err(AppError::InvalidBundle(format!(
                    "duplicate setting for {} holiday {}",
                    s.holiday_source_type.to_db_str(),
                    s.holiday_source_id
                )));
            }
        }
        Ok(())
    }
}

/// Row-level diff between stored and submitted own holidays.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SavePlan {
    pub inserts: Vec<HolidayRecord>,
    pub updates: Vec<HolidayRecord>,
    pub deletes: Vec<i64>,
}

impl SavePlan {
    /// Unchanged rows are left out of `updates`.
    pub fn diff(existing: &[HolidayRecord], incoming: Vec<HolidayRecord>) -> AppResult<Self> {
        let stored: BTreeMap<i64, &HolidayRecord> = existing
            .iter()
            .filter_map(|h| h.id.map(|id| (id, h)))
            .collect();

        let mut plan = SavePlan::default();
        let mut kept = BTreeSet::new();

        for h in incoming {
            match h.id {
                None => plan.inserts.push(h),
                Some(id) => {
                    let Some(before) = stored.get(&id) else {
                        return Err(AppError::HolidayNotOwned {
                            id,
                            owner: h.owner().to_string(),
                        });
                    };
                    if !kept.insert(id) {
                        return Err(AppError::InvalidBundle(format!("holiday {id} listed twice")));
                    }
                    if **before != h {
                        plan.updates.push(h);
                    }
                }
            }
        }

        plan.deletes = stored.keys().filter(|id| !kept.contains(id)).copied().collect();
        Ok(plan)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOutcome {
    pub inserted: usize,
    /// Ids assigned to the inserted rows, in bundle order.
    pub inserted_ids: Vec<i64>,
    pub updated: usize,
    pub deleted: usize,
    pub overrides: usize,
    pub orphaned_overrides: usize,
    pub revision: i64,
}

pub struct SaveLogic;

impl SaveLogic {
    pub fn apply(pool: &mut DbPool, bundle: &SaveBundle) -> AppResult<SaveOutcome> {
        let owner = bundle.owner();
        let year = bundle.year;
        let records = bundle.records();

        let errors = ValidationGate::validate(owner, &records);
        if !errors.is_empty() {
            warn!(%owner, year, violations = errors.len(), "save rejected by validation");
            return Err(AppError::Validation(errors));
        }
        bundle.check_shape()?;

        pool.write_tx(|tx| {
            let index = CalendarLogic::load_index(tx)?;
            if !index.contains(owner) {
                return Err(AppError::UnknownOrgNode {
                    kind: owner_kind(owner.owner_type),
                    id: owner.owner_id,
                });
            }

            let current = queries::load_revision(tx, owner, year)?;
            if let Some(expected) = bundle.expected_revision
                && expected != current
            {
                return Err(AppError::StaleRevision {
                    owner: owner.to_string(),
                    year,
                    expected,
                    actual: current,
                });
            }

            let existing = queries::load_holidays_of(tx, owner, year)?;
            let plan = SavePlan::diff(&existing, records)?;

            let mut inserted_ids = Vec::with_capacity(plan.inserts.len());
            for h in &plan.inserts {
                inserted_ids.push(queries::insert_holiday(tx, h)?);
            }
            let mut orphaned = 0;
            for h in &plan.updates {
                queries::update_holiday(tx, h)?;
                orphaned += drop_unreachable_settings(tx, &index, h)?;
            }
            for id in &plan.deletes {
                queries::delete_holiday(tx, *id)?;
                orphaned += queries::delete_settings_for_source(tx, *id)?;
            }

            let mut overrides = 0;
            if let Some(settings) = &bundle.parent_holiday_settings
                && owner.is_store()
            {
                check_inherited(tx, &index, owner, year, settings)?;
                queries::replace_settings(tx, owner.owner_id, year, settings)?;
                overrides = settings.len();
            }

            let revision = queries::bump_revision(tx, owner, year)?;

            let outcome = SaveOutcome {
                inserted: plan.inserts.len(),
                inserted_ids,
                updated: plan.updates.len(),
                deleted: plan.deletes.len(),
                overrides,
                orphaned_overrides: orphaned,
                revision,
            };

            ttlog(
                tx,
                AuditOp::Save,
                &AuditTarget::Calendar { owner, year },
                &format!(
                    "inserted={} updated={} deleted={} overrides={} revision={}",
                    outcome.inserted, outcome.updated, outcome.deleted, outcome.overrides, revision
                ),
            )?;

            info!(%owner, year, revision, "calendar saved");
            Ok(outcome)
        })
    }
}

/// An updated record may stop cascading to some stores; their overrides
/// on it go, so re-enabling the cascade starts from the record's own flag.
fn drop_unreachable_settings(
    conn: &rusqlite::Connection,
    index: &HierarchyIndex,
    record: &HolidayRecord,
) -> AppResult<usize> {
    let Some(id) = record.id else {
        return Ok(0);
    };

    let mut removed = 0;
    for store_id in queries::stores_with_setting_for(conn, id)? {
        let chain = index.ancestors(OwnerRef::store(store_id));
        if !cascades_to(record, &chain) {
            removed += queries::delete_setting(conn, store_id, id)?;
        }
    }
    if removed > 0 {
        info!(holiday_id = id, removed, "overrides dropped after cascade change");
    }
    Ok(removed)
}

/// Every setting must shadow a record the store inherits this year,
/// under the source type matching that record's level.
fn check_inherited(
    conn: &rusqlite::Connection,
    index: &HierarchyIndex,
    store: OwnerRef,
    year: i32,
    settings: &[ParentHolidayOperatingSetting],
) -> AppResult<()> {
    let inherited: BTreeMap<i64, HolidayRecord> = HierarchyResolver::new(index, conn)
        .resolve(store, year)?
        .into_iter()
        .filter(|h| h.owner_type != OwnerType::Store)
        .filter_map(|h| h.id.map(|id| (id, h)))
        .collect();

    for s in settings {
        let Some(source) = inherited.get(&s.holiday_source_id) else {
            return Err(AppError::OverrideNotInherited {
                store_id: store.owner_id,
                source_id: s.holiday_source_id,
                year,
            });
        };
        if source.source_type() != s.holiday_source_type {
            return Err(AppError::InvalidBundle(format!(
                "holiday {} is a {} source, not {}",
                s.holiday_source_id,
                source.source_type().to_db_str(),
                s.holiday_source_type.to_db_str()
            )));
        }
    }
    Ok(())
}

pub(crate) fn owner_kind(owner_type: OwnerType) -> &'static str {
    match owner_type {
        OwnerType::Legal => "legal calendar",
        OwnerType::HeadOffice => "head office",
        OwnerType::Franchise => "franchise",
        OwnerType::Store => "store",
    }
}
