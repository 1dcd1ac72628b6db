use crate::db::log::{AuditOp, AuditTarget, ttlog};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{HolidayRecord, OwnerType};
use tracing::info;

#[derive(Debug)]
pub struct DeleteOutcome {
    pub record: HolidayRecord,
    pub orphaned_overrides: usize,
    pub revision: i64,
}

pub struct DeleteLogic;

impl DeleteLogic {
    /// Delete one holiday owned at `owner_type` level, together with every
    /// store override that pointed at it.
    pub fn apply(pool: &mut DbPool, owner_type: OwnerType, holiday_id: i64) -> AppResult<DeleteOutcome> {
        pool.write_tx(|tx| {
            let record = queries::load_holiday(tx, holiday_id)?
                .ok_or(AppError::HolidayNotFound(holiday_id))?;

            if record.owner_type != owner_type {
                return Err(AppError::HolidayNotOwned {
                    id: holiday_id,
                    owner: owner_type.to_string(),
                });
            }

            queries::delete_holiday(tx, holiday_id)?;
            let orphaned_overrides = queries::delete_settings_for_source(tx, holiday_id)?;
            let revision = queries::bump_revision(tx, record.owner(), record.year)?;

            ttlog(
                tx,
                AuditOp::Del,
                &AuditTarget::Calendar {
                    owner: record.owner(),
                    year: record.year,
                },
                &format!(
                    "Deleted holiday {} '{}' ({} override(s) removed)",
                    holiday_id, record.name, orphaned_overrides
                ),
            )?;

            info!(holiday_id, orphaned_overrides, "holiday deleted");
            Ok(DeleteOutcome {
                record,
                orphaned_overrides,
                revision,
            })
        })
    }
}
