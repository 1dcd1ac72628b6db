use crate::core::calendar::CalendarLogic;
use crate::db::log::{AuditOp, AuditTarget, ttlog};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::OwnerRef;
use tracing::info;

/// Creation of head offices, franchises and stores.
pub struct OrgLogic;

fn clean_name(name: &str) -> AppResult<String> {
    let n = name.trim();
    if n.is_empty() {
        return Err(AppError::InvalidName(name.to_string()));
    }
    Ok(n.to_string())
}

impl OrgLogic {
    pub fn add_head_office(pool: &mut DbPool, name: &str) -> AppResult<i64> {
        let name = clean_name(name)?;
        pool.write_tx(|tx| {
            let id = queries::insert_head_office(tx, &name)?;
            ttlog(
                tx,
                AuditOp::Org,
                &AuditTarget::Node(OwnerRef::head_office(id)),
                &format!("Added head office '{name}'"),
            )?;
            info!(id, "head office added");
            Ok(id)
        })
    }

    pub fn add_franchise(pool: &mut DbPool, head_office_id: i64, name: &str) -> AppResult<i64> {
        let name = clean_name(name)?;
        pool.write_tx(|tx| {
            let index = CalendarLogic::load_index(tx)?;
            if index.head_office(head_office_id).is_none() {
                return Err(AppError::UnknownOrgNode {
                    kind: "head office",
                    id: head_office_id,
                });
            }
            let id = queries::insert_franchise(tx, head_office_id, &name)?;
            ttlog(
                tx,
                AuditOp::Org,
                &AuditTarget::Node(OwnerRef::franchise(id)),
                &format!("Added franchise '{name}' under head office {head_office_id}"),
            )?;
            info!(id, head_office_id, "franchise added");
            Ok(id)
        })
    }

    /// A store without franchise is owned directly by the head office.
    pub fn add_store(
        pool: &mut DbPool,
        head_office_id: i64,
        franchise_id: Option<i64>,
        name: &str,
    ) -> AppResult<i64> {
        let name = clean_name(name)?;
        pool.write_tx(|tx| {
            let index = CalendarLogic::load_index(tx)?;
            if index.head_office(head_office_id).is_none() {
                return Err(AppError::UnknownOrgNode {
                    kind: "head office",
                    id: head_office_id,
                });
            }
            if let Some(fid) = franchise_id {
                let franchise = index.franchise(fid).ok_or(AppError::UnknownOrgNode {
                    kind: "franchise",
                    id: fid,
                })?;
                if franchise.head_office_id != head_office_id {
                    return Err(AppError::FranchiseOutsideHeadOffice {
                        franchise_id: fid,
                        head_office_id,
                    });
                }
            }
            let id = queries::insert_store(tx, head_office_id, franchise_id, &name)?;
            ttlog(
                tx,
                AuditOp::Org,
                &AuditTarget::Node(OwnerRef::store(id)),
                &format!("Added store '{name}'"),
            )?;
            info!(id, head_office_id, ?franchise_id, "store added");
            Ok(id)
        })
    }
}
