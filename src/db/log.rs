use crate::errors::AppResult;
use crate::models::OwnerRef;
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;
use std::fmt;

/// Operations written to the audit `log` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOp {
    Init,
    Org,
    Save,
    Del,
    Backup,
    MigrationApplied,
}

impl AuditOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditOp::Init => "init",
            AuditOp::Org => "org",
            AuditOp::Save => "save",
            AuditOp::Del => "del",
            AuditOp::Backup => "backup",
            AuditOp::MigrationApplied => "migration_applied",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "init" => Some(AuditOp::Init),
            "org" => Some(AuditOp::Org),
            "save" => Some(AuditOp::Save),
            "del" => Some(AuditOp::Del),
            "backup" => Some(AuditOp::Backup),
            "migration_applied" => Some(AuditOp::MigrationApplied),
            _ => None,
        }
    }
}

/// Subject of an audit row, rendered into the `target` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditTarget {
    Database,
    Node(OwnerRef),
    Calendar { owner: OwnerRef, year: i32 },
    File(String),
}

impl fmt::Display for AuditTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditTarget::Database => f.write_str("database"),
            AuditTarget::Node(owner) => write!(f, "{owner}"),
            AuditTarget::Calendar { owner, year } => write!(f, "{owner}/{year}"),
            AuditTarget::File(path) => f.write_str(path),
        }
    }
}

/// Append one audit row stamped with the local time.
pub fn ttlog(conn: &Connection, op: AuditOp, target: &AuditTarget, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?
    .execute(params![now, op.as_str(), target.to_string(), message])?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;

    #[test]
    fn targets_render_owner_and_year() {
        let cal = AuditTarget::Calendar {
            owner: OwnerRef::store(7),
            year: 2025,
        };
        assert_eq!(cal.to_string(), "STORE#7/2025");
        assert_eq!(AuditTarget::Node(OwnerRef::legal()).to_string(), "LEGAL");
        assert_eq!(AuditTarget::Database.to_string(), "database");
    }

    #[test]
    fn ops_survive_the_log_column() {
        for op in [
            AuditOp::Init,
            AuditOp::Org,
            AuditOp::Save,
            AuditOp::Del,
            AuditOp::Backup,
            AuditOp::MigrationApplied,
        ] {
            assert_eq!(AuditOp::from_db_str(op.as_str()), Some(op));
        }
        assert_eq!(AuditOp::from_db_str("override"), None);
    }

    #[test]
    fn ttlog_appends_a_row() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        let target = AuditTarget::Node(OwnerRef::head_office(1));
        ttlog(&conn, AuditOp::Org, &target, "Added head office 'A'").unwrap();

        let (op, tgt): (String, String) = conn
            .query_row(
                "SELECT operation, target FROM log WHERE operation = 'org'",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(op, "org");
        assert_eq!(tgt, "HEAD_OFFICE#1");
    }
}
