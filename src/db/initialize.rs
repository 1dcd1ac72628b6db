use crate::db::log::{AuditOp, AuditTarget, ttlog};
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use std::fs;
use std::path::Path;

/// Open (creating if needed) the calendar database at `db_path`, bring the
/// schema up to date and record the initialization in the audit log.
pub fn init_db(db_path: &str) -> AppResult<DbPool> {
    if let Some(parent) = Path::new(db_path).parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let pool = DbPool::new(db_path)?;
    run_pending_migrations(&pool.conn)?;
    ttlog(
        &pool.conn,
        AuditOp::Init,
        &AuditTarget::Database,
        &format!("Database initialized at {db_path}"),
    )?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::{applied_count, known_count};
    use std::env;

    #[test]
    fn init_creates_missing_directories_and_schema() {
        let dir = env::temp_dir().join("holical_init_unit").join("nested");
        fs::remove_dir_all(&dir).ok();
        let path = dir.join("cal.sqlite");

        let pool = init_db(&path.to_string_lossy()).unwrap();
        assert!(path.exists());
        assert_eq!(applied_count(&pool.conn).unwrap(), known_count());

        let inits: i64 = pool
            .conn
            .query_row("SELECT COUNT(*) FROM log WHERE operation = 'init'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(inits, 1);
    }
}
