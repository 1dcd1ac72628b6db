use crate::db::log::AuditOp;
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};
use tracing::debug;

/// Ensure that the `log` table exists. Migrations record themselves there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_org_tables",
        description: "Created head_offices, franchises and stores tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS head_offices (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS franchises (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            head_office_id  INTEGER NOT NULL REFERENCES head_offices(id),
            name            TEXT NOT NULL,
            created_at      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS stores (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            head_office_id  INTEGER NOT NULL REFERENCES head_offices(id),
            franchise_id    INTEGER REFERENCES franchises(id),
            name            TEXT NOT NULL,
            created_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_franchises_head_office ON franchises(head_office_id);
        CREATE INDEX IF NOT EXISTS idx_stores_parent ON stores(head_office_id, franchise_id);
        "#,
    },
    Migration {
        version: "20250301_0002_holidays",
        description: "Created holidays table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS holidays (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_type         TEXT NOT NULL
                               CHECK(owner_type IN ('LEGAL','HEAD_OFFICE','FRANCHISE','STORE')),
            owner_id           INTEGER NOT NULL DEFAULT 0,
            year               INTEGER NOT NULL,
            name               TEXT NOT NULL,
            has_period         INTEGER NOT NULL DEFAULT 0,
            start_date         TEXT NOT NULL,
            end_date           TEXT,
            is_operating       INTEGER NOT NULL DEFAULT 0,
            apply_child_types  TEXT NOT NULL DEFAULT '',
            created_at         TEXT NOT NULL,
            updated_at         TEXT NOT NULL,
            CHECK(owner_type <> 'STORE' OR apply_child_types = '')
        );

        CREATE INDEX IF NOT EXISTS idx_holidays_owner_year ON holidays(owner_type, owner_id, year);
        "#,
    },
    Migration {
        version: "20250412_0003_parent_holiday_settings",
        description: "Created parent_holiday_settings table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS parent_holiday_settings (
            store_id      INTEGER NOT NULL,
            source_type   TEXT NOT NULL CHECK(source_type IN ('LEGAL','BRANCH')),
            source_id     INTEGER NOT NULL,
            year          INTEGER NOT NULL,
            is_operating  INTEGER NOT NULL,
            updated_at    TEXT NOT NULL,
            PRIMARY KEY (store_id, source_type, source_id)
        );

        CREATE INDEX IF NOT EXISTS idx_settings_store_year ON parent_holiday_settings(store_id, year);
        CREATE INDEX IF NOT EXISTS idx_settings_source ON parent_holiday_settings(source_id);
        "#,
    },
    Migration {
        version: "20250520_0004_calendar_revisions",
        description: "Created calendar_revisions table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS calendar_revisions (
            owner_type  TEXT NOT NULL,
            owner_id    INTEGER NOT NULL,
            year        INTEGER NOT NULL,
            revision    INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (owner_type, owner_id, year)
        );
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = ?1 AND target = ?2
         LIMIT 1",
    )?;
    Ok(chk
        .query_row([AuditOp::MigrationApplied.as_str(), version], |_| Ok(()))
        .optional()?
        .is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    if is_applied(conn, m.version)? {
        debug!(version = m.version, "migration already applied");
        return Ok(());
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), ?1, ?2, ?3)",
        [AuditOp::MigrationApplied.as_str(), m.version, m.description],
    )?;
    tx.commit()?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Public entry point: run all pending migrations, oldest first.
///
/// Invoked by db::initialize::init_db() and `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    for m in MIGRATIONS {
        apply(conn, m)?;
    }

    Ok(())
}

/// Number of migrations recorded as applied.
pub fn applied_count(conn: &Connection) -> Result<usize> {
    let mut n = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            n += 1;
        }
    }
    Ok(n)
}

pub fn known_count() -> usize {
    MIGRATIONS.len()
}
