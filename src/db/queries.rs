use crate::errors::{AppError, AppResult};
use crate::models::apply_child::{join_for_db, split_from_db};
use crate::models::{
    Franchise, HeadOffice, HolidayRecord, HolidaySourceType, OwnerRef, OwnerType,
    ParentHolidayOperatingSetting, Store,
};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const HOLIDAY_COLUMNS: &str = "id, owner_type, owner_id, year, name, has_period, start_date, \
                               end_date, is_operating, apply_child_types";

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_db_date(idx: usize, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| conversion_error(idx, AppError::InvalidDate(raw.to_string())))
}

pub fn map_holiday(row: &Row) -> Result<HolidayRecord> {
    let owner_str: String = row.get("owner_type")?;
    let owner_type = OwnerType::from_db_str(&owner_str)
        .ok_or_else(|| conversion_error(1, AppError::InvalidOwnerType(owner_str.clone())))?;

    let start_str: String = row.get("start_date")?;
    let start_date = parse_db_date(6, &start_str)?;

    let end_str: Option<String> = row.get("end_date")?;
    let end_date = match end_str {
        Some(s) => Some(parse_db_date(7, &s)?),
        None => None,
    };

    let apply_str: String = row.get("apply_child_types")?;
    let apply_child_types = split_from_db(&apply_str)
        .ok_or_else(|| conversion_error(9, AppError::InvalidApplyChildType(apply_str.clone())))?;

    Ok(HolidayRecord {
        id: Some(row.get("id")?),
        owner_type,
        owner_id: row.get("owner_id")?,
        year: row.get("year")?,
        name: row.get("name")?,
        has_period: row.get::<_, i64>("has_period")? != 0,
        start_date: Some(start_date),
        end_date,
        is_operating: row.get::<_, i64>("is_operating")? != 0,
        apply_child_types,
    })
}

// ---------------------------
// Holidays
// ---------------------------

pub fn load_holidays_of(conn: &Connection, owner: OwnerRef, year: i32) -> AppResult<Vec<HolidayRecord>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {HOLIDAY_COLUMNS} FROM holidays
         WHERE owner_type = ?1 AND owner_id = ?2 AND year = ?3
         ORDER BY start_date ASC, id ASC"
    ))?;

    let rows = stmt.query_map(
        params![owner.owner_type.to_db_str(), owner.owner_id, year],
        map_holiday,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_holiday(conn: &Connection, id: i64) -> AppResult<Option<HolidayRecord>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {HOLIDAY_COLUMNS} FROM holidays WHERE id = ?1"
    ))?;
    Ok(stmt.query_row([id], map_holiday).optional()?)
}

pub fn insert_holiday(conn: &Connection, h: &HolidayRecord) -> AppResult<i64> {
    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO holidays (owner_type, owner_id, year, name, has_period, start_date, end_date,
                               is_operating, apply_child_types, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
        params![
            h.owner_type.to_db_str(),
            h.owner_id,
            h.year,
            h.name.trim(),
            h.has_period as i64,
            h.start_date.map(|d| d.to_string()),
            h.end_date.map(|d| d.to_string()),
            h.is_operating as i64,
            join_for_db(&h.apply_child_types),
            now,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update every field except id and owner.
pub fn update_holiday(conn: &Connection, h: &HolidayRecord) -> AppResult<()> {
    let id = h
        .id
        .ok_or_else(|| AppError::Other("update_holiday called on a draft".into()))?;
    conn.execute(
        "UPDATE holidays
         SET year = ?1, name = ?2, has_period = ?3, start_date = ?4, end_date = ?5,
             is_operating = ?6, apply_child_types = ?7, updated_at = ?8
         WHERE id = ?9",
        params![
            h.year,
            h.name.trim(),
            h.has_period as i64,
            h.start_date.map(|d| d.to_string()),
            h.end_date.map(|d| d.to_string()),
            h.is_operating as i64,
            join_for_db(&h.apply_child_types),
            Local::now().to_rfc3339(),
            id,
        ],
    )?;
    Ok(())
}

pub fn delete_holiday(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM holidays WHERE id = ?1", [id])?;
    Ok(())
}

// ---------------------------
// Parent holiday settings (store overrides)
// ---------------------------

fn map_setting(row: &Row) -> Result<ParentHolidayOperatingSetting> {
    let source_str: String = row.get("source_type")?;
    let holiday_source_type = HolidaySourceType::from_db_str(&source_str)
        .ok_or_else(|| conversion_error(1, AppError::InvalidSourceType(source_str.clone())))?;

    Ok(ParentHolidayOperatingSetting {
        holiday_source_type,
        holiday_source_id: row.get("source_id")?,
        is_operating: row.get::<_, i64>("is_operating")? != 0,
    })
}

pub fn load_settings(conn: &Connection, store_id: i64, year: i32) -> AppResult<Vec<ParentHolidayOperatingSetting>> {
    let mut stmt = conn.prepare_cached(
        "SELECT source_type, source_id, is_operating FROM parent_holiday_settings
         WHERE store_id = ?1 AND year = ?2
         ORDER BY source_type ASC, source_id ASC",
    )?;
    let rows = stmt.query_map(params![store_id, year], map_setting)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Replace the whole override set of one store for one year.
pub fn replace_settings(
    conn: &Connection,
    store_id: i64,
    year: i32,
    settings: &[ParentHolidayOperatingSetting],
) -> AppResult<()> {
    conn.execute(
        "DELETE FROM parent_holiday_settings WHERE store_id = ?1 AND year = ?2",
        params![store_id, year],
    )?;

    let now = Local::now().to_rfc3339();
    let mut stmt = conn.prepare_cached(
        "INSERT INTO parent_holiday_settings (store_id, source_type, source_id, year, is_operating, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for s in settings {
        stmt.execute(params![
            store_id,
            s.holiday_source_type.to_db_str(),
            s.holiday_source_id,
            year,
            s.is_operating as i64,
            now,
        ])?;
    }
    Ok(())
}

/// Remove overrides pointing at a holiday that no longer exists.
pub fn delete_settings_for_source(conn: &Connection, source_id: i64) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM parent_holiday_settings WHERE source_id = ?1",
        [source_id],
    )?)
}

/// Stores holding an override for `source_id`.
pub fn stores_with_setting_for(conn: &Connection, source_id: i64) -> AppResult<Vec<i64>> {
    let mut stmt = conn.prepare_cached(
        "SELECT DISTINCT store_id FROM parent_holiday_settings
         WHERE source_id = ?1
         ORDER BY store_id ASC",
    )?;
    let rows = stmt.query_map([source_id], |row| row.get(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_setting(conn: &Connection, store_id: i64, source_id: i64) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM parent_holiday_settings WHERE store_id = ?1 AND source_id = ?2",
        params![store_id, source_id],
    )?)
}

// ---------------------------
// Calendar revisions
// ---------------------------

pub fn load_revision(conn: &Connection, owner: OwnerRef, year: i32) -> AppResult<i64> {
    let rev: Option<i64> = conn
        .query_row(
            "SELECT revision FROM calendar_revisions
             WHERE owner_type = ?1 AND owner_id = ?2 AND year = ?3",
            params![owner.owner_type.to_db_str(), owner.owner_id, year],
            |row| row.get(0),
        )
        .optional()?;
    Ok(rev.unwrap_or(0))
}

pub fn bump_revision(conn: &Connection, owner: OwnerRef, year: i32) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO calendar_revisions (owner_type, owner_id, year, revision)
         VALUES (?1, ?2, ?3, 1)
         ON CONFLICT(owner_type, owner_id, year) DO UPDATE SET revision = revision + 1",
        params![owner.owner_type.to_db_str(), owner.owner_id, year],
    )?;
    load_revision(conn, owner, year)
}

// ---------------------------
// Org hierarchy
// ---------------------------

pub fn load_head_offices(conn: &Connection) -> AppResult<Vec<HeadOffice>> {
    let mut stmt = conn.prepare_cached("SELECT id, name FROM head_offices ORDER BY id ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(HeadOffice {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_franchises(conn: &Connection) -> AppResult<Vec<Franchise>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, head_office_id, name FROM franchises ORDER BY id ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(Franchise {
            id: row.get(0)?,
            head_office_id: row.get(1)?,
            name: row.get(2)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_stores(conn: &Connection) -> AppResult<Vec<Store>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, head_office_id, franchise_id, name FROM stores ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Store {
            id: row.get(0)?,
            head_office_id: row.get(1)?,
            franchise_id: row.get(2)?,
            name: row.get(3)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_head_office(conn: &Connection, name: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO head_offices (name, created_at) VALUES (?1, ?2)",
        params![name, Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_franchise(conn: &Connection, head_office_id: i64, name: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO franchises (head_office_id, name, created_at) VALUES (?1, ?2, ?3)",
        params![head_office_id, name, Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_store(
    conn: &Connection,
    head_office_id: i64,
    franchise_id: Option<i64>,
    name: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO stores (head_office_id, franchise_id, name, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![head_office_id, franchise_id, name, Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}
