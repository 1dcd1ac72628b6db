use crate::db::migrate;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DbStats {
    pub head_offices: i64,
    pub franchises: i64,
    pub stores: i64,
    pub holidays: i64,
    pub overrides: i64,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub migrations_applied: usize,
    pub migrations_known: usize,
}

fn count(pool: &DbPool, table: &str) -> AppResult<i64> {
    Ok(pool
        .conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?)
}

pub fn collect(pool: &DbPool) -> AppResult<DbStats> {
    let (first_year, last_year): (Option<i32>, Option<i32>) = pool
        .conn
        .query_row("SELECT MIN(year), MAX(year) FROM holidays", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .optional()?
        .unwrap_or((None, None));

    Ok(DbStats {
        head_offices: count(pool, "head_offices")?,
        franchises: count(pool, "franchises")?,
        stores: count(pool, "stores")?,
        holidays: count(pool, "holidays")?,
        overrides: count(pool, "parent_holiday_settings")?,
        first_year,
        last_year,
        migrations_applied: migrate::applied_count(&pool.conn)?,
        migrations_known: migrate::known_count(),
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    let s = collect(pool)?;
    println!(
        "{}• Org:{} {}{}{} head office(s), {}{}{} franchise(s), {}{}{} store(s)",
        CYAN, RESET, GREEN, s.head_offices, RESET, GREEN, s.franchises, RESET, GREEN, s.stores, RESET
    );
    println!("{}• Holidays:{} {}{}{}", CYAN, RESET, GREEN, s.holidays, RESET);
    println!("{}• Store overrides:{} {}{}{}", CYAN, RESET, GREEN, s.overrides, RESET);

    let fmt_year = |y: Option<i32>| y.map(|y| y.to_string()).unwrap_or_else(|| format!("{GREY}--{RESET}"));
    println!("{}• Years:{}", CYAN, RESET);
    println!("    from: {}", fmt_year(s.first_year));
    println!("    to:   {}", fmt_year(s.last_year));

    println!(
        "{}• Migrations:{} {}/{}",
        CYAN, RESET, s.migrations_applied, s.migrations_known
    );

    println!();
    Ok(())
}
