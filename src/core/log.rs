use crate::db::log::AuditOp;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use rusqlite::params;
use std::sync::LazyLock;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static ANSI pattern"));

const MAX_OP_WIDTH: usize = 48;

fn strip_ansi(s: &str) -> String {
    ANSI.replace_all(s, "").into_owned()
}

/// Colour per audited operation.
fn color_for_operation(op: &str) -> Colour {
    match AuditOp::from_db_str(op) {
        Some(AuditOp::Save) => Colour::Green,
        Some(AuditOp::Del) => Colour::Red,
        Some(AuditOp::Org) => Colour::Cyan,
        Some(AuditOp::MigrationApplied) => Colour::Purple,
        Some(AuditOp::Backup) => Colour::Blue,
        Some(AuditOp::Init) => Colour::RGB(255, 153, 51),
        None => Colour::White,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub struct LogLogic;

impl LogLogic {
    /// Audit rows, oldest first, optionally restricted to one operation.
    pub fn entries(pool: &mut DbPool, operation: Option<&str>) -> AppResult<Vec<LogEntry>> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log
             WHERE ?1 IS NULL OR operation = ?1
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map(params![operation], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok(LogEntry {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                message: row.get(4)?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn print_log(pool: &mut DbPool, operation: Option<&str>) -> AppResult<()> {
        let entries = Self::entries(pool, operation)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let labels: Vec<String> = entries
            .iter()
            .map(|e| {
                let color = color_for_operation(&e.operation);
                let label = if e.target.is_empty() {
                    color.paint(e.operation.as_str()).to_string()
                } else {
                    format!("{} ({})", color.paint(e.operation.as_str()), e.target)
                };
                truncate_visible(&label, MAX_OP_WIDTH, color)
            })
            .collect();

        let op_w = labels
            .iter()
            .map(|l| strip_ansi(l).width())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for (e, label) in entries.iter().zip(labels) {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&label).width()));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                label,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

/// Cut a coloured label to `max` visible columns, keeping the first word coloured.
fn truncate_visible(label: &str, max: usize, color: Colour) -> String {
    let visible = strip_ansi(label);
    if visible.width() <= max {
        return label.to_string();
    }

    let mut cut = String::new();
    for ch in visible.chars() {
        if cut.width() + ch.width().unwrap_or(0) + 3 > max {
            break;
        }
        cut.push(ch);
    }
    cut.push_str("...");

    match cut.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(cut.as_str()).to_string(),
    }
}
