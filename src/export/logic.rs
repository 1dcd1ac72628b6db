// src/export/logic.rs

use crate::core::calendar::CalendarLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::csv_export::export_csv;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_export::export_json;
use crate::export::model::HolidayExport;
use crate::models::OwnerRef;
use crate::ui::messages::warning;
use std::path::Path;
use tracing::info;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the resolved calendar of `target` for `year`.
    /// Returns the number of rows written; nothing is written for an empty calendar.
    pub fn export(
        pool: &mut DbPool,
        target: OwnerRef,
        year: i32,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let calendar = CalendarLogic::resolve(&pool.conn, target, year)?;
        let rows: Vec<HolidayExport> = calendar
            .infos
            .iter()
            .map(|v| HolidayExport::from_view(target, year, v))
            .collect();

        if rows.is_empty() {
            warning(format!("No holidays found for {target} in {year}."));
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        info!(%target, year, format = format.as_str(), rows = rows.len(), "calendar exported");
        Ok(rows.len())
    }
}
