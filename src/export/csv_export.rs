use crate::errors::AppResult;
use crate::export::{HolidayExport, notify_export_success};
use crate::ui::messages::info;
use std::path::Path;

/// CSV with a header row derived from the field names.
pub(crate) fn export_csv(rows: &[HolidayExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
