use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calendar::CalendarLogic;
use crate::core::draft::derive_editable_state;
use crate::core::save::SaveLogic;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::OwnerRef;
use crate::ui::messages::success;

/// Overrides are saved as a full store bundle for the holiday's year,
/// so they go through the same validation and revision check as edits.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Override {
        store,
        holiday,
        open,
        closed,
        clear,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;
        let target = OwnerRef::store(*store);

        let source = queries::load_holiday(&pool.conn, *holiday)?
            .ok_or(AppError::HolidayNotFound(*holiday))?;
        let year = source.year;

        let snapshot = CalendarLogic::resolve(&pool.conn, target, year)?;
        if snapshot.owner_name.is_empty() {
            return Err(AppError::UnknownOrgNode {
                kind: "store",
                id: *store,
            });
        }

        let mut draft = derive_editable_state(&snapshot);
        let verb = if *clear {
            draft.clear_operating(*holiday)?;
            "follows the inherited setting"
        } else if *open {
            draft.set_operating(*holiday, true)?;
            "stays open"
        } else {
            debug_assert!(*closed);
            draft.set_operating(*holiday, false)?;
            "is closed"
        };

        let outcome = SaveLogic::apply(&mut pool, &draft.into_bundle())?;
        success(format!(
            "Store #{store} {verb} on '{}' ({year}). Revision {}.",
            source.name, outcome.revision
        ));
    }

    Ok(())
}
