use crate::cli::parser::{Commands, HolidayCommand};
use crate::config::Config;
use crate::core::calendar::CalendarLogic;
use crate::core::del::DeleteLogic;
use crate::core::draft::derive_editable_state;
use crate::core::save::{SaveBundle, SaveLogic, SaveOutcome};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{HolidayRecord, OwnerRef, OwnerType, apply_child};
use crate::ui::messages::{error, info, success, warning};
use crate::utils::date::{check_year, in_year, parse_date};
use std::fs;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

fn report(outcome: &SaveOutcome) {
    success(format!(
        "Saved: {} inserted, {} updated, {} deleted, {} override(s). Revision {}.",
        outcome.inserted, outcome.updated, outcome.deleted, outcome.overrides, outcome.revision
    ));
    if outcome.orphaned_overrides > 0 {
        info(format!(
            "{} store override(s) pointed at deleted holidays and were removed.",
            outcome.orphaned_overrides
        ));
    }
}

/// Validation failures are listed row by row before the error is returned.
fn save(pool: &mut DbPool, bundle: &SaveBundle) -> AppResult<SaveOutcome> {
    match SaveLogic::apply(pool, bundle) {
        Err(AppError::Validation(errors)) => {
            for e in &errors {
                error(e);
            }
            Err(AppError::Validation(errors))
        }
        other => other,
    }
}

fn owner_of(owner_type: OwnerType, owner_id: Option<i64>) -> AppResult<OwnerRef> {
    match (owner_type, owner_id) {
        (OwnerType::Legal, _) => Ok(OwnerRef::legal()),
        (t, Some(id)) => Ok(OwnerRef::new(t, id)),
        (t, None) => Err(AppError::InvalidOwnerType(format!("{t} requires --owner-id"))),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Holiday { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            HolidayCommand::Add {
                year,
                owner_type,
                owner_id,
                name,
                start,
                end,
                operating,
                apply,
            } => {
                let year = check_year(*year)?;
                let owner = owner_of(*owner_type, *owner_id)?;
                let start = parse_date(start)?;

                let mut record = HolidayRecord::new(owner, year, name.trim(), start).operating(*operating);
                if let Some(end) = end {
                    record = record.with_period(parse_date(end)?);
                }
                if let Some(raw) = apply {
                    record = record.applying_to(&apply_child::parse_list(raw)?);
                }
                if !in_year(start, year) {
                    warning(format!("{start} is outside {year}; the holiday is still filed under {year}."));
                }

                let snapshot = CalendarLogic::resolve(&pool.conn, owner, year)?;
                let mut draft = derive_editable_state(&snapshot);
                draft.add_holiday(record);

                let outcome = save(&mut pool, &draft.into_bundle())?;
                if let Some(id) = outcome.inserted_ids.first() {
                    success(format!("Holiday #{id} '{}' added to {owner} for {year}.", name.trim()));
                }
                report(&outcome);
            }

            HolidayCommand::Save { file } => {
                let content = fs::read_to_string(file)?;
                let bundle: SaveBundle = serde_json::from_str(&content)
                    .map_err(|e| AppError::InvalidBundle(format!("{file}: {e}")))?;
                check_year(bundle.year)?;

                let outcome = save(&mut pool, &bundle)?;
                report(&outcome);
            }

            HolidayCommand::Del {
                owner_type,
                id,
                yes,
            } => {
                let prompt = format!(
                    "Delete {owner_type} holiday #{id}? Store overrides pointing at it are removed too. This action is irreversible."
                );

                if !*yes && !ask_confirmation(&prompt) {
                    info("Operation cancelled.");
                    return Ok(());
                }

                let outcome = DeleteLogic::apply(&mut pool, *owner_type, *id)?;
                success(format!(
                    "Holiday #{id} '{}' has been deleted ({} override(s) removed).",
                    outcome.record.name, outcome.orphaned_overrides
                ));
            }
        }
    }

    Ok(())
}
