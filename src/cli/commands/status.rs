use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calendar::CalendarLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{GREEN, RED, RESET, color_for_level, paint};
use crate::utils::date::{parse_date, weekday_short};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { date, owner } = cmd {
        let date = parse_date(date)?;
        let target = owner.target();
        let pool = DbPool::new(&cfg.database)?;

        let (calendar, day) = CalendarLogic::operating_day(&pool.conn, target, date)?;

        let label = if calendar.owner_name.is_empty() {
            target.to_string()
        } else {
            format!("{} {}", target, calendar.owner_name)
        };

        if day.operating {
            println!("{GREEN}OPEN{RESET}   {label} on {} ({})", date, weekday_short(date));
        } else {
            println!(
                "{RED}CLOSED{RESET} {label} on {} ({}), {} closing holiday(s)",
                date,
                weekday_short(date),
                day.closing().count()
            );
        }

        for v in &day.covering {
            let state = if v.effective_is_operating { "open" } else { "closed" };
            let note = if v.is_overridden { ", overridden" } else { "" };
            println!(
                "  {} {} ({}{})",
                paint(color_for_level(v.badge_level), v.badge_level.badge()),
                v.source.name,
                state,
                note
            );
        }
    }

    Ok(())
}
