use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calendar::CalendarLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::{OwnerType, ResolvedCalendar};
use crate::ui::messages::{header, info};
use crate::utils::colors::{color_for_level, color_for_operating, colorize_optional, paint, YELLOW};
use crate::utils::date::{check_year, weekday_short};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Resolve {
        year,
        owner,
        own_only,
        json,
    } = cmd
    {
        let year = check_year(*year)?;
        let pool = DbPool::new(&cfg.database)?;

        let mut calendar = CalendarLogic::resolve(&pool.conn, owner.target(), year)?;
        if *own_only || cfg.own_only {
            calendar = calendar.own_only();
        }

        if *json {
            println!("{}", serde_json::to_string_pretty(&calendar)?);
        } else {
            print_calendar(&calendar, &cfg.separator_char);
        }
    }

    Ok(())
}

fn title(c: &ResolvedCalendar) -> String {
    let mut parts = Vec::new();
    if c.holiday_own_type != OwnerType::HeadOffice
        && let Some(ho) = &c.head_office_name
    {
        parts.push(ho.clone());
    }
    if c.holiday_own_type != OwnerType::Franchise
        && let Some(fr) = &c.franchise_name
    {
        parts.push(fr.clone());
    }
    let name = if c.owner_name.is_empty() {
        format!("{} (unknown, legal holidays only)", c.owner())
    } else {
        format!("{} {}", c.owner(), c.owner_name)
    };
    parts.push(name);
    format!("{} · {} (rev {})", parts.join(" › "), c.year, c.revision)
}

fn print_calendar(c: &ResolvedCalendar, sep: &str) {
    header(title(c), sep);

    if c.infos.is_empty() {
        info("No holidays.");
        return;
    }

    let mut table = Table::new(
        vec![
            Column::new("ID"),
            Column::new("LEVEL"),
            Column::new("NAME"),
            Column::new("START"),
            Column::new("END"),
            Column::new("STATUS"),
            Column::new("NOTE"),
        ],
        sep,
    );

    for v in &c.infos {
        let src = &v.source;
        let start = src
            .start_date
            .map(|d| format!("{} {}", d, weekday_short(d)))
            .unwrap_or_default();
        let end = src
            .end_date
            .filter(|_| src.has_period)
            .map(|d| d.to_string());
        let status = if v.effective_is_operating { "open" } else { "closed" };

        let mut notes = Vec::new();
        if v.is_inherited {
            notes.push("inherited".to_string());
        }
        if v.is_overridden {
            notes.push(paint(YELLOW, "overridden"));
        }

        table.add_row(vec![
            src.id.map(|id| id.to_string()).unwrap_or_default(),
            paint(color_for_level(v.badge_level), v.badge_level.badge()),
            src.name.clone(),
            start,
            colorize_optional(end.as_deref()),
            paint(color_for_operating(v.effective_is_operating), status),
            notes.join(", "),
        ]);
    }

    print!("{}", table.render());
}
