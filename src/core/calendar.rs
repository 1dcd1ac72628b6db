//! Read path: hierarchy + records + overrides → resolved calendar.

use crate::core::builder::EffectiveCalendarBuilder;
use crate::core::hierarchy::HierarchyIndex;
use crate::core::ledger::OverrideLedger;
use crate::core::operating::{self, OperatingDay};
use crate::core::resolver::HierarchyResolver;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::{OwnerRef, OwnerType, ResolvedCalendar};
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use tracing::info;

pub struct CalendarLogic;

impl CalendarLogic {
    pub fn load_index(conn: &Connection) -> AppResult<HierarchyIndex> {
        Ok(HierarchyIndex::new(
            queries::load_head_offices(conn)?,
            queries::load_franchises(conn)?,
            queries::load_stores(conn)?,
        ))
    }

    /// Resolve the effective calendar of `target` for `year`.
    /// Unknown owners resolve to the legal calendar with an empty name.
    pub fn resolve(conn: &Connection, target: OwnerRef, year: i32) -> AppResult<ResolvedCalendar> {
        let index = Self::load_index(conn)?;
        Self::resolve_with(conn, &index, target, year)
    }

    pub fn resolve_with(
        conn: &Connection,
        index: &HierarchyIndex,
        target: OwnerRef,
        year: i32,
    ) -> AppResult<ResolvedCalendar> {
        let records = HierarchyResolver::new(index, conn).resolve(target, year)?;

        let ledger = if target.is_store() {
            OverrideLedger::for_store(
                target.owner_id,
                &queries::load_settings(conn, target.owner_id, year)?,
            )
        } else {
            OverrideLedger::new()
        };

        let infos = EffectiveCalendarBuilder::build(target, records, &ledger);
        let chain = index.ancestors(target);

        let head_office_name = match target.owner_type {
            OwnerType::HeadOffice => index.owner_name(target),
            _ => chain
                .head_office
                .and_then(|id| index.owner_name(OwnerRef::head_office(id))),
        };
        let franchise_name = match target.owner_type {
            OwnerType::Franchise => index.owner_name(target),
            _ => chain
                .franchise
                .and_then(|id| index.owner_name(OwnerRef::franchise(id))),
        };

        info!(%target, year, rows = infos.len(), "calendar resolved");

        Ok(ResolvedCalendar {
            holiday_own_type: target.owner_type,
            owner_id: target.owner_id,
            owner_name: index.owner_name(target).unwrap_or_default(),
            head_office_name,
            franchise_name,
            year,
            revision: queries::load_revision(conn, target, year)?,
            infos,
        })
    }

    /// Open/closed answer of `target` on `date`, next to the calendar of
    /// the date's year. Rows filed under the neighbouring years count too,
    /// so a period running over New Year is seen from both sides.
    pub fn operating_day(
        conn: &Connection,
        target: OwnerRef,
        date: NaiveDate,
    ) -> AppResult<(ResolvedCalendar, OperatingDay)> {
        let index = Self::load_index(conn)?;
        let calendar = Self::resolve_with(conn, &index, target, date.year())?;

        let mut views = calendar.infos.clone();
        for year in [date.year() - 1, date.year() + 1] {
            views.extend(Self::resolve_with(conn, &index, target, year)?.infos);
        }
        views.sort_by_key(|v| v.source.start_date);

        let day = operating::evaluate(&views, date);
        Ok((calendar, day))
    }
}
