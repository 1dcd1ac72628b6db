//! Turns resolved records plus store overrides into the effective calendar.

use crate::core::ledger::OverrideLedger;
use crate::models::{HolidayRecord, HolidayView, OwnerRef};
use std::cmp::Ordering;

pub struct EffectiveCalendarBuilder;

impl EffectiveCalendarBuilder {
    /// Rows come out sorted by start date, then level precedence, then id.
    /// Overrides are only consulted for store targets.
    pub fn build(
        target: OwnerRef,
        records: Vec<HolidayRecord>,
        overrides: &OverrideLedger,
    ) -> Vec<HolidayView> {
        let mut views: Vec<HolidayView> = records
            .into_iter()
            .map(|source| {
                let is_inherited = source.owner_type != target.owner_type;

                let local = match (is_inherited, target.is_store(), source.id) {
                    (true, true, Some(id)) => {
                        overrides.get_override(target.owner_id, source.source_type(), id)
                    }
                    _ => None,
                };

                HolidayView {
                    is_inherited,
                    effective_is_operating: local.unwrap_or(source.is_operating),
                    is_overridden: local.is_some(),
                    badge_level: source.owner_type,
                    source,
                }
            })
            .collect();

        views.sort_by(compare_views);
        views
    }
}

fn compare_views(a: &HolidayView, b: &HolidayView) -> Ordering {
    a.source
        .start_date
        .cmp(&b.source.start_date)
        .then(a.badge_level.cmp(&b.badge_level))
        // persisted rows first, by id
        .then(a.source.id.is_none().cmp(&b.source.id.is_none()))
        .then(a.source.id.cmp(&b.source.id))
        .then_with(|| a.source.name.cmp(&b.source.name))
}
