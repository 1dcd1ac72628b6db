//! Per-store overrides of inherited holidays.
//!
//! The ledger only shadows source records; it never touches them.

use crate::models::{HolidaySourceType, ParentHolidayOperatingSetting};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverrideKey {
    pub store_id: i64,
    pub source_type: HolidaySourceType,
    pub source_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideLedger {
    entries: BTreeMap<OverrideKey, bool>,
}

impl OverrideLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger holding one store's settings.
    pub fn for_store(store_id: i64, settings: &[ParentHolidayOperatingSetting]) -> Self {
        let mut ledger = Self::new();
        ledger.load(store_id, settings);
        ledger
    }

    pub fn load(&mut self, store_id: i64, settings: &[ParentHolidayOperatingSetting]) {
        for s in settings {
            self.set_override(store_id, s.holiday_source_type, s.holiday_source_id, s.is_operating);
        }
    }

    pub fn get_override(
        &self,
        store_id: i64,
        source_type: HolidaySourceType,
        source_id: i64,
    ) -> Option<bool> {
        self.entries
            .get(&OverrideKey {
                store_id,
                source_type,
                source_id,
            })
            .copied()
    }

    /// Upsert. Setting the same value twice is a no-op.
    pub fn set_override(
        &mut self,
        store_id: i64,
        source_type: HolidaySourceType,
        source_id: i64,
        is_operating: bool,
    ) {
        self.entries.insert(
            OverrideKey {
                store_id,
                source_type,
                source_id,
            },
            is_operating,
        );
    }

    pub fn clear_override(&mut self, store_id: i64, source_type: HolidaySourceType, source_id: i64) {
        self.entries.remove(&OverrideKey {
            store_id,
            source_type,
            source_id,
        });
    }

    /// Flatten one store's entries, ordered by source.
    pub fn settings_for(&self, store_id: i64) -> Vec<ParentHolidayOperatingSetting> {
        self.entries
            .iter()
            .filter(|(k, _)| k.store_id == store_id)
            .map(|(k, v)| ParentHolidayOperatingSetting {
                holiday_source_type: k.source_type,
                holiday_source_id: k.source_id,
                is_operating: *v,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use HolidaySourceType::{Branch, Legal};

    #[test]
    fn set_is_idempotent_upsert() {
        let mut l = OverrideLedger::new();
        l.set_override(10, Branch, 2, true);
        l.set_override(10, Branch, 2, true);
        assert_eq!(l.len(), 1);
        l.set_override(10, Branch, 2, false);
        assert_eq!(l.get_override(10, Branch, 2), Some(false));
    }

    #[test]
    fn entries_are_scoped_per_store_and_source_type() {
        let mut l = OverrideLedger::new();
        l.set_override(10, Branch, 2, true);
        assert_eq!(l.get_override(11, Branch, 2), None);
        assert_eq!(l.get_override(10, Legal, 2), None);
    }

    #[test]
    fn clear_restores_absence() {
        let mut l = OverrideLedger::new();
        l.set_override(10, Legal, 1, true);
        l.clear_override(10, Legal, 1);
        assert_eq!(l.get_override(10, Legal, 1), None);
        assert!(l.is_empty());
        // clearing again is harmless
        l.clear_override(10, Legal, 1);
    }

    #[test]
    fn settings_round_trip_through_store_view() {
        let settings = vec![
            ParentHolidayOperatingSetting {
                holiday_source_type: Legal,
                holiday_source_id: 1,
                is_operating: true,
            },
            ParentHolidayOperatingSetting {
                holiday_source_type: Branch,
                holiday_source_id: 2,
                is_operating: false,
            },
        ];
        let l = OverrideLedger::for_store(10, &settings);
        assert_eq!(l.settings_for(10), settings);
        assert!(l.settings_for(11).is_empty());
    }
}
