//! Editable state derived from a resolved calendar snapshot.
//!
//! `derive_editable_state` is pure: call it again whenever a new snapshot
//! arrives. Edits stay local until `into_bundle` hands them to the save
//! protocol.

use crate::core::ledger::OverrideLedger;
use crate::core::save::SaveBundle;
use crate::errors::{AppError, AppResult};
use crate::models::{
    HolidayDraft, HolidayRecord, HolidaySourceType, OwnerRef, ParentHolidayOperatingSetting,
    ResolvedCalendar,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InheritedRow {
    source_type: HolidaySourceType,
    default_operating: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftState {
    pub owner: OwnerRef,
    pub year: i32,
    pub revision: i64,
    pub holidays: Vec<HolidayRecord>,
    inherited: BTreeMap<i64, InheritedRow>,
    overrides: OverrideLedger,
}

pub fn derive_editable_state(snapshot: &ResolvedCalendar) -> DraftState {
    let owner = snapshot.owner();
    let mut holidays = Vec::new();
    let mut inherited = BTreeMap::new();
    let mut overrides = OverrideLedger::new();

    for view in &snapshot.infos {
        if !view.is_inherited {
            holidays.push(view.source.clone());
            continue;
        }
        let Some(id) = view.source.id else { continue };
        let source_type = view.source.source_type();
        inherited.insert(
            id,
            InheritedRow {
                source_type,
                default_operating: view.source.is_operating,
            },
        );
        if owner.is_store() && view.is_overridden {
            overrides.set_override(owner.owner_id, source_type, id, view.effective_is_operating);
        }
    }

    DraftState {
        owner,
        year: snapshot.year,
        revision: snapshot.revision,
        holidays,
        inherited,
        overrides,
    }
}

impl DraftState {
    /// Append a row; owner and year are forced to the draft's own.
    pub fn add_holiday(&mut self, mut holiday: HolidayRecord) -> usize {
        holiday.id = None;
        holiday.owner_type = self.owner.owner_type;
        holiday.owner_id = self.owner.owner_id;
        holiday.year = self.year;
        self.holidays.push(holiday);
        self.holidays.len() - 1
    }

    /// Replace a row in place, keeping its persisted id.
    pub fn replace_holiday(&mut self, row: usize, mut holiday: HolidayRecord) -> AppResult<()> {
        let slot = self.holidays.get_mut(row).ok_or(AppError::DraftRow(row))?;
        holiday.id = slot.id;
        holiday.owner_type = self.owner.owner_type;
        holiday.owner_id = self.owner.owner_id;
        holiday.year = self.year;
        *slot = holiday;
        Ok(())
    }

    pub fn remove_holiday(&mut self, row: usize) -> AppResult<HolidayRecord> {
        if row >= self.holidays.len() {
            return Err(AppError::DraftRow(row));
        }
        Ok(self.holidays.remove(row))
    }

    /// Toggle the store's operating flag for an inherited holiday.
    /// Choosing the inherited default again removes the override.
    pub fn set_operating(&mut self, source_id: i64, is_operating: bool) -> AppResult<()> {
        let row = self.inherited_row(source_id)?;
        let store_id = self.owner.owner_id;
        if is_operating == row.default_operating {
            self.overrides.clear_override(store_id, row.source_type, source_id);
        } else {
            self.overrides
                .set_override(store_id, row.source_type, source_id, is_operating);
        }
        Ok(())
    }

    pub fn clear_operating(&mut self, source_id: i64) -> AppResult<()> {
        let row = self.inherited_row(source_id)?;
        self.overrides
            .clear_override(self.owner.owner_id, row.source_type, source_id);
        Ok(())
    }

    pub fn overrides(&self) -> Vec<ParentHolidayOperatingSetting> {
        self.overrides.settings_for(self.owner.owner_id)
    }

    fn inherited_row(&self, source_id: i64) -> AppResult<InheritedRow> {
        match self.inherited.get(&source_id) {
            Some(row) if self.owner.is_store() => Ok(*row),
            _ => Err(AppError::OverrideNotInherited {
                store_id: self.owner.owner_id,
                source_id,
                year: self.year,
            }),
        }
    }

    /// Full-set bundle guarded by the snapshot revision.
    pub fn into_bundle(self) -> SaveBundle {
        let parent_holiday_settings = if self.owner.is_store() {
            Some(self.overrides())
        } else {
            None
        };
        SaveBundle {
            owner_type: self.owner.owner_type,
            owner_id: self.owner.owner_id,
            year: self.year,
            holiday_infos: self.holidays.into_iter().map(HolidayDraft::from).collect(),
            parent_holiday_settings,
            expected_revision: Some(self.revision),
        }
    }
}
