//! Collects every holiday that applies to one node for one year.

use crate::core::hierarchy::{AncestorChain, HierarchyIndex};
use crate::errors::AppResult;
use crate::models::{ApplyChildType, HolidayRecord, OwnerRef, OwnerType};
use tracing::debug;

/// Anything that can list the holidays authored by one owner for one year.
pub trait HolidayStore {
    fn holidays_of(&self, owner: OwnerRef, year: i32) -> AppResult<Vec<HolidayRecord>>;
}

impl HolidayStore for [HolidayRecord] {
    fn holidays_of(&self, owner: OwnerRef, year: i32) -> AppResult<Vec<HolidayRecord>> {
        Ok(self
            .iter()
            .filter(|h| h.owner() == owner && h.year == year)
            .cloned()
            .collect())
    }
}

impl HolidayStore for rusqlite::Connection {
    fn holidays_of(&self, owner: OwnerRef, year: i32) -> AppResult<Vec<HolidayRecord>> {
        crate::db::queries::load_holidays_of(self, owner, year)
    }
}

pub struct HierarchyResolver<'a, S: HolidayStore + ?Sized> {
    index: &'a HierarchyIndex,
    store: &'a S,
}

impl<'a, S: HolidayStore + ?Sized> HierarchyResolver<'a, S> {
    pub fn new(index: &'a HierarchyIndex, store: &'a S) -> Self {
        Self { index, store }
    }

    /// Legal holidays, then the target's own, then whatever cascades from
    /// its ancestors. Same-date records are kept apart.
    pub fn resolve(&self, target: OwnerRef, year: i32) -> AppResult<Vec<HolidayRecord>> {
        let mut out = self.store.holidays_of(OwnerRef::legal(), year)?;

        if target.owner_type == OwnerType::Legal {
            return Ok(out);
        }

        let chain = self.index.ancestors(target);
        if !chain.known {
            debug!(%target, year, "unknown owner, legal holidays only");
            return Ok(out);
        }

        out.extend(self.store.holidays_of(target, year)?);

        for ancestor in chain.ancestors() {
            let inherited = self
                .store
                .holidays_of(ancestor, year)?
                .into_iter()
                .filter(|h| cascades_to(h, &chain));
            out.extend(inherited);
        }

        debug!(%target, year, records = out.len(), "resolved holidays");
        Ok(out)
    }
}

/// Whether an ancestor's record reaches the chain's target.
pub fn cascades_to(record: &HolidayRecord, chain: &AncestorChain) -> bool {
    let owner = record.owner();
    match (owner.owner_type, chain.target.owner_type) {
        (OwnerType::Legal, _) => true,
        (OwnerType::HeadOffice, OwnerType::Store) if chain.head_office == Some(owner.owner_id) => {
            if chain.franchise.is_some() {
                record.applies_to_child(ApplyChildType::AllFranchiseStores)
            } else {
                record.applies_to_child(ApplyChildType::AllHeadOfficeStores)
            }
        }
        // A franchise sees what its head office forwards to franchise stores.
        (OwnerType::HeadOffice, OwnerType::Franchise)
            if chain.head_office == Some(owner.owner_id) =>
        {
            record.applies_to_child(ApplyChildType::AllFranchiseStores)
        }
        (OwnerType::Franchise, OwnerType::Store) if chain.franchise == Some(owner.owner_id) => {
            record.applies_to_child(ApplyChildType::AllFranchiseStores)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hierarchy::tests::sample_index;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn records() -> Vec<HolidayRecord> {
        vec![
            HolidayRecord::new(OwnerRef::legal(), 2025, "어린이날", d("2025-05-05")).with_id(1),
            HolidayRecord::new(OwnerRef::head_office(1), 2025, "창립기념일", d("2025-05-10"))
                .with_id(2)
                .applying_to(&[ApplyChildType::AllHeadOfficeStores]),
            HolidayRecord::new(OwnerRef::head_office(1), 2025, "워크숍", d("2025-06-02"))
                .with_id(3)
                .applying_to(&[ApplyChildType::AllFranchiseStores]),
            HolidayRecord::new(OwnerRef::franchise(5), 2025, "가맹 휴무", d("2025-07-01"))
                .with_id(4)
                .applying_to(&[ApplyChildType::AllFranchiseStores]),
            HolidayRecord::new(OwnerRef::store(10), 2025, "내부 공사", d("2025-03-03")).with_id(5),
            HolidayRecord::new(OwnerRef::legal(), 2024, "작년", d("2024-05-05")).with_id(6),
        ]
    }

    fn ids(rs: &[HolidayRecord]) -> Vec<i64> {
        let mut v: Vec<i64> = rs.iter().filter_map(|r| r.id).collect();
        v.sort();
        v
    }

    #[test]
    fn direct_store_gets_head_office_stores_records_only() {
        let idx = sample_index();
        let recs = records();
        let resolver = HierarchyResolver::new(&idx, recs.as_slice());
        assert_eq!(ids(&resolver.resolve(OwnerRef::store(10), 2025).unwrap()), vec![1, 2, 5]);
        assert_eq!(ids(&resolver.resolve(OwnerRef::store(11), 2025).unwrap()), vec![1, 2]);
    }

    #[test]
    fn franchise_store_gets_franchise_forwarded_records() {
        let idx = sample_index();
        let recs = records();
        let resolver = HierarchyResolver::new(&idx, recs.as_slice());
        // Not record 2: it only targets stores owned directly by the head office.
        assert_eq!(ids(&resolver.resolve(OwnerRef::store(20), 2025).unwrap()), vec![1, 3, 4]);
    }

    #[test]
    fn franchise_and_head_office_views() {
        let idx = sample_index();
        let recs = records();
        let resolver = HierarchyResolver::new(&idx, recs.as_slice());
        assert_eq!(ids(&resolver.resolve(OwnerRef::franchise(5), 2025).unwrap()), vec![1, 3, 4]);
        assert_eq!(ids(&resolver.resolve(OwnerRef::head_office(1), 2025).unwrap()), vec![1, 2, 3]);
        assert_eq!(ids(&resolver.resolve(OwnerRef::legal(), 2025).unwrap()), vec![1]);
    }

    #[test]
    fn unknown_owner_sees_legal_only() {
        let idx = sample_index();
        let recs = records();
        let resolver = HierarchyResolver::new(&idx, recs.as_slice());
        assert_eq!(ids(&resolver.resolve(OwnerRef::store(404), 2025).unwrap()), vec![1]);
        assert_eq!(ids(&resolver.resolve(OwnerRef::head_office(404), 2024).unwrap()), vec![6]);
    }

    #[test]
    fn same_date_records_are_not_merged() {
        let idx = sample_index();
        let recs = vec![
            HolidayRecord::new(OwnerRef::legal(), 2025, "어린이날", d("2025-05-05")).with_id(1),
            HolidayRecord::new(OwnerRef::head_office(1), 2025, "어린이날 휴무", d("2025-05-05"))
                .with_id(2)
                .applying_to(&[ApplyChildType::AllHeadOfficeStores]),
        ];
        let resolver = HierarchyResolver::new(&idx, recs.as_slice());
        assert_eq!(resolver.resolve(OwnerRef::store(10), 2025).unwrap().len(), 2);
    }
}
