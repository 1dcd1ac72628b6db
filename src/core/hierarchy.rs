//! Read-only index of the organization tree with a memoized ancestor lookup.

use crate::models::{Franchise, HeadOffice, OwnerRef, OwnerType, Store};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

/// Ancestors of one node. Unknown nodes get an empty chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AncestorChain {
    pub target: OwnerRef,
    pub known: bool,
    pub head_office: Option<i64>,
    pub franchise: Option<i64>,
}

impl AncestorChain {
    fn unknown(target: OwnerRef) -> Self {
        Self {
            target,
            known: false,
            head_office: None,
            franchise: None,
        }
    }

    /// Ancestors nearest-last: head office, then franchise.
    pub fn ancestors(&self) -> Vec<OwnerRef> {
        let mut out = Vec::with_capacity(2);
        if let Some(h) = self.head_office {
            out.push(OwnerRef::head_office(h));
        }
        if let Some(f) = self.franchise {
            out.push(OwnerRef::franchise(f));
        }
        out
    }

    /// True for a store owned directly by its head office.
    pub fn is_direct_store(&self) -> bool {
        self.target.is_store() && self.known && self.franchise.is_none()
    }
}

#[derive(Debug, Default)]
pub struct HierarchyIndex {
    head_offices: BTreeMap<i64, HeadOffice>,
    franchises: BTreeMap<i64, Franchise>,
    stores: BTreeMap<i64, Store>,
    chains: RwLock<HashMap<OwnerRef, AncestorChain>>,
}

impl HierarchyIndex {
    pub fn new(head_offices: Vec<HeadOffice>, franchises: Vec<Franchise>, stores: Vec<Store>) -> Self {
        Self {
            head_offices: head_offices.into_iter().map(|h| (h.id, h)).collect(),
            franchises: franchises.into_iter().map(|f| (f.id, f)).collect(),
            stores: stores.into_iter().map(|s| (s.id, s)).collect(),
            chains: RwLock::new(HashMap::new()),
        }
    }

    pub fn head_office(&self, id: i64) -> Option<&HeadOffice> {
        self.head_offices.get(&id)
    }

    pub fn franchise(&self, id: i64) -> Option<&Franchise> {
        self.franchises.get(&id)
    }

    pub fn store(&self, id: i64) -> Option<&Store> {
        self.stores.get(&id)
    }

    pub fn head_offices(&self) -> impl Iterator<Item = &HeadOffice> {
        self.head_offices.values()
    }

    pub fn franchises_of(&self, head_office_id: i64) -> impl Iterator<Item = &Franchise> {
        self.franchises
            .values()
            .filter(move |f| f.head_office_id == head_office_id)
    }

    /// Stores directly under a head office (`franchise == None`) or under a franchise.
    pub fn stores_of(&self, head_office_id: i64, franchise: Option<i64>) -> impl Iterator<Item = &Store> {
        self.stores
            .values()
            .filter(move |s| s.head_office_id == head_office_id && s.franchise_id == franchise)
    }

    pub fn contains(&self, owner: OwnerRef) -> bool {
        match owner.owner_type {
            OwnerType::Legal => true,
            OwnerType::HeadOffice => self.head_offices.contains_key(&owner.owner_id),
            OwnerType::Franchise => self.franchises.contains_key(&owner.owner_id),
            OwnerType::Store => self.stores.contains_key(&owner.owner_id),
        }
    }

    pub fn owner_name(&self, owner: OwnerRef) -> Option<String> {
        match owner.owner_type {
            OwnerType::Legal => Some("LEGAL".to_string()),
            OwnerType::HeadOffice => self.head_office(owner.owner_id).map(|h| h.name.clone()),
            OwnerType::Franchise => self.franchise(owner.owner_id).map(|f| f.name.clone()),
            OwnerType::Store => self.store(owner.owner_id).map(|s| s.name.clone()),
        }
    }

    /// Memoized ancestor chain for `target`.
    pub fn ancestors(&self, target: OwnerRef) -> AncestorChain {
        if let Ok(cache) = self.chains.read()
            && let Some(chain) = cache.get(&target)
        {
            return *chain;
        }

        let chain = self.compute_chain(target);

        if let Ok(mut cache) = self.chains.write() {
            cache.insert(target, chain);
        }
        chain
    }

    fn compute_chain(&self, target: OwnerRef) -> AncestorChain {
        match target.owner_type {
            OwnerType::Legal => AncestorChain {
                target,
                known: true,
                head_office: None,
                franchise: None,
            },
            OwnerType::HeadOffice => match self.head_office(target.owner_id) {
                Some(_) => AncestorChain {
                    target,
                    known: true,
                    head_office: None,
                    franchise: None,
                },
                None => AncestorChain::unknown(target),
            },
            OwnerType::Franchise => match self.franchise(target.owner_id) {
                Some(f) => AncestorChain {
                    target,
                    known: true,
                    head_office: Some(f.head_office_id),
                    franchise: None,
                },
                None => AncestorChain::unknown(target),
            },
            OwnerType::Store => match self.store(target.owner_id) {
                Some(s) => AncestorChain {
                    target,
                    known: true,
                    head_office: Some(s.head_office_id),
                    franchise: s.franchise_id,
                },
                None => AncestorChain::unknown(target),
            },
        }
    }

    #[cfg(test)]
    fn cached_chains(&self) -> usize {
        self.chains.read().map(|c| c.len()).unwrap_or(0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Head office 1 with direct stores 10, 11 and franchise 5 owning store 20.
    pub(crate) fn sample_index() -> HierarchyIndex {
        HierarchyIndex::new(
            vec![HeadOffice {
                id: 1,
                name: "A".into(),
            }],
            vec![Franchise {
                id: 5,
                head_office_id: 1,
                name: "A-가맹".into(),
            }],
            vec![
                Store {
                    id: 10,
                    head_office_id: 1,
                    franchise_id: None,
                    name: "A-강남점".into(),
                },
                Store {
                    id: 11,
                    head_office_id: 1,
                    franchise_id: None,
                    name: "A-역삼점".into(),
                },
                Store {
                    id: 20,
                    head_office_id: 1,
                    franchise_id: Some(5),
                    name: "A-가맹-홍대점".into(),
                },
            ],
        )
    }

    #[test]
    fn store_chain_includes_franchise() {
        let idx = sample_index();
        let chain = idx.ancestors(OwnerRef::store(20));
        assert!(chain.known);
        assert_eq!(chain.head_office, Some(1));
        assert_eq!(chain.franchise, Some(5));
        assert!(!chain.is_direct_store());
        assert_eq!(
            chain.ancestors(),
            vec![OwnerRef::head_office(1), OwnerRef::franchise(5)]
        );
    }

    #[test]
    fn direct_store_has_no_franchise() {
        let idx = sample_index();
        let chain = idx.ancestors(OwnerRef::store(10));
        assert!(chain.is_direct_store());
        assert_eq!(chain.ancestors(), vec![OwnerRef::head_office(1)]);
    }

    #[test]
    fn unknown_node_degrades_to_empty_chain() {
        let idx = sample_index();
        let chain = idx.ancestors(OwnerRef::store(999));
        assert!(!chain.known);
        assert!(chain.ancestors().is_empty());
        assert_eq!(idx.owner_name(OwnerRef::store(999)), None);
    }

    #[test]
    fn chains_are_memoized_per_node() {
        let idx = sample_index();
        idx.ancestors(OwnerRef::store(10));
        idx.ancestors(OwnerRef::store(10));
        idx.ancestors(OwnerRef::franchise(5));
        assert_eq!(idx.cached_chains(), 2);
    }

    #[test]
    fn children_listing() {
        let idx = sample_index();
        let direct: Vec<i64> = idx.stores_of(1, None).map(|s| s.id).collect();
        assert_eq!(direct, vec![10, 11]);
        let via: Vec<i64> = idx.stores_of(1, Some(5)).map(|s| s.id).collect();
        assert_eq!(via, vec![20]);
    }
}
