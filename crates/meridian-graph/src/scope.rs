//! Scope records
//!
//! A scope is an internal graph node grouping child scopes and items
//! under a common identifier prefix. A republished scope has several
//! full identifiers and several parents; all of them resolve to the one
//! record.

use std::collections::BTreeSet;

use meridian_core::{FullId, NodeLabel, Strategy};

use crate::{ItemKey, ScopeKey};

/// An internal node of the information graph.
#[derive(Clone, Debug)]
pub struct Scope {
    /// Dissemination strategy, fixed at creation.
    pub strategy: Strategy,
    /// Every full identifier this scope is known by.
    pub ids: BTreeSet<FullId>,
    /// Parent scopes; empty for a root.
    pub parents: BTreeSet<ScopeKey>,
    pub child_scopes: BTreeSet<ScopeKey>,
    pub child_items: BTreeSet<ItemKey>,
    pub publishers: BTreeSet<NodeLabel>,
    pub subscribers: BTreeSet<NodeLabel>,
}

impl Scope {
    pub fn new(strategy: Strategy, id: FullId) -> Self {
        let mut ids = BTreeSet::new();
        ids.insert(id);
        Scope {
            strategy,
            ids,
            parents: BTreeSet::new(),
            child_scopes: BTreeSet::new(),
            child_items: BTreeSet::new(),
            publishers: BTreeSet::new(),
            subscribers: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// No publishers, no subscribers, no children. Such a scope must not
    /// survive the operation that emptied it.
    pub fn is_collectable(&self) -> bool {
        self.publishers.is_empty()
            && self.subscribers.is_empty()
            && self.child_scopes.is_empty()
            && self.child_items.is_empty()
    }

    pub fn ids_vec(&self) -> Vec<FullId> {
        self.ids.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_core::Fragment;

    #[test]
    fn test_collectable() {
        let mut s = Scope::new(Strategy::DomainLocal, FullId::single(Fragment::from_u64(1)));
        assert!(s.is_collectable());

        s.subscribers.insert(NodeLabel::from_u64(2));
        assert!(!s.is_collectable());
        s.subscribers.clear();

        s.child_items.insert(ItemKey(0));
        assert!(!s.is_collectable());
    }

    #[test]
    fn test_ids_vec_is_ordered() {
        let mut s = Scope::new(
            Strategy::DomainLocal,
            FullId::single(Fragment::from_u64(3)).join(Fragment::from_u64(4)),
        );
        s.ids
            .insert(FullId::single(Fragment::from_u64(1)).join(Fragment::from_u64(2)));

        let ids = s.ids_vec();
        assert_eq!(ids[0].fragment(0), Fragment::from_u64(1));
        assert_eq!(ids[1].fragment(0), Fragment::from_u64(3));
    }
}
