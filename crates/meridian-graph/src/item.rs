//! Information item records

use std::collections::BTreeSet;

use meridian_core::{FullId, NodeLabel, Strategy};

use crate::ScopeKey;

/// A graph leaf: a named, individually addressable publication.
///
/// Items always live under at least one scope; there is no root form.
#[derive(Clone, Debug)]
pub struct InformationItem {
    /// Dissemination strategy, fixed at creation.
    pub strategy: Strategy,
    /// Every full identifier this item is known by.
    pub ids: BTreeSet<FullId>,
    /// Parent scopes; never empty while the item exists.
    pub parents: BTreeSet<ScopeKey>,
    pub publishers: BTreeSet<NodeLabel>,
    pub subscribers: BTreeSet<NodeLabel>,
}

impl InformationItem {
    pub fn new(strategy: Strategy, id: FullId) -> Self {
        let mut ids = BTreeSet::new();
        ids.insert(id);
        InformationItem {
            strategy,
            ids,
            parents: BTreeSet::new(),
            publishers: BTreeSet::new(),
            subscribers: BTreeSet::new(),
        }
    }

    /// No publishers and no subscribers left.
    pub fn is_collectable(&self) -> bool {
        self.publishers.is_empty() && self.subscribers.is_empty()
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
        let id = FullId::single(Fragment::from_u64(1)).join(Fragment::from_u64(2));
        let mut item = InformationItem::new(Strategy::DomainLocal, id);
        assert!(item.is_collectable());

        item.publishers.insert(NodeLabel::from_u64(0xA));
        assert!(!item.is_collectable());
    }
}
