//! Remote host records
//!
//! A host is a pub/sub participant known only by its node label. The
//! four ownership sets mirror the entity-side publisher/subscriber sets:
//! a host appears in an entity's set exactly when one of the entity's
//! identifiers appears in the host's matching set here.

use std::collections::BTreeSet;

use meridian_core::{FullId, NodeLabel};

/// A pub/sub participant.
#[derive(Clone, Debug)]
pub struct RemoteHost {
    pub label: NodeLabel,
    /// Set when this record represents the node the engine runs on.
    pub local: bool,
    pub published_scopes: BTreeSet<FullId>,
    pub subscribed_scopes: BTreeSet<FullId>,
    pub published_items: BTreeSet<FullId>,
    pub subscribed_items: BTreeSet<FullId>,
}

impl RemoteHost {
    pub fn new(label: NodeLabel) -> Self {
        RemoteHost {
            label,
            local: false,
            published_scopes: BTreeSet::new(),
            subscribed_scopes: BTreeSet::new(),
            published_items: BTreeSet::new(),
            subscribed_items: BTreeSet::new(),
        }
    }

    /// Holds no pub/sub references at all.
    pub fn is_idle(&self) -> bool {
        self.published_scopes.is_empty()
            && self.subscribed_scopes.is_empty()
            && self.published_items.is_empty()
            && self.subscribed_items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_core::Fragment;

    #[test]
    fn test_idle() {
        let mut h = RemoteHost::new(NodeLabel::from_u64(0xA));
        assert!(h.is_idle());

        h.subscribed_scopes
            .insert(FullId::single(Fragment::from_u64(1)));
        assert!(!h.is_idle());
    }
}
