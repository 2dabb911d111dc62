//! Stable entity keys
//!
//! Entities are held in the store's maps and referenced everywhere else
//! by key. Keys are allocated from a counter and never reused, so a
//! stale key can only miss, never alias a different entity.

use std::fmt;

/// Key of a scope record in the store.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeKey(pub(crate) u64);

impl fmt::Debug for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scope(#{})", self.0)
    }
}

/// Key of an information item record in the store.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(pub(crate) u64);

impl fmt::Debug for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Item(#{})", self.0)
    }
}
