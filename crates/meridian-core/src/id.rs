//! Identifier types for the information graph
//!
//! Every name in the graph is a path of fixed-width fragments. A full
//! identifier concatenates one or more fragments and names a path from a
//! graph root down to a scope or an information item. The same entity may
//! carry several full identifiers when it is published under more than one
//! parent scope.

use std::fmt;

use crate::{MeridianError, MeridianResult};

/// Width of a single identifier fragment in bytes.
pub const FRAG_LEN: usize = 8;

/// A single fixed-width identifier unit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fragment(pub [u8; FRAG_LEN]);

impl Fragment {
    /// The all-ones fragment, reserved for the control channel root.
    pub const WILDCARD: Fragment = Fragment([0xFF; FRAG_LEN]);

    #[inline]
    pub fn new(bytes: [u8; FRAG_LEN]) -> Self {
        Fragment(bytes)
    }

    /// Big-endian so that `Fragment::from_u64(1)` reads `0000000000000001`.
    #[inline]
    pub fn from_u64(v: u64) -> Self {
        Fragment(v.to_be_bytes())
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; FRAG_LEN] {
        &self.0
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; FRAG_LEN] {
        self.0
    }

    #[inline]
    pub fn from_slice(bytes: &[u8]) -> MeridianResult<Self> {
        let arr: [u8; FRAG_LEN] = bytes
            .try_into()
            .map_err(|_| MeridianError::MalformedIdentifier(bytes.len()))?;
        Ok(Fragment(arr))
    }

    #[inline]
    pub fn is_wildcard(self) -> bool {
        self == Fragment::WILDCARD
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A full identifier: zero or more fragments naming a path in the graph.
///
/// The empty identifier is valid only as a prefix (a root scope has an
/// empty prefix). Entities are always named by at least one fragment.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FullId(Vec<u8>);

impl FullId {
    /// The empty identifier (the prefix of a root scope).
    pub fn empty() -> Self {
        FullId(Vec::new())
    }

    /// A single-fragment identifier.
    pub fn single(frag: Fragment) -> Self {
        FullId(frag.to_bytes().to_vec())
    }

    pub fn from_fragments(frags: &[Fragment]) -> Self {
        let mut bytes = Vec::with_capacity(frags.len() * FRAG_LEN);
        for f in frags {
            bytes.extend_from_slice(f.as_bytes());
        }
        FullId(bytes)
    }

    /// Validate raw bytes as a whole number of fragments.
    pub fn from_bytes(bytes: &[u8]) -> MeridianResult<Self> {
        if bytes.len() % FRAG_LEN != 0 {
            return Err(MeridianError::MalformedIdentifier(bytes.len()));
        }
        Ok(FullId(bytes.to_vec()))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fragments in this identifier.
    #[inline]
    pub fn fragment_count(&self) -> usize {
        self.0.len() / FRAG_LEN
    }

    /// The `i`-th fragment. Panics if out of range.
    pub fn fragment(&self, i: usize) -> Fragment {
        let start = i * FRAG_LEN;
        Fragment::from_slice(&self.0[start..start + FRAG_LEN]).unwrap()
    }

    pub fn fragments(&self) -> impl Iterator<Item = Fragment> + '_ {
        self.0.chunks_exact(FRAG_LEN).map(|c| {
            let arr: [u8; FRAG_LEN] = c.try_into().unwrap();
            Fragment(arr)
        })
    }

    pub fn last_fragment(&self) -> Option<Fragment> {
        if self.is_empty() {
            None
        } else {
            Some(self.fragment(self.fragment_count() - 1))
        }
    }

    /// The identifier with the last fragment dropped. Empty for a
    /// single-fragment identifier, `None` for the empty identifier.
    pub fn prefix(&self) -> Option<FullId> {
        if self.is_empty() {
            None
        } else {
            Some(FullId(self.0[..self.0.len() - FRAG_LEN].to_vec()))
        }
    }

    /// Split into (everything but the last fragment, last fragment).
    pub fn split_last(&self) -> Option<(FullId, Fragment)> {
        let last = self.last_fragment()?;
        Some((self.prefix().unwrap(), last))
    }

    /// `self ∥ frag`.
    pub fn join(&self, frag: Fragment) -> FullId {
        let mut bytes = self.0.clone();
        bytes.extend_from_slice(frag.as_bytes());
        FullId(bytes)
    }

    /// `self ∥ other`.
    pub fn concat(&self, other: &FullId) -> FullId {
        let mut bytes = self.0.clone();
        bytes.extend_from_slice(other.as_bytes());
        FullId(bytes)
    }

    /// Does `prefix` name a strict ancestor path of this identifier?
    pub fn starts_with(&self, prefix: &FullId) -> bool {
        self.0.len() > prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }
}

impl fmt::Debug for FullId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "/");
        }
        for frag in self.fragments() {
            write!(f, "/{}", frag)?;
        }
        Ok(())
    }
}

impl fmt::Display for FullId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A pub/sub participant's node label. Exactly one fragment wide: the
/// control envelope has the form `WILDCARD ∥ label`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeLabel(pub Fragment);

impl NodeLabel {
    #[inline]
    pub fn new(frag: Fragment) -> Self {
        NodeLabel(frag)
    }

    #[inline]
    pub fn from_u64(v: u64) -> Self {
        NodeLabel(Fragment::from_u64(v))
    }

    #[inline]
    pub fn as_fragment(&self) -> Fragment {
        self.0
    }
}

impl fmt::Debug for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_from_u64() {
        let f = Fragment::from_u64(0x0102);
        assert_eq!(f.as_bytes(), &[0, 0, 0, 0, 0, 0, 0x01, 0x02]);
        assert_eq!(format!("{}", f), "0000000000000102");
    }

    #[test]
    fn test_wildcard() {
        assert!(Fragment::WILDCARD.is_wildcard());
        assert!(!Fragment::from_u64(1).is_wildcard());
    }

    #[test]
    fn test_full_id_prefix_and_join() {
        let a = Fragment::from_u64(1);
        let b = Fragment::from_u64(2);
        let id = FullId::single(a).join(b);

        assert_eq!(id.fragment_count(), 2);
        assert_eq!(id.last_fragment(), Some(b));
        assert_eq!(id.prefix(), Some(FullId::single(a)));
        assert_eq!(FullId::single(a).prefix(), Some(FullId::empty()));
        assert_eq!(FullId::empty().prefix(), None);
    }

    #[test]
    fn test_full_id_split_last() {
        let id = FullId::from_fragments(&[
            Fragment::from_u64(1),
            Fragment::from_u64(2),
            Fragment::from_u64(4),
        ]);
        let (head, tail) = id.split_last().unwrap();
        assert_eq!(head.fragment_count(), 2);
        assert_eq!(tail, Fragment::from_u64(4));
    }

    #[test]
    fn test_full_id_rejects_partial_fragment() {
        assert!(FullId::from_bytes(&[0u8; FRAG_LEN + 1]).is_err());
        assert!(FullId::from_bytes(&[0u8; FRAG_LEN * 2]).is_ok());
    }

    #[test]
    fn test_starts_with() {
        let parent = FullId::single(Fragment::from_u64(1));
        let child = parent.join(Fragment::from_u64(2));
        assert!(child.starts_with(&parent));
        assert!(!parent.starts_with(&child));
        assert!(!parent.starts_with(&parent));
        assert!(parent.starts_with(&FullId::empty()));
    }
}
