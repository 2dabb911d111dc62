//! Dissemination strategy definitions
//!
//! Every scope and item carries a one-byte strategy fixed at creation.
//! Children inherit the strategy of the parent they are registered under;
//! a mismatch at publish time is rejected, never coerced.

/// Dissemination strategy attached to every entity in the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Strategy {
    /// Publishers and subscribers are co-located on this node; delivery
    /// goes through the local proxy over the internal link.
    NodeLocal = 0x00,

    /// Delivery over a single-hop link; no topology assistance.
    LinkLocal = 0x01,

    /// Domain-wide multicast; the topology manager computes forwarding
    /// identifiers spanning publishers and subscribers.
    #[default]
    DomainLocal = 0x02,

    /// The publication itself carries its forwarding identifier; the
    /// rendezvous engine stays out of the way.
    ImplicitRendezvous = 0x03,

    /// Flood over the broadcast forwarding identifier.
    Broadcast = 0x04,

    /// Anycast with a probing phase; publishers probe, subscribers learn
    /// the item set with a publisher count.
    Kanycast = 0x05,
}

impl Strategy {
    /// Parse from wire byte.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x00 => Some(Strategy::NodeLocal),
            0x01 => Some(Strategy::LinkLocal),
            0x02 => Some(Strategy::DomainLocal),
            0x03 => Some(Strategy::ImplicitRendezvous),
            0x04 => Some(Strategy::Broadcast),
            0x05 => Some(Strategy::Kanycast),
            _ => None,
        }
    }

    /// Convert to wire byte.
    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Does rendezvous under this strategy need the topology manager?
    pub fn needs_topology_manager(self) -> bool {
        matches!(self, Strategy::DomainLocal | Strategy::Kanycast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_roundtrip() {
        for s in [
            Strategy::NodeLocal,
            Strategy::LinkLocal,
            Strategy::DomainLocal,
            Strategy::ImplicitRendezvous,
            Strategy::Broadcast,
            Strategy::Kanycast,
        ] {
            assert_eq!(Strategy::from_byte(s.to_byte()), Some(s));
        }
        assert_eq!(Strategy::from_byte(0x77), None);
    }

    #[test]
    fn test_tm_assistance() {
        assert!(Strategy::DomainLocal.needs_topology_manager());
        assert!(Strategy::Kanycast.needs_topology_manager());
        assert!(!Strategy::NodeLocal.needs_topology_manager());
        assert!(!Strategy::Broadcast.needs_topology_manager());
    }
}
