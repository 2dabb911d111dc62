//! Control envelope identifiers
//!
//! All rendezvous traffic is published under `WILDCARD ∥ nodeLabel`,
//! where the wildcard is the reserved all-ones root fragment. The second
//! fragment names the node that issued (or should receive) the payload.

use meridian_core::{Fragment, FullId, MeridianError, MeridianResult, NodeLabel};

/// Identifier of the reserved control root scope.
pub fn control_root() -> FullId {
    FullId::single(Fragment::WILDCARD)
}

/// The control identifier for a given node: `WILDCARD ∥ label`.
pub fn control_identifier(label: NodeLabel) -> FullId {
    control_root().join(label.as_fragment())
}

/// A parsed control envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlEnvelope {
    /// The node the payload was published for / by.
    pub node: NodeLabel,
}

impl ControlEnvelope {
    /// Parse an envelope identifier. Anything but exactly two fragments
    /// with a leading wildcard is malformed.
    pub fn parse(id: &FullId) -> MeridianResult<Self> {
        if id.fragment_count() != 2 || !id.fragment(0).is_wildcard() {
            return Err(MeridianError::MalformedEnvelope);
        }
        Ok(ControlEnvelope {
            node: NodeLabel::new(id.fragment(1)),
        })
    }

    pub fn to_id(self) -> FullId {
        control_identifier(self.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_roundtrip() {
        let label = NodeLabel::from_u64(0xAB);
        let id = control_identifier(label);
        let env = ControlEnvelope::parse(&id).unwrap();
        assert_eq!(env.node, label);
        assert_eq!(env.to_id(), id);
    }

    #[test]
    fn test_envelope_rejects_wrong_root() {
        let id = FullId::single(Fragment::from_u64(1)).join(Fragment::from_u64(2));
        assert!(matches!(
            ControlEnvelope::parse(&id),
            Err(MeridianError::MalformedEnvelope)
        ));
    }

    #[test]
    fn test_envelope_rejects_wrong_arity() {
        assert!(ControlEnvelope::parse(&control_root()).is_err());

        let three = control_identifier(NodeLabel::from_u64(1)).join(Fragment::from_u64(2));
        assert!(ControlEnvelope::parse(&three).is_err());
    }
}
