//! Node configuration
//!
//! Built once by the embedding process and handed to the engine. The
//! forwarding identifiers are opaque LIPSIN blobs; the engine never looks
//! inside them.

use crate::NodeLabel;

/// Configuration for the rendezvous node.
#[derive(Clone, Debug)]
pub struct NodeConfig {
    /// This node's label.
    pub node_label: NodeLabel,
    /// The topology manager's node label, when one is deployed.
    pub tm_label: Option<NodeLabel>,
    /// Forwarding identifier of the internal link (node-local delivery).
    pub internal_link_id: Vec<u8>,
    /// Forwarding identifier covering the broadcast / single-hop domain.
    pub broadcast_fid: Vec<u8>,
}

impl NodeConfig {
    pub fn new(node_label: NodeLabel) -> Self {
        NodeConfig {
            node_label,
            tm_label: None,
            internal_link_id: Vec::new(),
            broadcast_fid: Vec::new(),
        }
    }

    pub fn with_tm(mut self, tm_label: NodeLabel) -> Self {
        self.tm_label = Some(tm_label);
        self
    }

    pub fn with_internal_link_id(mut self, fid: Vec<u8>) -> Self {
        self.internal_link_id = fid;
        self
    }

    pub fn with_broadcast_fid(mut self, fid: Vec<u8>) -> Self {
        self.broadcast_fid = fid;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let cfg = NodeConfig::new(NodeLabel::from_u64(7))
            .with_tm(NodeLabel::from_u64(9))
            .with_internal_link_id(vec![0x01]);

        assert_eq!(cfg.node_label, NodeLabel::from_u64(7));
        assert_eq!(cfg.tm_label, Some(NodeLabel::from_u64(9)));
        assert_eq!(cfg.internal_link_id, vec![0x01]);
        assert!(cfg.broadcast_fid.is_empty());
    }
}
