//! The rendezvous engine value
//!
//! Owns the graph store, the node configuration, and the outbound
//! packet queue. Nothing here is shared: the engine is driven by one
//! caller and every handler runs to completion before the next.

use std::collections::VecDeque;

use meridian_core::{Fragment, FullId, NodeConfig, NodeLabel, Strategy};
use meridian_graph::GraphStore;
use meridian_wire::{control_identifier, RequestType, RvRequest};

/// Where an outbound packet is headed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    /// A pub/sub node, addressed by label. The local proxy delivers
    /// co-located traffic itself and injects the rest into the network.
    Host(NodeLabel),
    /// The topology manager, under its well-known control identifier.
    TopologyManager,
}

/// Publication semantics for an outbound control packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublicationMode {
    /// Control traffic: published straight to the identifier.
    ImplicitRendezvous,
    /// START/STOP payloads: delivered immediately to interested parties.
    PublishNow,
}

/// One outbound packet, ready for the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundPacket {
    pub destination: Destination,
    /// Control identifier the payload is published under.
    pub identifier: FullId,
    pub mode: PublicationMode,
    pub payload: Vec<u8>,
}

/// The single-domain rendezvous engine.
#[derive(Debug)]
pub struct RendezvousEngine {
    pub(crate) config: NodeConfig,
    pub(crate) store: GraphStore,
    pub(crate) outgoing: VecDeque<OutboundPacket>,
}

impl RendezvousEngine {
    pub fn new(config: NodeConfig) -> Self {
        let mut store = GraphStore::new();
        store.register_local_host(config.node_label);
        RendezvousEngine {
            config,
            store,
            outgoing: VecDeque::new(),
        }
    }

    /// Emit the engine's own subscription to the reserved all-ones root
    /// scope, so the proxy starts feeding it pub/sub requests. Called
    /// once by the embedding pipeline at startup.
    pub fn bootstrap(&mut self) {
        let req = RvRequest::new(
            RequestType::SubscribeScope,
            FullId::single(Fragment::WILDCARD),
            FullId::empty(),
            Strategy::ImplicitRendezvous,
        );
        self.publish_control(
            Destination::Host(self.config.node_label),
            PublicationMode::ImplicitRendezvous,
            req.serialize(),
        );
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Pop the next outbound packet, oldest first.
    pub fn pop_outgoing(&mut self) -> Option<OutboundPacket> {
        self.outgoing.pop_front()
    }

    pub fn outgoing_len(&self) -> usize {
        self.outgoing.len()
    }

    pub fn drain_outgoing(&mut self) -> Vec<OutboundPacket> {
        self.outgoing.drain(..).collect()
    }

    #[inline]
    pub(crate) fn local_label(&self) -> NodeLabel {
        self.config.node_label
    }

    /// Queue a control publication. A packet for the topology manager is
    /// dropped (with a log line) when no TM is configured.
    pub(crate) fn publish_control(
        &mut self,
        destination: Destination,
        mode: PublicationMode,
        payload: Vec<u8>,
    ) {
        let identifier = match destination {
            Destination::Host(label) => control_identifier(label),
            Destination::TopologyManager => match self.config.tm_label {
                Some(tm) => control_identifier(tm),
                None => {
                    tracing::debug!("no topology manager configured, dropping request");
                    return;
                }
            },
        };
        self.outgoing.push_back(OutboundPacket {
            destination,
            identifier,
            mode,
            payload,
        });
    }
}
