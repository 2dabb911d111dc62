//! Scripted scenario bed
//!
//! A thin harness over the engine for end-to-end flows: build requests
//! the way the wire would carry them, hand them to the dispatcher, and
//! decode whatever comes out.

use meridian_core::{Fragment, FullId, NodeConfig, NodeLabel, Status, Strategy};
use meridian_rv::{Destination, OutboundPacket, RendezvousEngine};
use meridian_wire::{control_identifier, Notification, RequestType, RvRequest, TmMessage};

/// Label of the node the bed's engine runs on.
pub const LOCAL_NODE: u64 = 0xF0;
/// Label of the bed's topology manager.
pub const TM_NODE: u64 = 0xF1;

pub fn host(v: u64) -> NodeLabel {
    NodeLabel::from_u64(v)
}

pub fn fid(frags: &[u64]) -> FullId {
    FullId::from_fragments(&frags.iter().map(|&v| Fragment::from_u64(v)).collect::<Vec<_>>())
}

/// All packets bound for the topology manager, decoded.
pub fn tm_messages(packets: &[OutboundPacket]) -> Vec<TmMessage> {
    packets
        .iter()
        .filter(|p| p.destination == Destination::TopologyManager)
        .map(|p| TmMessage::parse(&p.payload).expect("bad TM payload"))
        .collect()
}

/// All notifications bound for one host, decoded.
pub fn notifications_to(packets: &[OutboundPacket], label: NodeLabel) -> Vec<Notification> {
    packets
        .iter()
        .filter(|p| p.destination == Destination::Host(label))
        .map(|p| Notification::parse(&p.payload).expect("bad notification payload"))
        .collect()
}

/// An engine plus request-building shorthand.
pub struct Bed {
    pub engine: RendezvousEngine,
}

impl Bed {
    pub fn new() -> Self {
        let cfg = NodeConfig::new(host(LOCAL_NODE))
            .with_tm(host(TM_NODE))
            .with_internal_link_id(vec![0x01; 8])
            .with_broadcast_fid(vec![0xFF; 8]);
        Bed {
            engine: RendezvousEngine::new(cfg),
        }
    }

    /// Issue one request and return its status; panics on a dispatch
    /// drop, which no scripted scenario expects.
    pub fn apply(
        &mut self,
        issuer: u64,
        op: RequestType,
        id: &[u64],
        prefix: &[u64],
        strategy: Strategy,
    ) -> Status {
        let req = RvRequest::new(op, fid(id), fid(prefix), strategy);
        self.engine
            .handle_publication(&control_identifier(host(issuer)), &req.serialize())
            .expect("request dropped at dispatch")
    }

    /// Issue one request, tolerating a dispatch drop.
    pub fn try_apply(
        &mut self,
        issuer: u64,
        op: RequestType,
        id: &[u64],
        prefix: &[u64],
        strategy: Strategy,
    ) -> Option<Status> {
        let req = RvRequest::new(op, fid(id), fid(prefix), strategy);
        self.engine
            .handle_publication(&control_identifier(host(issuer)), &req.serialize())
            .ok()
    }

    pub fn drain(&mut self) -> Vec<OutboundPacket> {
        self.engine.drain_outgoing()
    }
}

impl Default for Bed {
    fn default() -> Self {
        Bed::new()
    }
}
