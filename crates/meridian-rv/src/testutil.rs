//! Shared helpers for handler tests

use meridian_core::{Fragment, FullId, NodeConfig, NodeLabel, Status, Strategy};
use meridian_wire::{control_identifier, Notification, RequestType, RvRequest, TmMessage};

use crate::engine::{Destination, OutboundPacket, RendezvousEngine};

pub(crate) const LOCAL: u64 = 0xF0;
pub(crate) const TM: u64 = 0xF1;

pub(crate) fn host(v: u64) -> NodeLabel {
    NodeLabel::from_u64(v)
}

pub(crate) fn fid(frags: &[u64]) -> FullId {
    FullId::from_fragments(&frags.iter().map(|&v| Fragment::from_u64(v)).collect::<Vec<_>>())
}

pub(crate) fn engine_with_tm() -> RendezvousEngine {
    let cfg = NodeConfig::new(host(LOCAL))
        .with_tm(host(TM))
        .with_internal_link_id(vec![0x01, 0x02, 0x03, 0x04])
        .with_broadcast_fid(vec![0xFF, 0xFF, 0xFF, 0xFF]);
    RendezvousEngine::new(cfg)
}

pub(crate) fn request(
    op: RequestType,
    id: FullId,
    prefix: FullId,
    strategy: Strategy,
) -> Vec<u8> {
    RvRequest::new(op, id, prefix, strategy).serialize()
}

/// Issue one request as `issuer` and unwrap the status.
pub(crate) fn apply(
    engine: &mut RendezvousEngine,
    issuer: u64,
    op: RequestType,
    id: FullId,
    prefix: FullId,
    strategy: Strategy,
) -> Status {
    let envelope = control_identifier(host(issuer));
    engine
        .handle_publication(&envelope, &request(op, id, prefix, strategy))
        .unwrap()
}

/// All queued packets bound for the topology manager, decoded.
pub(crate) fn tm_messages(packets: &[OutboundPacket]) -> Vec<TmMessage> {
    packets
        .iter()
        .filter(|p| p.destination == Destination::TopologyManager)
        .map(|p| TmMessage::parse(&p.payload).unwrap())
        .collect()
}

/// All queued notifications addressed to one host, decoded.
pub(crate) fn notifications_to(packets: &[OutboundPacket], label: NodeLabel) -> Vec<Notification> {
    packets
        .iter()
        .filter(|p| p.destination == Destination::Host(label))
        .map(|p| Notification::parse(&p.payload).unwrap())
        .collect()
}
