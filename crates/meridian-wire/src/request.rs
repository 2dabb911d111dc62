//! Inbound request codec
//!
//! Payload layout after envelope stripping:
//! - Byte 0: request type
//! - Byte 1: ID length in fragments
//! - ID bytes
//! - Next byte: prefix ID length in fragments
//! - Prefix ID bytes
//! - Last byte: strategy

use meridian_core::{FullId, MeridianError, MeridianResult, Strategy};

use crate::codec::Reader;

/// The eight mutation operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RequestType {
    PublishScope = 0x00,
    PublishInfo = 0x01,
    UnpublishScope = 0x02,
    UnpublishInfo = 0x03,
    SubscribeScope = 0x04,
    SubscribeInfo = 0x05,
    UnsubscribeScope = 0x06,
    UnsubscribeInfo = 0x07,
}

impl RequestType {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x00 => Some(RequestType::PublishScope),
            0x01 => Some(RequestType::PublishInfo),
            0x02 => Some(RequestType::UnpublishScope),
            0x03 => Some(RequestType::UnpublishInfo),
            0x04 => Some(RequestType::SubscribeScope),
            0x05 => Some(RequestType::SubscribeInfo),
            0x06 => Some(RequestType::UnsubscribeScope),
            0x07 => Some(RequestType::UnsubscribeInfo),
            _ => None,
        }
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Does this operation target a scope (as opposed to an item)?
    pub fn targets_scope(self) -> bool {
        matches!(
            self,
            RequestType::PublishScope
                | RequestType::UnpublishScope
                | RequestType::SubscribeScope
                | RequestType::UnsubscribeScope
        )
    }

    pub fn is_publish(self) -> bool {
        matches!(self, RequestType::PublishScope | RequestType::PublishInfo)
    }

    pub fn is_subscribe(self) -> bool {
        matches!(
            self,
            RequestType::SubscribeScope | RequestType::SubscribeInfo
        )
    }
}

/// Shape of a request, classified by fragment counts of (prefix, ID).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestShape {
    /// Empty prefix, single-fragment ID: a root-scope operation.
    Root,
    /// Non-empty prefix, single-fragment ID: an operation under an
    /// existing parent.
    Inner,
    /// Non-empty prefix, multi-fragment ID: republish an existing entity
    /// under an additional parent (publish operations only).
    Republish,
}

/// A decoded pub/sub request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RvRequest {
    pub op: RequestType,
    pub id: FullId,
    pub prefix: FullId,
    pub strategy: Strategy,
}

impl RvRequest {
    pub fn new(op: RequestType, id: FullId, prefix: FullId, strategy: Strategy) -> Self {
        RvRequest {
            op,
            id,
            prefix,
            strategy,
        }
    }

    /// Parse a request payload.
    pub fn parse(buf: &[u8]) -> MeridianResult<Self> {
        let mut r = Reader::new(buf);

        let op = RequestType::from_byte(r.u8()?)
            .ok_or_else(|| MeridianError::UnknownRequestType(buf[0]))?;

        let id_frags = r.u8()? as usize;
        let id = r.id(id_frags)?;

        let prefix_frags = r.u8()? as usize;
        let prefix = r.id(prefix_frags)?;

        let strategy_byte = r.u8()?;
        let strategy = Strategy::from_byte(strategy_byte)
            .ok_or(MeridianError::UnknownStrategy(strategy_byte))?;

        Ok(RvRequest {
            op,
            id,
            prefix,
            strategy,
        })
    }

    /// Serialize to a request payload.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4 + self.id.len() + self.prefix.len());
        buf.push(self.op.to_byte());
        buf.push(self.id.fragment_count() as u8);
        buf.extend_from_slice(self.id.as_bytes());
        buf.push(self.prefix.fragment_count() as u8);
        buf.extend_from_slice(self.prefix.as_bytes());
        buf.push(self.strategy.to_byte());
        buf
    }

    /// Classify the request shape, or reject it.
    ///
    /// Any combination of fragment counts not listed in [`RequestShape`]
    /// is a protocol error; the dispatcher rejects it without touching
    /// the graph.
    pub fn shape(&self) -> MeridianResult<RequestShape> {
        let p = self.prefix.fragment_count();
        let n = self.id.fragment_count();

        let shape = match (p, n) {
            (0, 1) if self.op.targets_scope() => RequestShape::Root,
            (_, 1) if p >= 1 => RequestShape::Inner,
            (_, n) if p >= 1 && n >= 2 && self.op.is_publish() => RequestShape::Republish,
            _ => {
                return Err(MeridianError::ImpossibleShape { prefix: p, id: n });
            }
        };
        Ok(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_core::Fragment;

    fn frag(v: u64) -> Fragment {
        Fragment::from_u64(v)
    }

    #[test]
    fn test_request_roundtrip() {
        let req = RvRequest::new(
            RequestType::PublishInfo,
            FullId::single(frag(2)),
            FullId::single(frag(1)),
            Strategy::DomainLocal,
        );

        let bytes = req.serialize();
        let parsed = RvRequest::parse(&bytes).unwrap();
        assert_eq!(parsed, req);
    }

    #[test]
    fn test_request_unknown_type() {
        let mut bytes = RvRequest::new(
            RequestType::PublishScope,
            FullId::single(frag(1)),
            FullId::empty(),
            Strategy::NodeLocal,
        )
        .serialize();
        bytes[0] = 0x55;
        assert!(matches!(
            RvRequest::parse(&bytes),
            Err(MeridianError::UnknownRequestType(0x55))
        ));
    }

    #[test]
    fn test_request_truncated() {
        let bytes = RvRequest::new(
            RequestType::SubscribeScope,
            FullId::single(frag(1)),
            FullId::empty(),
            Strategy::DomainLocal,
        )
        .serialize();
        assert!(RvRequest::parse(&bytes[..bytes.len() - 2]).is_err());
    }

    #[test]
    fn test_shape_classification() {
        let root = RvRequest::new(
            RequestType::PublishScope,
            FullId::single(frag(1)),
            FullId::empty(),
            Strategy::DomainLocal,
        );
        assert_eq!(root.shape().unwrap(), RequestShape::Root);

        let inner = RvRequest::new(
            RequestType::SubscribeInfo,
            FullId::single(frag(2)),
            FullId::single(frag(1)),
            Strategy::DomainLocal,
        );
        assert_eq!(inner.shape().unwrap(), RequestShape::Inner);

        let republish = RvRequest::new(
            RequestType::PublishScope,
            FullId::from_fragments(&[frag(1), frag(2), frag(4)]),
            FullId::single(frag(3)),
            Strategy::DomainLocal,
        );
        assert_eq!(republish.shape().unwrap(), RequestShape::Republish);
    }

    #[test]
    fn test_impossible_shapes_rejected() {
        // A root-form item publication: items always have a parent.
        let root_item = RvRequest::new(
            RequestType::PublishInfo,
            FullId::single(frag(1)),
            FullId::empty(),
            Strategy::DomainLocal,
        );
        assert!(root_item.shape().is_err());

        // Multi-fragment ID on a non-publish operation.
        let bad = RvRequest::new(
            RequestType::SubscribeScope,
            FullId::from_fragments(&[frag(1), frag(2)]),
            FullId::single(frag(3)),
            Strategy::DomainLocal,
        );
        assert!(bad.shape().is_err());

        // Empty ID.
        let empty = RvRequest::new(
            RequestType::PublishScope,
            FullId::empty(),
            FullId::empty(),
            Strategy::DomainLocal,
        );
        assert!(empty.shape().is_err());
    }
}
