//! Topology manager request codec
//!
//! The engine never waits for the topology manager; it publishes one of
//! these requests under the TM's control identifier and moves on. The TM
//! answers by publishing back through the substrate.
//!
//! Every request carries the strategy byte so the TM can pick the right
//! tree-building mode without guessing.

use meridian_core::{FullId, MeridianError, MeridianResult, NodeLabel, Strategy};

use crate::codec::{write_id_list, write_label_list, Reader};
use crate::NotificationType;

/// Topology manager request type byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TmRequestType {
    MatchPubSubs = 0x00,
    NotifySubscribers = 0x01,
    KanycastProbe = 0x02,
    KanycastNotify = 0x03,
}

impl TmRequestType {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x00 => Some(TmRequestType::MatchPubSubs),
            0x01 => Some(TmRequestType::NotifySubscribers),
            0x02 => Some(TmRequestType::KanycastProbe),
            0x03 => Some(TmRequestType::KanycastNotify),
            _ => None,
        }
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// A request published to the topology manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TmMessage {
    /// Match publishers with subscribers for an item: the TM computes a
    /// LIPSIN forwarding identifier spanning both sets and notifies the
    /// publishers directly. The identifiers are carried so the TM can
    /// name the item in those notifications.
    MatchPubSubs {
        strategy: Strategy,
        publishers: Vec<NodeLabel>,
        subscribers: Vec<NodeLabel>,
        ids: Vec<FullId>,
    },

    /// Deliver a scope announcement to remote subscribers on behalf of
    /// the rendezvous node.
    NotifySubscribers {
        request: NotificationType,
        strategy: Strategy,
        subscribers: Vec<NodeLabel>,
        ids: Vec<FullId>,
    },

    /// Kanycast phase one: ask publishers to emit a probing-scope
    /// message toward the subscribers.
    KanycastProbe {
        strategy: Strategy,
        publishers: Vec<NodeLabel>,
        subscribers: Vec<NodeLabel>,
        scope_ids: Vec<FullId>,
    },

    /// Kanycast phase two: tell subscribers which items live under the
    /// scope they joined, tagged with the publisher count.
    KanycastNotify {
        request: NotificationType,
        strategy: Strategy,
        publisher_count: u32,
        publishers: Vec<NodeLabel>,
        subscribers: Vec<NodeLabel>,
        item_ids: Vec<FullId>,
        scope_ids: Vec<FullId>,
    },
}

impl TmMessage {
    pub fn request_type(&self) -> TmRequestType {
        match self {
            TmMessage::MatchPubSubs { .. } => TmRequestType::MatchPubSubs,
            TmMessage::NotifySubscribers { .. } => TmRequestType::NotifySubscribers,
            TmMessage::KanycastProbe { .. } => TmRequestType::KanycastProbe,
            TmMessage::KanycastNotify { .. } => TmRequestType::KanycastNotify,
        }
    }

    pub fn parse(buf: &[u8]) -> MeridianResult<Self> {
        let mut r = Reader::new(buf);

        let type_byte = r.u8()?;
        let req_type = TmRequestType::from_byte(type_byte)
            .ok_or(MeridianError::UnknownTmRequestType(type_byte))?;

        match req_type {
            TmRequestType::MatchPubSubs => {
                let strategy = parse_strategy(&mut r)?;
                let publishers = r.label_list()?;
                let subscribers = r.label_list()?;
                let ids = r.id_list()?;
                Ok(TmMessage::MatchPubSubs {
                    strategy,
                    publishers,
                    subscribers,
                    ids,
                })
            }
            TmRequestType::NotifySubscribers => {
                let request = parse_notification_type(&mut r)?;
                let strategy = parse_strategy(&mut r)?;
                let subscribers = r.label_list()?;
                let ids = r.id_list()?;
                Ok(TmMessage::NotifySubscribers {
                    request,
                    strategy,
                    subscribers,
                    ids,
                })
            }
            TmRequestType::KanycastProbe => {
                let strategy = parse_strategy(&mut r)?;
                let publishers = r.label_list()?;
                let subscribers = r.label_list()?;
                let scope_ids = r.id_list()?;
                Ok(TmMessage::KanycastProbe {
                    strategy,
                    publishers,
                    subscribers,
                    scope_ids,
                })
            }
            TmRequestType::KanycastNotify => {
                let request = parse_notification_type(&mut r)?;
                let strategy = parse_strategy(&mut r)?;
                let count_bytes: [u8; 4] = r.bytes(4)?.try_into().unwrap();
                let publisher_count = u32::from_le_bytes(count_bytes);
                let publishers = r.label_list()?;
                let subscribers = r.label_list()?;
                let item_ids = r.id_list()?;
                let scope_ids = r.id_list()?;
                Ok(TmMessage::KanycastNotify {
                    request,
                    strategy,
                    publisher_count,
                    publishers,
                    subscribers,
                    item_ids,
                    scope_ids,
                })
            }
        }
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(self.request_type().to_byte());

        match self {
            TmMessage::MatchPubSubs {
                strategy,
                publishers,
                subscribers,
                ids,
            } => {
                buf.push(strategy.to_byte());
                write_label_list(&mut buf, publishers);
                write_label_list(&mut buf, subscribers);
                write_id_list(&mut buf, ids);
            }
            TmMessage::NotifySubscribers {
                request,
                strategy,
                subscribers,
                ids,
            } => {
                buf.push(request.to_byte());
                buf.push(strategy.to_byte());
                write_label_list(&mut buf, subscribers);
                write_id_list(&mut buf, ids);
            }
            TmMessage::KanycastProbe {
                strategy,
                publishers,
                subscribers,
                scope_ids,
            } => {
                buf.push(strategy.to_byte());
                write_label_list(&mut buf, publishers);
                write_label_list(&mut buf, subscribers);
                write_id_list(&mut buf, scope_ids);
            }
            TmMessage::KanycastNotify {
                request,
                strategy,
                publisher_count,
                publishers,
                subscribers,
                item_ids,
                scope_ids,
            } => {
                buf.push(request.to_byte());
                buf.push(strategy.to_byte());
                buf.extend_from_slice(&publisher_count.to_le_bytes());
                write_label_list(&mut buf, publishers);
                write_label_list(&mut buf, subscribers);
                write_id_list(&mut buf, item_ids);
                write_id_list(&mut buf, scope_ids);
            }
        }
        buf
    }
}

fn parse_strategy(r: &mut Reader<'_>) -> MeridianResult<Strategy> {
    let b = r.u8()?;
    Strategy::from_byte(b).ok_or(MeridianError::UnknownStrategy(b))
}

fn parse_notification_type(r: &mut Reader<'_>) -> MeridianResult<NotificationType> {
    let b = r.u8()?;
    NotificationType::from_byte(b).ok_or(MeridianError::UnknownNotificationType(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_core::Fragment;

    fn id(frags: &[u64]) -> FullId {
        FullId::from_fragments(&frags.iter().map(|&v| Fragment::from_u64(v)).collect::<Vec<_>>())
    }

    #[test]
    fn test_match_pub_subs_roundtrip() {
        let msg = TmMessage::MatchPubSubs {
            strategy: Strategy::DomainLocal,
            publishers: vec![NodeLabel::from_u64(0xA)],
            subscribers: vec![NodeLabel::from_u64(0xB), NodeLabel::from_u64(0xC)],
            ids: vec![id(&[1, 2])],
        };
        assert_eq!(TmMessage::parse(&msg.serialize()).unwrap(), msg);
    }

    #[test]
    fn test_notify_subscribers_roundtrip() {
        let msg = TmMessage::NotifySubscribers {
            request: NotificationType::ScopePublished,
            strategy: Strategy::DomainLocal,
            subscribers: vec![NodeLabel::from_u64(0xB)],
            ids: vec![id(&[1, 2]), id(&[3, 4])],
        };
        assert_eq!(TmMessage::parse(&msg.serialize()).unwrap(), msg);
    }

    #[test]
    fn test_kanycast_notify_roundtrip() {
        let msg = TmMessage::KanycastNotify {
            request: NotificationType::ScopePublished,
            strategy: Strategy::Kanycast,
            publisher_count: 3,
            publishers: vec![NodeLabel::from_u64(0xA)],
            subscribers: vec![NodeLabel::from_u64(0xB)],
            item_ids: vec![id(&[1, 2])],
            scope_ids: vec![id(&[1])],
        };
        assert_eq!(TmMessage::parse(&msg.serialize()).unwrap(), msg);
    }

    #[test]
    fn test_unknown_tm_type() {
        assert!(matches!(
            TmMessage::parse(&[0x66]),
            Err(MeridianError::UnknownTmRequestType(0x66))
        ));
    }
}
