//! Outbound notification body codec
//!
//! Body layout:
//! - Byte 0: notification type
//! - Byte 1: number of identifiers
//! - Per identifier: `u8` length in fragments, then the bytes
//! - Optional trailing forwarding identifier: `u8` length in bytes, then
//!   the opaque blob (present on START, absent on STOP)

use meridian_core::{FullId, MeridianError, MeridianResult};

use crate::codec::{write_id_list, Reader};

/// Notification type byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NotificationType {
    StartPublish = 0x00,
    StopPublish = 0x01,
    ScopePublished = 0x02,
    ScopeUnpublished = 0x03,
}

impl NotificationType {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x00 => Some(NotificationType::StartPublish),
            0x01 => Some(NotificationType::StopPublish),
            0x02 => Some(NotificationType::ScopePublished),
            0x03 => Some(NotificationType::ScopeUnpublished),
            _ => None,
        }
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// A notification body sent to the local proxy or, via the topology
/// manager, to remote hosts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationType,
    /// Every full identifier the affected entity is known by.
    pub ids: Vec<FullId>,
    /// Opaque LIPSIN forwarding identifier; `None` for STOP and for
    /// scope announcements.
    pub fid: Option<Vec<u8>>,
}

impl Notification {
    pub fn new(kind: NotificationType, ids: Vec<FullId>) -> Self {
        Notification {
            kind,
            ids,
            fid: None,
        }
    }

    pub fn with_fid(mut self, fid: Vec<u8>) -> Self {
        self.fid = Some(fid);
        self
    }

    pub fn parse(buf: &[u8]) -> MeridianResult<Self> {
        let mut r = Reader::new(buf);

        let type_byte = r.u8()?;
        let kind = NotificationType::from_byte(type_byte)
            .ok_or(MeridianError::UnknownNotificationType(type_byte))?;

        let ids = r.id_list()?;

        let fid = if r.remaining() > 0 {
            let len = r.u8()? as usize;
            Some(r.bytes(len)?.to_vec())
        } else {
            None
        };

        Ok(Notification { kind, ids, fid })
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(self.kind.to_byte());
        write_id_list(&mut buf, &self.ids);
        if let Some(ref fid) = self.fid {
            buf.push(fid.len() as u8);
            buf.extend_from_slice(fid);
        }
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_core::Fragment;

    #[test]
    fn test_start_notification_roundtrip() {
        let ids = vec![
            FullId::single(Fragment::from_u64(1)).join(Fragment::from_u64(2)),
            FullId::single(Fragment::from_u64(3)).join(Fragment::from_u64(4)),
        ];
        let n = Notification::new(NotificationType::StartPublish, ids.clone())
            .with_fid(vec![0xDE, 0xAD, 0xBE, 0xEF]);

        let bytes = n.serialize();
        let parsed = Notification::parse(&bytes).unwrap();
        assert_eq!(parsed, n);
        assert_eq!(parsed.ids, ids);
    }

    #[test]
    fn test_stop_notification_has_no_fid() {
        let n = Notification::new(
            NotificationType::StopPublish,
            vec![FullId::single(Fragment::from_u64(1))],
        );
        let parsed = Notification::parse(&n.serialize()).unwrap();
        assert_eq!(parsed.kind, NotificationType::StopPublish);
        assert!(parsed.fid.is_none());
    }

    #[test]
    fn test_notification_unknown_type() {
        let mut bytes = Notification::new(NotificationType::ScopePublished, vec![]).serialize();
        bytes[0] = 0x7E;
        assert!(matches!(
            Notification::parse(&bytes),
            Err(MeridianError::UnknownNotificationType(0x7E))
        ));
    }

    #[test]
    fn test_notification_truncated_fid() {
        let n = Notification::new(NotificationType::StartPublish, vec![])
            .with_fid(vec![1, 2, 3, 4]);
        let bytes = n.serialize();
        assert!(Notification::parse(&bytes[..bytes.len() - 2]).is_err());
    }
}
