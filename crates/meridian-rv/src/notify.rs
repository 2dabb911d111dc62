//! Notification emission
//!
//! Two kinds of packet leave the engine: ordinary control publications
//! to a host (the local proxy delivers co-located ones itself) and
//! requests published to the topology manager, which re-injects them
//! with per-destination forwarding identifiers.
//!
//! Emission order is stable: callers announce parent scopes before
//! children, and START/STOP only after the item's sets are final.

use std::collections::BTreeSet;

use meridian_core::{FullId, NodeLabel, Strategy};
use meridian_wire::{Notification, NotificationType, TmMessage};

use crate::engine::{Destination, PublicationMode, RendezvousEngine};

impl RendezvousEngine {
    /// Deliver a scope announcement to a set of subscribers: the local
    /// host through the proxy, everyone else via the topology manager.
    pub(crate) fn notify_subscribers(
        &mut self,
        kind: NotificationType,
        ids: &[FullId],
        strategy: Strategy,
        subscribers: &BTreeSet<NodeLabel>,
    ) {
        if subscribers.is_empty() || ids.is_empty() {
            return;
        }

        let local = self.local_label();
        if subscribers.contains(&local) {
            self.notify_local_subscriber(kind, ids);
        }

        let remote: Vec<NodeLabel> = subscribers
            .iter()
            .copied()
            .filter(|l| *l != local)
            .collect();
        if !remote.is_empty() {
            let msg = TmMessage::NotifySubscribers {
                request: kind,
                strategy,
                subscribers: remote,
                ids: ids.to_vec(),
            };
            self.publish_control(
                Destination::TopologyManager,
                PublicationMode::ImplicitRendezvous,
                msg.serialize(),
            );
        }
    }

    /// Publish a scope announcement to the local proxy, which fans it
    /// out to co-located interested parties.
    pub(crate) fn notify_local_subscriber(&mut self, kind: NotificationType, ids: &[FullId]) {
        let payload = Notification::new(kind, ids.to_vec()).serialize();
        self.publish_control(
            Destination::Host(self.local_label()),
            PublicationMode::ImplicitRendezvous,
            payload,
        );
    }

    /// START notification: the forwarding identifier tells the publisher
    /// where its data should go.
    pub(crate) fn notify_publisher_started(
        &mut self,
        target: NodeLabel,
        ids: &[FullId],
        fid: &[u8],
    ) {
        let payload = Notification::new(NotificationType::StartPublish, ids.to_vec())
            .with_fid(fid.to_vec())
            .serialize();
        self.publish_control(
            Destination::Host(target),
            PublicationMode::PublishNow,
            payload,
        );
    }

    /// STOP notification: no forwarding identifier.
    pub(crate) fn notify_publisher_stopped(&mut self, target: NodeLabel, ids: &[FullId]) {
        let payload = Notification::new(NotificationType::StopPublish, ids.to_vec()).serialize();
        self.publish_control(
            Destination::Host(target),
            PublicationMode::PublishNow,
            payload,
        );
    }
}
