//! Kanycast rendezvous
//!
//! Anycast with a probing phase, kept off the generic matching path.
//! Publishers are asked (through the topology manager) to emit a
//! probing-scope message; a subscriber joining the scope is separately
//! told which items live under it, tagged with the publisher count so
//! it can size its probe responses.

use std::collections::{BTreeSet, HashSet};

use meridian_core::{FullId, NodeLabel, Strategy};
use meridian_graph::{ItemKey, ScopeKey};
use meridian_wire::{NotificationType, TmMessage};

use crate::engine::{Destination, PublicationMode, RendezvousEngine};

impl RendezvousEngine {
    /// Phase one: publishers probe toward the subscribers.
    pub(crate) fn kanycast_probe(
        &mut self,
        key: ItemKey,
        publishers: &BTreeSet<NodeLabel>,
        subscribers: &BTreeSet<NodeLabel>,
    ) {
        let scope_ids = self.parent_scope_ids(key);
        let msg = TmMessage::KanycastProbe {
            strategy: Strategy::Kanycast,
            publishers: publishers.iter().copied().collect(),
            subscribers: subscribers.iter().copied().collect(),
            scope_ids,
        };
        self.publish_control(
            Destination::TopologyManager,
            PublicationMode::ImplicitRendezvous,
            msg.serialize(),
        );
    }

    /// Phase two: a new subscriber learns the items under the scope it
    /// joined, one message per item, each tagged with the number of
    /// publishers behind it.
    pub(crate) fn kanycast_welcome_subscriber(&mut self, key: ScopeKey, subscriber: NodeLabel) {
        let scope_ids = self.store.scope(key).ids_vec();
        let children: Vec<ItemKey> = self.store.scope(key).child_items.iter().copied().collect();

        for item_key in children {
            let (publishers, item_ids) = {
                let item = self.store.item(item_key);
                (item.publishers.clone(), item.ids_vec())
            };
            let msg = TmMessage::KanycastNotify {
                request: NotificationType::ScopePublished,
                strategy: Strategy::Kanycast,
                publisher_count: publishers.len() as u32,
                publishers: publishers.iter().copied().collect(),
                subscribers: vec![subscriber],
                item_ids,
                scope_ids: scope_ids.clone(),
            };
            self.publish_control(
                Destination::TopologyManager,
                PublicationMode::ImplicitRendezvous,
                msg.serialize(),
            );
        }
    }

    /// The identifiers of every scope directly above an item, without
    /// duplicates, in identifier order.
    fn parent_scope_ids(&self, key: ItemKey) -> Vec<FullId> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for pk in self.store.item(key).parents.iter() {
            for id in self.store.scope(*pk).ids.iter() {
                if seen.insert(id.clone()) {
                    ids.push(id.clone());
                }
            }
        }
        ids.sort();
        ids
    }
}
