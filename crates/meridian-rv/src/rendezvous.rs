//! The rendezvous step
//!
//! Given an item, gather its publishers and the subscriber closure
//! (its own subscribers plus those of every ancestor scope on every
//! path), then match the two sets under the item's strategy. The step
//! recomputes everything from current graph state, so re-running it
//! with unchanged inputs emits the same outbound set.

use std::collections::BTreeSet;

use meridian_core::{FullId, NodeLabel, Strategy};
use meridian_graph::{ItemKey, ScopeKey};
use meridian_wire::TmMessage;

use crate::engine::{Destination, PublicationMode, RendezvousEngine};

impl RendezvousEngine {
    /// Match publishers with subscribers for one item and emit the
    /// strategy-specific notifications.
    pub(crate) fn rendezvous(&mut self, key: ItemKey) {
        let (publishers, ids, strategy) = {
            let item = self.store.item(key);
            (item.publishers.clone(), item.ids_vec(), item.strategy)
        };
        let subscribers = self.store.subscriber_closure(key);
        let active = !publishers.is_empty() && !subscribers.is_empty();

        match strategy {
            // the publication carries its own forwarding identifier
            Strategy::ImplicitRendezvous => {}

            Strategy::NodeLocal => {
                if active {
                    let fid = self.config.internal_link_id.clone();
                    self.notify_publisher_started(self.local_label(), &ids, &fid);
                } else {
                    self.notify_publisher_stopped(self.local_label(), &ids);
                }
            }

            Strategy::LinkLocal | Strategy::Broadcast => {
                if active {
                    let fid = self.config.broadcast_fid.clone();
                    for p in &publishers {
                        self.notify_publisher_started(*p, &ids, &fid);
                    }
                } else {
                    self.stop_publishers(&publishers, &ids);
                }
            }

            Strategy::DomainLocal => {
                if active {
                    self.request_tm_match(strategy, &publishers, &subscribers, &ids);
                } else {
                    self.stop_publishers(&publishers, &ids);
                    // the TM withdraws forwarding state from any remote
                    // publisher it set up earlier
                    if publishers.iter().any(|p| *p != self.local_label()) {
                        self.request_tm_match(strategy, &publishers, &subscribers, &ids);
                    }
                }
            }

            Strategy::Kanycast => {
                if active {
                    self.kanycast_probe(key, &publishers, &subscribers);
                } else {
                    self.stop_publishers(&publishers, &ids);
                }
            }
        }
    }

    /// Rendezvous for every direct child item of a scope.
    pub(crate) fn rendezvous_children(&mut self, key: ScopeKey) {
        let children: Vec<ItemKey> = self.store.scope(key).child_items.iter().copied().collect();
        for item in children {
            self.rendezvous(item);
        }
    }

    /// STOP to every publisher still registered for the item. The local
    /// host, when it is one of them, is reached through the proxy like
    /// any other control destination.
    fn stop_publishers(&mut self, publishers: &BTreeSet<NodeLabel>, ids: &[FullId]) {
        for p in publishers {
            self.notify_publisher_stopped(*p, ids);
        }
    }

    pub(crate) fn request_tm_match(
        &mut self,
        strategy: Strategy,
        publishers: &BTreeSet<NodeLabel>,
        subscribers: &BTreeSet<NodeLabel>,
        ids: &[FullId],
    ) {
        let msg = TmMessage::MatchPubSubs {
            strategy,
            publishers: publishers.iter().copied().collect(),
            subscribers: subscribers.iter().copied().collect(),
            ids: ids.to_vec(),
        };
        self.publish_control(
            Destination::TopologyManager,
            PublicationMode::ImplicitRendezvous,
            msg.serialize(),
        );
    }
}
