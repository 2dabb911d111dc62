//! Unpublish handlers
//!
//! Unpublishing a scope first retires the issuer's items directly under
//! it, then unlinks the publisher. The entity survives while publishers,
//! subscribers, or children still reference it through any of its
//! identifiers; once nothing does, it is collected with every branch.

use meridian_core::{FullId, NodeLabel, Status};
use meridian_wire::{NotificationType, RvRequest};

use crate::engine::RendezvousEngine;

impl RendezvousEngine {
    pub(crate) fn unpublish_scope(&mut self, publisher: NodeLabel, req: &RvRequest) -> Status {
        let full = req.prefix.concat(&req.id);
        let Some(key) = self.store.find_scope(&full) else {
            return Status::ScopeDoesNotExist;
        };
        if self.store.scope(key).strategy != req.strategy {
            return Status::StrategyMismatch;
        }

        // retire this publisher's items directly under the scope, as if
        // it had unpublished each one itself
        let scope_ids = self.store.scope(key).ids.clone();
        let child_items: Vec<_> = self.store.scope(key).child_items.iter().copied().collect();
        for item_key in child_items {
            if !self.store.item(item_key).publishers.contains(&publisher) {
                continue;
            }
            let held: Vec<FullId> = match self.store.host(&publisher) {
                Some(host) => self
                    .store
                    .item(item_key)
                    .ids
                    .iter()
                    .filter(|id| {
                        host.published_items.contains(*id)
                            && id
                                .prefix()
                                .map(|p| scope_ids.contains(&p))
                                .unwrap_or(false)
                    })
                    .cloned()
                    .collect(),
                None => Vec::new(),
            };
            for id in &held {
                self.store.unlink_item_publisher(item_key, publisher, id);
            }
            if !held.is_empty() {
                self.rendezvous(item_key);
                self.store.collect_item_if_empty(item_key);
            }
        }

        self.store.unlink_scope_publisher(key, publisher, &full);

        // with no publishers, subscribers, or children left the scope
        // goes away entirely; announce the disappearance upward
        let parent_subscribers = if req.prefix.is_empty() {
            None
        } else {
            self.store
                .find_scope(&req.prefix)
                .map(|pk| self.store.scope(pk).subscribers.clone())
        };

        self.store.collect_scope_if_empty(key);

        if self.store.find_scope(&full).is_none() {
            if let Some(subscribers) = parent_subscribers {
                self.notify_subscribers(
                    NotificationType::ScopeUnpublished,
                    &[full],
                    req.strategy,
                    &subscribers,
                );
            }
        }

        self.store.drop_host_if_idle(publisher);
        Status::Success
    }

    pub(crate) fn unpublish_info(&mut self, publisher: NodeLabel, req: &RvRequest) -> Status {
        let full = req.prefix.concat(&req.id);
        let Some(key) = self.store.find_item(&full) else {
            return Status::InfoItemDoesNotExist;
        };
        if self.store.item(key).strategy != req.strategy {
            return Status::StrategyMismatch;
        }

        self.store.unlink_item_publisher(key, publisher, &full);
        // remaining publishers re-match; with none left the subscribers'
        // side is told to stop
        self.rendezvous(key);
        self.store.collect_item_if_empty(key);
        self.store.drop_host_if_idle(publisher);
        Status::Success
    }
}
