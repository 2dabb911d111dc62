//! Subscribe handlers
//!
//! Joining a scope is also how a node learns the graph below it: the
//! new subscriber is told about every direct child scope, and rendezvous
//! re-runs for every direct child item so the publishers start sending.

use std::collections::BTreeSet;

use meridian_core::{NodeLabel, Status, Strategy};
use meridian_graph::ScopeKey;
use meridian_wire::{NotificationType, RequestShape, RvRequest};

use crate::engine::RendezvousEngine;

impl RendezvousEngine {
    pub(crate) fn subscribe_scope(
        &mut self,
        subscriber: NodeLabel,
        req: &RvRequest,
        shape: RequestShape,
    ) -> Status {
        match shape {
            RequestShape::Root => self.subscribe_root_scope(subscriber, req),
            _ => self.subscribe_inner_scope(subscriber, req),
        }
    }

    fn subscribe_root_scope(&mut self, subscriber: NodeLabel, req: &RvRequest) -> Status {
        let full = req.id.clone();

        let key = match self.store.find_scope(&full) {
            Some(key) => {
                if self.store.scope(key).strategy != req.strategy {
                    return Status::StrategyMismatch;
                }
                key
            }
            // a fresh root: nothing to announce, no items to match
            None => self.store.create_root_scope(full.clone(), req.strategy),
        };

        self.store.link_scope_subscriber(key, subscriber, &full);
        self.welcome_subscriber(key, subscriber);
        Status::Success
    }

    fn subscribe_inner_scope(&mut self, subscriber: NodeLabel, req: &RvRequest) -> Status {
        let Some(parent) = self.store.find_scope(&req.prefix) else {
            return Status::ParentDoesNotExist;
        };
        let full = req.prefix.concat(&req.id);

        if self.store.find_item(&full).is_some() {
            return Status::InfoItemExists;
        }

        let key = match self.store.find_scope(&full) {
            Some(key) => {
                if self.store.scope(key).strategy != req.strategy {
                    return Status::StrategyMismatch;
                }
                key
            }
            None => {
                if self.store.scope(parent).strategy != req.strategy {
                    return Status::StrategyMismatch;
                }
                let key = self.store.create_scope_under(parent, full.clone(), req.strategy);
                // the parent's subscribers hear about the new scope
                // before the subscription itself takes effect
                let subscribers = self.store.scope(parent).subscribers.clone();
                self.notify_subscribers(
                    NotificationType::ScopePublished,
                    &[full.clone()],
                    req.strategy,
                    &subscribers,
                );
                key
            }
        };

        self.store.link_scope_subscriber(key, subscriber, &full);
        self.welcome_subscriber(key, subscriber);
        Status::Success
    }

    pub(crate) fn subscribe_info(&mut self, subscriber: NodeLabel, req: &RvRequest) -> Status {
        let Some(parent) = self.store.find_scope(&req.prefix) else {
            return Status::ParentDoesNotExist;
        };
        let full = req.prefix.concat(&req.id);

        if self.store.find_scope(&full).is_some() {
            return Status::ScopeExists;
        }

        let key = match self.store.find_item(&full) {
            Some(key) => {
                if self.store.item(key).strategy != req.strategy {
                    return Status::StrategyMismatch;
                }
                key
            }
            None => {
                if self.store.scope(parent).strategy != req.strategy {
                    return Status::StrategyMismatch;
                }
                self.store.create_item_under(parent, full.clone(), req.strategy)
            }
        };

        self.store.link_item_subscriber(key, subscriber, &full);
        self.rendezvous(key);
        Status::Success
    }

    /// Bring a fresh subscriber up to date: announce every direct child
    /// scope to it, then re-run rendezvous for every direct child item.
    fn welcome_subscriber(&mut self, key: ScopeKey, subscriber: NodeLabel) {
        let strategy = self.store.scope(key).strategy;

        let mut just_this = BTreeSet::new();
        just_this.insert(subscriber);

        let child_scopes: Vec<ScopeKey> =
            self.store.scope(key).child_scopes.iter().copied().collect();
        for child in child_scopes {
            let ids = self.store.scope(child).ids_vec();
            self.notify_subscribers(NotificationType::ScopePublished, &ids, strategy, &just_this);
        }

        if strategy == Strategy::Kanycast {
            self.kanycast_welcome_subscriber(key, subscriber);
        }
        self.rendezvous_children(key);
    }
}
