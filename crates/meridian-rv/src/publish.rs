//! Publish handlers
//!
//! Three shapes for each category: a root scope, an inner entity under
//! an existing parent, and a republication binding an existing entity
//! under an additional parent. Every precondition failure returns a
//! status with the graph untouched.

use std::collections::BTreeSet;

use meridian_core::{NodeLabel, Status};
use meridian_graph::ScopeKey;
use meridian_wire::{NotificationType, RequestShape, RvRequest};

use crate::engine::RendezvousEngine;

impl RendezvousEngine {
    pub(crate) fn publish_scope(
        &mut self,
        publisher: NodeLabel,
        req: &RvRequest,
        shape: RequestShape,
    ) -> Status {
        match shape {
            RequestShape::Root => self.publish_root_scope(publisher, req),
            RequestShape::Inner => self.publish_inner_scope(publisher, req),
            RequestShape::Republish => self.republish_inner_scope(publisher, req),
        }
    }

    pub(crate) fn publish_info(
        &mut self,
        publisher: NodeLabel,
        req: &RvRequest,
        shape: RequestShape,
    ) -> Status {
        match shape {
            // the dispatcher rejects root-form item requests
            RequestShape::Root | RequestShape::Inner => self.advertise_info(publisher, req),
            RequestShape::Republish => self.readvertise_info(publisher, req),
        }
    }

    /// A root scope has no parent and therefore no one to notify.
    fn publish_root_scope(&mut self, publisher: NodeLabel, req: &RvRequest) -> Status {
        let full = req.id.clone();

        let key = match self.store.find_scope(&full) {
            Some(key) => {
                if self.store.scope(key).strategy != req.strategy {
                    return Status::StrategyMismatch;
                }
                key
            }
            None => self.store.create_root_scope(full.clone(), req.strategy),
        };
        self.store.link_scope_publisher(key, publisher, &full);
        Status::Success
    }

    fn publish_inner_scope(&mut self, publisher: NodeLabel, req: &RvRequest) -> Status {
        let Some(parent) = self.store.find_scope(&req.prefix) else {
            return Status::ParentDoesNotExist;
        };
        let full = req.prefix.concat(&req.id);

        if self.store.find_item(&full).is_some() {
            return Status::InfoItemExists;
        }

        if let Some(key) = self.store.find_scope(&full) {
            if self.store.scope(key).strategy != req.strategy {
                return Status::StrategyMismatch;
            }
            self.store.link_scope_publisher(key, publisher, &full);
            return Status::Success;
        }

        if self.store.scope(parent).strategy != req.strategy {
            return Status::StrategyMismatch;
        }

        let key = self.store.create_scope_under(parent, full.clone(), req.strategy);
        self.store.link_scope_publisher(key, publisher, &full);

        let subscribers = self.store.scope(parent).subscribers.clone();
        self.notify_subscribers(
            NotificationType::ScopePublished,
            &[full],
            req.strategy,
            &subscribers,
        );
        Status::Success
    }

    /// Bind an existing scope under another parent. Subscribers already
    /// reached through the scope's other parents are not re-notified.
    fn republish_inner_scope(&mut self, publisher: NodeLabel, req: &RvRequest) -> Status {
        // the last fragment is the new local id; the rest names the
        // entity being republished
        let (existing_tail, local_frag) = match req.id.split_last() {
            Some(split) => split,
            None => return Status::ScopeDoesNotExist,
        };

        let Some(parent) = self.store.find_scope(&req.prefix) else {
            return Status::ParentDoesNotExist;
        };
        let Some(source) = self.store.find_scope(&existing_tail) else {
            return Status::ScopeDoesNotExist;
        };

        let target = req.prefix.join(local_frag);
        if self.store.find_item(&target).is_some() {
            return Status::InfoItemExists;
        }

        if let Some(existing) = self.store.find_scope(&target) {
            if existing != source {
                return Status::ScopeExists;
            }
            // already republished here; just add the publisher
            if self.store.scope(source).strategy != req.strategy {
                return Status::StrategyMismatch;
            }
            self.store.link_scope_publisher(source, publisher, &target);
            return Status::Success;
        }

        if self.store.scope(parent).strategy != req.strategy
            || self.store.scope(source).strategy != req.strategy
        {
            return Status::StrategyMismatch;
        }

        // subscribers reachable through the source's existing parents,
        // captured before the new link appears
        let excluded = self.parent_subscribers(source);

        self.store.add_scope_alias(source, parent, target.clone());
        self.store.link_scope_publisher(source, publisher, &target);

        let targets: BTreeSet<NodeLabel> = self
            .store
            .scope(parent)
            .subscribers
            .iter()
            .copied()
            .filter(|l| !excluded.contains(l))
            .collect();
        let ids = self.store.scope(source).ids_vec();
        self.notify_subscribers(NotificationType::ScopePublished, &ids, req.strategy, &targets);
        Status::Success
    }

    fn advertise_info(&mut self, publisher: NodeLabel, req: &RvRequest) -> Status {
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

        self.store.link_item_publisher(key, publisher, &full);
        self.rendezvous(key);
        Status::Success
    }

    fn readvertise_info(&mut self, publisher: NodeLabel, req: &RvRequest) -> Status {
        let (existing_tail, local_frag) = match req.id.split_last() {
            Some(split) => split,
            None => return Status::InfoItemDoesNotExist,
        };

        let Some(parent) = self.store.find_scope(&req.prefix) else {
            return Status::ParentDoesNotExist;
        };
        let Some(source) = self.store.find_item(&existing_tail) else {
            return Status::InfoItemDoesNotExist;
        };

        let target = req.prefix.join(local_frag);
        if self.store.find_scope(&target).is_some() {
            return Status::ScopeExists;
        }

        if let Some(existing) = self.store.find_item(&target) {
            if existing != source {
                return Status::InfoItemExists;
            }
            if self.store.item(source).strategy != req.strategy {
                return Status::StrategyMismatch;
            }
            self.store.link_item_publisher(source, publisher, &target);
            self.rendezvous(source);
            return Status::Success;
        }

        if self.store.scope(parent).strategy != req.strategy
            || self.store.item(source).strategy != req.strategy
        {
            return Status::StrategyMismatch;
        }

        self.store.add_item_alias(source, parent, target.clone());
        self.store.link_item_publisher(source, publisher, &target);
        // rendezvous now sees subscribers along every parent path
        self.rendezvous(source);
        Status::Success
    }

    /// Union of the subscriber sets of an entity's current parents.
    fn parent_subscribers(&self, key: ScopeKey) -> BTreeSet<NodeLabel> {
        let mut subs = BTreeSet::new();
        for pk in self.store.scope(key).parents.iter() {
            subs.extend(self.store.scope(*pk).subscribers.iter().copied());
        }
        subs
    }
}
