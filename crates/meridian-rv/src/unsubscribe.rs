//! Unsubscribe handlers
//!
//! Leaving a scope re-runs rendezvous for each direct child item so
//! publishers stop sending when the last interested party is gone.

use meridian_core::{NodeLabel, Status};
use meridian_wire::RvRequest;

use crate::engine::RendezvousEngine;

impl RendezvousEngine {
    pub(crate) fn unsubscribe_scope(&mut self, subscriber: NodeLabel, req: &RvRequest) -> Status {
        let full = req.prefix.concat(&req.id);
        let Some(key) = self.store.find_scope(&full) else {
            return Status::ScopeDoesNotExist;
        };
        if self.store.scope(key).strategy != req.strategy {
            return Status::StrategyMismatch;
        }

        self.store.unlink_scope_subscriber(key, subscriber, &full);
        self.rendezvous_children(key);
        self.store.collect_scope_if_empty(key);
        self.store.drop_host_if_idle(subscriber);
        Status::Success
    }

    pub(crate) fn unsubscribe_info(&mut self, subscriber: NodeLabel, req: &RvRequest) -> Status {
        let full = req.prefix.concat(&req.id);
        let Some(key) = self.store.find_item(&full) else {
            return Status::InfoItemDoesNotExist;
        };
        if self.store.item(key).strategy != req.strategy {
            return Status::StrategyMismatch;
        }

        self.store.unlink_item_subscriber(key, subscriber, &full);
        self.rendezvous(key);
        self.store.collect_item_if_empty(key);
        self.store.drop_host_if_idle(subscriber);
        Status::Success
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::*;
    use meridian_core::{FullId, Status, Strategy};
    use meridian_wire::{RequestType, TmMessage};

    #[test]
    fn test_unsubscribe_unknown_scope() {
        let mut engine = engine_with_tm();
        let s = apply(
            &mut engine,
            0xB,
            RequestType::UnsubscribeScope,
            fid(&[1]),
            FullId::empty(),
            Strategy::DomainLocal,
        );
        assert_eq!(s, Status::ScopeDoesNotExist);
    }

    #[test]
    fn test_unsubscribe_rerendezvous_reflects_remaining_subscribers() {
        let mut engine = engine_with_tm();
        apply(
            &mut engine,
            0xA,
            RequestType::PublishScope,
            fid(&[1]),
            FullId::empty(),
            Strategy::DomainLocal,
        );
        apply(
            &mut engine,
            0xA,
            RequestType::PublishInfo,
            fid(&[2]),
            fid(&[1]),
            Strategy::DomainLocal,
        );
        apply(
            &mut engine,
            0xB,
            RequestType::SubscribeScope,
            fid(&[1]),
            FullId::empty(),
            Strategy::DomainLocal,
        );
        apply(
            &mut engine,
            0xC,
            RequestType::SubscribeScope,
            fid(&[1]),
            FullId::empty(),
            Strategy::DomainLocal,
        );
        engine.drain_outgoing();

        apply(
            &mut engine,
            0xC,
            RequestType::UnsubscribeScope,
            fid(&[1]),
            FullId::empty(),
            Strategy::DomainLocal,
        );

        let packets = engine.drain_outgoing();
        match &tm_messages(&packets)[0] {
            TmMessage::MatchPubSubs {
                publishers,
                subscribers,
                ..
            } => {
                assert_eq!(publishers, &vec![host(0xA)]);
                assert_eq!(subscribers, &vec![host(0xB)]);
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_unsubscribe_collects_abandoned_scope() {
        let mut engine = engine_with_tm();
        apply(
            &mut engine,
            0xB,
            RequestType::SubscribeScope,
            fid(&[1]),
            FullId::empty(),
            Strategy::DomainLocal,
        );
        apply(
            &mut engine,
            0xB,
            RequestType::UnsubscribeScope,
            fid(&[1]),
            FullId::empty(),
            Strategy::DomainLocal,
        );
        assert_eq!(engine.store().scope_count(), 0);
        assert!(engine.store().host(&host(0xB)).is_none());
    }

    #[test]
    fn test_unsubscribe_info_collects_item_and_parent() {
        let mut engine = engine_with_tm();
        apply(
            &mut engine,
            0xA,
            RequestType::PublishScope,
            fid(&[1]),
            FullId::empty(),
            Strategy::DomainLocal,
        );
        apply(
            &mut engine,
            0xB,
            RequestType::SubscribeInfo,
            fid(&[2]),
            fid(&[1]),
            Strategy::DomainLocal,
        );
        // the publisher leaves first; the scope stays for its item
        apply(
            &mut engine,
            0xA,
            RequestType::UnpublishScope,
            fid(&[1]),
            FullId::empty(),
            Strategy::DomainLocal,
        );
        assert_eq!(engine.store().item_count(), 1);

        apply(
            &mut engine,
            0xB,
            RequestType::UnsubscribeInfo,
            fid(&[2]),
            fid(&[1]),
            Strategy::DomainLocal,
        );

        // the item goes, and with it the now-empty parent scope
        assert_eq!(engine.store().item_count(), 0);
        assert_eq!(engine.store().scope_count(), 0);
    }
}
