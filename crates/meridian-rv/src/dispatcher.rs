//! Request dispatch
//!
//! The pipeline hands the engine each publication it receives on the
//! control scope. The envelope names the issuing node; the payload is a
//! pub/sub request. Malformed input is logged and dropped here, before
//! any handler runs; a request that decodes but fails a precondition
//! comes back as a status with the graph untouched.

use meridian_core::{FullId, MeridianResult, Status};
use meridian_wire::{ControlEnvelope, RequestType, RvRequest};
use tracing::{debug, warn};

use crate::engine::RendezvousEngine;

impl RendezvousEngine {
    /// Handle one inbound publication: decode, classify, route.
    ///
    /// `published_id` is the identifier the payload was published under
    /// (`WILDCARD ∥ issuerLabel`); `payload` is the request body.
    pub fn handle_publication(
        &mut self,
        published_id: &FullId,
        payload: &[u8],
    ) -> MeridianResult<Status> {
        let envelope = ControlEnvelope::parse(published_id).map_err(|e| {
            warn!(id = %published_id, error = %e, "dropping publication with bad envelope");
            e
        })?;

        let req = RvRequest::parse(payload).map_err(|e| {
            warn!(issuer = %envelope.node, error = %e, "dropping malformed request");
            e
        })?;

        let shape = req.shape().map_err(|e| {
            warn!(issuer = %envelope.node, op = ?req.op, error = %e, "dropping request");
            e
        })?;

        debug!(
            issuer = %envelope.node,
            op = ?req.op,
            id = %req.id,
            prefix = %req.prefix,
            strategy = ?req.strategy,
            "pub/sub request"
        );

        let issuer = envelope.node;
        let status = match req.op {
            RequestType::PublishScope => self.publish_scope(issuer, &req, shape),
            RequestType::PublishInfo => self.publish_info(issuer, &req, shape),
            RequestType::UnpublishScope => self.unpublish_scope(issuer, &req),
            RequestType::UnpublishInfo => self.unpublish_info(issuer, &req),
            RequestType::SubscribeScope => self.subscribe_scope(issuer, &req, shape),
            RequestType::SubscribeInfo => self.subscribe_info(issuer, &req),
            RequestType::UnsubscribeScope => self.unsubscribe_scope(issuer, &req),
            RequestType::UnsubscribeInfo => self.unsubscribe_info(issuer, &req),
        };

        // a broken structural invariant is an engine bug; stop before
        // the graph corrupts further
        #[cfg(debug_assertions)]
        if let Err(e) = self.store.validate() {
            panic!("graph invariant broken after {:?}: {e}", req.op);
        }

        Ok(status)
    }
}
