//! Meridian Wire Protocol - Binary formats for rendezvous traffic
//!
//! This crate implements the wire formats the rendezvous core consumes
//! and produces:
//! - Inbound pub/sub requests (after envelope stripping)
//! - The reserved control envelope (`WILDCARD ∥ nodeLabel`)
//! - Outbound notification bodies (START/STOP, scope announcements)
//! - Topology manager requests (MATCH_PUB_SUBS, assisted notification,
//!   kanycast probing)

pub mod envelope;
pub mod notification;
pub mod request;
pub mod tm;

mod codec;

pub use envelope::*;
pub use notification::*;
pub use request::*;
pub use tm::*;
