//! Meridian Graph - The information graph behind the rendezvous core
//!
//! A directed acyclic graph whose internal nodes are scopes and whose
//! leaves are information items. Entities are shared: a scope or item
//! republished under additional parents keeps a single record carrying
//! every full identifier it is known by. Hosts are cross-indexed with
//! entities so that membership can be checked from either side.
//!
//! Ordered sets are used throughout so that iteration (and therefore
//! outbound notification emission) is deterministic.

pub mod host;
pub mod item;
pub mod keys;
pub mod scope;
pub mod store;

pub use host::*;
pub use item::*;
pub use keys::*;
pub use scope::*;
pub use store::*;
