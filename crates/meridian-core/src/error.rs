//! Error types for the Meridian substrate

use thiserror::Error;

/// Core Meridian errors
///
/// These cover malformed wire input and structural faults. Operation
/// outcomes are not errors; see [`crate::Status`].
#[derive(Error, Debug)]
pub enum MeridianError {
    // Wire errors
    #[error("buffer too short: expected {expected}, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("invalid wire format: {0}")]
    InvalidWireFormat(String),

    #[error("unknown request type: {0:#04x}")]
    UnknownRequestType(u8),

    #[error("unknown notification type: {0:#04x}")]
    UnknownNotificationType(u8),

    #[error("unknown topology request type: {0:#04x}")]
    UnknownTmRequestType(u8),

    #[error("unknown strategy: {0:#04x}")]
    UnknownStrategy(u8),

    // Identifier errors
    #[error("identifier is not a whole number of fragments: {0} bytes")]
    MalformedIdentifier(usize),

    #[error("malformed control envelope")]
    MalformedEnvelope,

    /// A request whose (prefix, id) fragment counts match no operation
    /// shape. Rejected at dispatch with no side effects.
    #[error("request shape not recognised: prefix {prefix} fragments, id {id} fragments")]
    ImpossibleShape { prefix: usize, id: usize },

    // Structural faults; these indicate a bug, not peer misbehavior.
    #[error("graph invariant violated: {0}")]
    InvariantViolated(String),
}

/// Result type for Meridian operations
pub type MeridianResult<T> = Result<T, MeridianError>;
