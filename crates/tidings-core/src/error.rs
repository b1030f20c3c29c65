//! Domain error types.

use thiserror::Error;

/// Top-level error type surfaced by dispatch, handlers and repositories.
///
/// Nothing in this workspace retries or suppresses these locally; the host
/// decides what a failure means for the caller.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A consumer-name pattern is malformed or cannot be resolved.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A request claiming an identity carried none, or the identity was refused.
    #[error("authorization error: {0}")]
    Authorization(String),

    /// A repository write failed.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// Cancellation was signalled before the work began.
    #[error("operation cancelled")]
    Cancelled,

    /// No handler is registered for the dispatched request type.
    #[error("no handler registered for request type {0}")]
    HandlerNotRegistered(&'static str),
}
