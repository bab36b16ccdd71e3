//! Domain-level error types.

use thiserror::Error;

/// Document store gateway failures.
///
/// "Not found" is deliberately not a variant: lookups return `Option` and
/// write operations report affected counts, so a missing document is a
/// normal result, not an error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection failed: {0}")]
    Connection(String),

    #[error("store operation failed: {0}")]
    Query(String),

    #[error("stored document could not be decoded: {0}")]
    Decode(String),
}

/// Cache signal bus failures.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("failed to publish cache event: {0}")]
    Publish(String),

    #[error("failed to subscribe to cache events: {0}")]
    Subscribe(String),
}
