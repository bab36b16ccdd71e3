//! Cache signal bus port - fire-and-forget invalidation events.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use crate::error::SignalError;

/// Content-changed notifications consumed by downstream caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEvent {
    PostCreated,
    PostChanged,
    PostDeleted,
}

impl CacheEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheEvent::PostCreated => "post_created",
            CacheEvent::PostChanged => "post_changed",
            CacheEvent::PostDeleted => "post_deleted",
        }
    }
}

impl fmt::Display for CacheEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handler for incoming events.
pub type EventHandler =
    Box<dyn Fn(CacheEvent) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Process-wide notification channel for cache invalidation.
///
/// Best-effort: delivery is not guaranteed, there is no backpressure, and
/// publishing must never block or fail a reply to the RPC caller.
#[async_trait]
pub trait SignalBus: Send + Sync {
    /// Publish an event with no payload and no acknowledgment.
    async fn publish(&self, event: CacheEvent) -> Result<(), SignalError>;

    /// Subscribe to all events with a handler.
    async fn subscribe(&self, handler: EventHandler) -> Result<(), SignalError>;
}
