//! In-memory cache signal bus.
//!
//! Works within a single process only. Best-effort: publishing with no
//! subscribers is a no-op, and a slow subscriber drops events rather than
//! exerting backpressure on publishers.

use async_trait::async_trait;
use tokio::sync::broadcast;

use scribe_core::error::SignalError;
use scribe_core::ports::{CacheEvent, EventHandler, SignalBus};

/// Signal bus over a tokio broadcast channel.
pub struct InMemorySignalBus {
    sender: broadcast::Sender<CacheEvent>,
}

impl InMemorySignalBus {
    pub fn new(buffer_size: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer_size);
        Self { sender }
    }
}

impl Default for InMemorySignalBus {
    fn default() -> Self {
        Self::new(100)
    }
}

#[async_trait]
impl SignalBus for InMemorySignalBus {
    async fn publish(&self, event: CacheEvent) -> Result<(), SignalError> {
        // Ignore send errors (no subscribers)
        let _ = self.sender.send(event);
        tracing::debug!(event = %event, "cache event published");
        Ok(())
    }

    async fn subscribe(&self, handler: EventHandler) -> Result<(), SignalError> {
        let mut receiver = self.sender.subscribe();

        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => handler(event).await,
                    Err(broadcast::error::RecvError::Lagged(count)) => {
                        tracing::warn!(lagged = count, "cache subscriber lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::debug!("cache signal bus closed");
                        break;
                    }
                }
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc;

    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_events() {
        let bus = InMemorySignalBus::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        bus.subscribe(Box::new(move |event| {
            let tx = tx.clone();
            Box::pin(async move {
                let _ = tx.send(event);
            })
        }))
        .await
        .unwrap();

        bus.publish(CacheEvent::PostCreated).await.unwrap();
        bus.publish(CacheEvent::PostDeleted).await.unwrap();

        let first = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap();
        let second = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap();
        assert_eq!(first, Some(CacheEvent::PostCreated));
        assert_eq!(second, Some(CacheEvent::PostDeleted));
    }

    #[tokio::test]
    async fn publish_without_subscribers_succeeds() {
        let bus = InMemorySignalBus::default();
        bus.publish(CacheEvent::PostChanged).await.unwrap();
    }
}
