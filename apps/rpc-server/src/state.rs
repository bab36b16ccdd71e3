//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{PostStore, SignalBus};
use scribe_core::workflow::PostWorkflow;
use scribe_infra::database::DatabaseConfig;
use scribe_infra::pubsub::InMemorySignalBus;
use scribe_infra::store::InMemoryPostStore;

#[cfg(feature = "postgres")]
use scribe_infra::PostgresPostStore;

use crate::methods;
use crate::rpc::Registry;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub signals: Arc<dyn SignalBus>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>, base_url: String) -> Self {
        #[cfg(feature = "postgres")]
        let store: Arc<dyn PostStore> = {
            if let Some(config) = db_config {
                match scribe_infra::database::connect(config).await {
                    Ok(conn) => Arc::new(PostgresPostStore::new(conn)),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        Arc::new(InMemoryPostStore::new())
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Arc::new(InMemoryPostStore::new())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let store: Arc<dyn PostStore> = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory store");
            Arc::new(InMemoryPostStore::new())
        };

        let signals: Arc<dyn SignalBus> = Arc::new(InMemorySignalBus::default());
        let workflow = Arc::new(PostWorkflow::new(store, signals.clone()));

        let mut registry = Registry::default();
        methods::register_all(&mut registry, workflow, base_url);

        tracing::info!("Application state initialized");

        Self {
            registry: Arc::new(registry),
            signals,
        }
    }
}
