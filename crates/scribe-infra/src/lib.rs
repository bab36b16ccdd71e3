//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - all features enabled
//! - `minimal` - no external dependencies, in-memory only
//! - `postgres` - PostgreSQL post store via SeaORM

pub mod database;
pub mod pubsub;
pub mod store;

// Re-exports - In-Memory
pub use pubsub::InMemorySignalBus;
pub use store::InMemoryPostStore;

pub use database::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use database::PostgresPostStore;
