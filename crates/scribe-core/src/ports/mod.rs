//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod signal;
mod store;

pub use signal::{CacheEvent, EventHandler, SignalBus};
pub use store::PostStore;
