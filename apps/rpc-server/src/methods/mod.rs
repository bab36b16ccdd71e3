//! RPC method modules.
//!
//! Each module registers its own handlers into the flat dispatch registry
//! at startup. New capability groups (categories, tags, media, users) slot
//! in as further modules with their own `register` calls.

use std::sync::Arc;

use scribe_core::workflow::PostWorkflow;

use crate::rpc::Registry;

pub mod posts;
pub mod system;

pub use posts::PostMethods;

/// Populate the registry with every method module.
pub fn register_all(registry: &mut Registry, workflow: Arc<PostWorkflow>, base_url: String) {
    PostMethods::new(workflow, base_url).register(registry);
    system::register(registry);
}
