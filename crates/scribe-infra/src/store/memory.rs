//! In-memory post store.
//!
//! This is the fallback when Postgres is not configured.
//! Data is lost on process restart.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::timestamp::context::ContextV7;
use uuid::{Timestamp, Uuid};

use scribe_core::domain::{Post, PostType, StoredPost};
use scribe_core::error::StoreError;
use scribe_core::ports::PostStore;

/// Post store backed by a `BTreeMap` keyed by UUIDv7.
///
/// Ids come from a shared [`ContextV7`], which keeps them strictly ordered
/// even within one millisecond, so map order is creation order and the
/// reverse scan yields newest first.
pub struct InMemoryPostStore {
    docs: RwLock<BTreeMap<Uuid, Post>>,
    clock: Mutex<ContextV7>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(BTreeMap::new()),
            clock: Mutex::new(ContextV7::new()),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn recent(&self, kind: PostType, limit: usize) -> Result<Vec<StoredPost>, StoreError> {
        let docs = self.docs.read().await;

        Ok(docs
            .iter()
            .rev()
            .filter(|(_, post)| post.kind == kind)
            .take(limit)
            .map(|(id, post)| StoredPost {
                id: *id,
                post: post.clone(),
            })
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoredPost>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs.get(&id).cloned().map(|post| StoredPost { id, post }))
    }

    async fn insert(&self, post: Post) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v7(Timestamp::now(&self.clock));

        let mut docs = self.docs.write().await;
        docs.insert(id, post);
        tracing::debug!(%id, "document inserted");

        Ok(id)
    }

    async fn replace(&self, id: Uuid, post: Post) -> Result<u64, StoreError> {
        let mut docs = self.docs.write().await;

        match docs.get_mut(&id) {
            Some(slot) => {
                *slot = post;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<u64, StoreError> {
        let mut docs = self.docs.write().await;
        Ok(u64::from(docs.remove(&id).is_some()))
    }
}
