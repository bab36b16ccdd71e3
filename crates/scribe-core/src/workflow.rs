//! Post workflow engine - list/create/read/edit/delete for posts and pages,
//! redirect-record synthesis, and cache-invalidation signaling.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Post, PostStatus, PostType, StoredPost};
use crate::error::StoreError;
use crate::ports::{CacheEvent, PostStore, SignalBus};

/// Domain logic behind the post/page RPC methods.
///
/// Operations that address a single document report "not found" through
/// their return value (`Option` / `bool`); only store failures are errors.
/// There is no cross-request coordination: the edit's read-then-write is
/// unprotected and a concurrent delete is detected solely by the
/// zero-documents-matched check on the replace.
pub struct PostWorkflow {
    store: Arc<dyn PostStore>,
    signals: Arc<dyn SignalBus>,
}

impl PostWorkflow {
    pub fn new(store: Arc<dyn PostStore>, signals: Arc<dyn SignalBus>) -> Self {
        Self { store, signals }
    }

    /// The most recently created documents of one kind, newest first.
    /// An empty result is a success.
    pub async fn recent(&self, kind: PostType, limit: usize) -> Result<Vec<StoredPost>, StoreError> {
        self.store.recent(kind, limit).await
    }

    /// Insert a new post or page and return its store-assigned identifier.
    /// Creating directly into `publish` stamps the publication date.
    pub async fn create(&self, mut post: Post) -> Result<Uuid, StoreError> {
        if post.status == PostStatus::Publish {
            post.pub_date = Some(Utc::now());
        }

        let id = self.store.insert(post).await?;
        self.emit(CacheEvent::PostCreated).await;
        Ok(id)
    }

    pub async fn fetch(&self, id: Uuid) -> Result<Option<StoredPost>, StoreError> {
        self.store.find_by_id(id).await
    }

    /// Replace the full field set of an existing document.
    ///
    /// Returns `false` when no document with this id exists, including the
    /// race where it vanished between the fetch and the replace.
    pub async fn edit(&self, id: Uuid, mut candidate: Post) -> Result<bool, StoreError> {
        let Some(existing) = self.store.find_by_id(id).await? else {
            return Ok(false);
        };

        // pub_date is write-once: an existing value always wins, and a
        // draft transitioning to publish for the first time is stamped now.
        if existing.post.pub_date.is_some() {
            candidate.pub_date = existing.post.pub_date;
        } else if candidate.status == PostStatus::Publish {
            candidate.pub_date = Some(Utc::now());
        }

        // Clients cannot alter guest access tokens; carry the stored value.
        candidate.guest_access_tokens = existing.post.guest_access_tokens.clone();

        let slug_changed = existing.post.slug != candidate.slug;
        let was_published = existing.post.status == PostStatus::Publish;
        let new_slug = candidate.slug.clone();

        if self.store.replace(id, candidate).await? == 0 {
            return Ok(false);
        }

        // A published post that moved keeps its old address reachable. A
        // draft was never externally addressable, so no marker is needed.
        if slug_changed && was_published {
            let marker = Post::redirect(existing.post.slug.clone(), new_slug);
            self.store.insert(marker).await?;
        }

        self.emit(CacheEvent::PostChanged).await;
        Ok(true)
    }

    /// Hard delete. Returns `false` when nothing was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        if self.store.remove(id).await? == 0 {
            return Ok(false);
        }

        self.emit(CacheEvent::PostDeleted).await;
        Ok(true)
    }

    /// Fire-and-forget: a bus failure is logged and never reaches the caller.
    async fn emit(&self, event: CacheEvent) {
        if let Err(e) = self.signals.publish(event).await {
            tracing::warn!(event = %event, error = %e, "cache event dropped");
        }
    }
}
