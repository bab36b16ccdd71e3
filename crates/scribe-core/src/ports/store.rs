use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostType, StoredPost};
use crate::error::StoreError;

/// Gateway to the `posts` collection.
///
/// Posts, pages and redirect records live in one collection, discriminated
/// by `kind`. Identifiers are store-assigned and monotone with creation
/// time, so "order by id descending" means newest first.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// The most recently created documents of one kind, newest first,
    /// capped at `limit`.
    async fn recent(&self, kind: PostType, limit: usize) -> Result<Vec<StoredPost>, StoreError>;

    /// Find a document by its identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoredPost>, StoreError>;

    /// Insert a new document; the store assigns and returns the identifier.
    async fn insert(&self, post: Post) -> Result<Uuid, StoreError>;

    /// Replace the full mutable field set of the document with this id.
    /// Returns the number of documents matched (0 or 1).
    async fn replace(&self, id: Uuid, post: Post) -> Result<u64, StoreError>;

    /// Remove a document. Returns the number of documents removed (0 or 1).
    async fn remove(&self, id: Uuid) -> Result<u64, StoreError>;
}
