//! PostgreSQL post store.

use std::sync::Mutex;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::timestamp::context::ContextV7;
use uuid::{Timestamp, Uuid};

use scribe_core::domain::{Post, PostType, StoredPost};
use scribe_core::error::StoreError;
use scribe_core::ports::PostStore;

use super::entity::post::{self, Entity as PostEntity};

/// SeaORM-backed post store.
///
/// Ids are UUIDv7 from a shared [`ContextV7`], so the primary key sorts by
/// creation time and `ORDER BY id DESC` yields newest first.
pub struct PostgresPostStore {
    db: DbConn,
    clock: Mutex<ContextV7>,
}

impl PostgresPostStore {
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            clock: Mutex::new(ContextV7::new()),
        }
    }
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn recent(&self, kind: PostType, limit: usize) -> Result<Vec<StoredPost>, StoreError> {
        let rows = PostEntity::find()
            .filter(post::Column::Kind.eq(kind.as_str()))
            .order_by_desc(post::Column::Id)
            .limit(limit as u64)
            .all(&self.db)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        rows.into_iter().map(StoredPost::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoredPost>, StoreError> {
        let row = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        row.map(StoredPost::try_from).transpose()
    }

    async fn insert(&self, post: Post) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v7(Timestamp::now(&self.clock));

        post::active_model(id, post)
            .insert(&self.db)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(id)
    }

    async fn replace(&self, id: Uuid, post: Post) -> Result<u64, StoreError> {
        let mut replacement = post::active_model(id, post);
        replacement.id = ActiveValue::NotSet;

        let result = PostEntity::update_many()
            .set(replacement)
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(result.rows_affected)
    }

    async fn remove(&self, id: Uuid) -> Result<u64, StoreError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(result.rows_affected)
    }
}
