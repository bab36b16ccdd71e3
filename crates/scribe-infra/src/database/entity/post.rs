//! Posts collection entity for SeaORM.
//!
//! One table holds posts, pages and redirect records, discriminated by
//! `kind`, mirroring the single logical collection the domain expects.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use scribe_core::domain::{Post, PostStatus, PostType, StoredPost};
use scribe_core::error::StoreError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: String,
    pub status: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub slug: String,
    pub pub_date: Option<DateTimeWithTimeZone>,
    pub modified: DateTimeWithTimeZone,
    pub redirect: Option<String>,
    pub guest_access_tokens: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to the domain document.
impl TryFrom<Model> for StoredPost {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let kind: PostType = model
            .kind
            .parse()
            .map_err(|e: scribe_core::domain::UnknownPostType| StoreError::Decode(e.to_string()))?;

        Ok(Self {
            id: model.id,
            post: Post {
                kind,
                status: PostStatus::from(model.status.as_str()),
                title: model.title,
                body: model.body,
                slug: model.slug,
                pub_date: model.pub_date.map(Into::into),
                modified: model.modified.into(),
                redirect: model.redirect,
                guest_access_tokens: model.guest_access_tokens,
            },
        })
    }
}

/// Active model with every field set, for inserts and full-field replaces.
pub fn active_model(id: Uuid, post: Post) -> ActiveModel {
    ActiveModel {
        id: Set(id),
        kind: Set(post.kind.as_str().to_owned()),
        status: Set(post.status.as_str().to_owned()),
        title: Set(post.title),
        body: Set(post.body),
        slug: Set(post.slug),
        pub_date: Set(post.pub_date.map(Into::into)),
        modified: Set(post.modified.into()),
        redirect: Set(post.redirect),
        guest_access_tokens: Set(post.guest_access_tokens),
    }
}
