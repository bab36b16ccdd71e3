mod post;

pub use post::{ParseMode, Post, PostStatus, PostType, StoredPost, UnknownPostType, WireError, slugify};
