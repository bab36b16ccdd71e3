//! Post entity - a blog post, a page, or a redirect marker, plus the
//! translation to and from the MetaWeblog wire struct.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;
use uuid::Uuid;

/// Discriminator for documents in the posts collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Post,
    Page,
    Redirect,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Post => "post",
            PostType::Page => "page",
            PostType::Redirect => "redirect",
        }
    }
}

#[derive(Debug, Error)]
#[error("unrecognized post type: {0}")]
pub struct UnknownPostType(String);

impl std::str::FromStr for PostType {
    type Err = UnknownPostType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(PostType::Post),
            "page" => Ok(PostType::Page),
            "redirect" => Ok(PostType::Redirect),
            other => Err(UnknownPostType(other.to_owned())),
        }
    }
}

/// Publication status. Only `draft` and `publish` carry meaning for the
/// workflow; anything else a client sends is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostStatus {
    Draft,
    Publish,
    Other(String),
}

impl PostStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Publish => "publish",
            PostStatus::Other(s) => s,
        }
    }
}

impl From<&str> for PostStatus {
    fn from(s: &str) -> Self {
        match s {
            "draft" => PostStatus::Draft,
            "publish" => PostStatus::Publish,
            other => PostStatus::Other(other.to_owned()),
        }
    }
}

impl Serialize for PostStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PostStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(PostStatus::from(s.as_str()))
    }
}

/// The mutable field set of a stored document - exactly what an edit
/// replaces. The identifier lives on [`StoredPost`] because the store
/// assigns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub kind: PostType,
    pub status: PostStatus,
    pub title: String,
    pub body: String,
    pub slug: String,
    /// Set exactly once, the first time the post is published.
    pub pub_date: Option<DateTime<Utc>>,
    pub modified: DateTime<Utc>,
    /// Target slug; present only on redirect records.
    pub redirect: Option<String>,
    /// Store-managed, preserved verbatim across edits. Clients cannot write it.
    pub guest_access_tokens: Value,
}

/// Whether a wire struct is parsed for a create or an edit call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Create,
    Edit,
}

/// A malformed MetaWeblog struct.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("field `{field}` must be a string")]
    FieldType { field: &'static str },

    #[error("unparseable dateCreated: {0}")]
    Timestamp(String),
}

impl Post {
    /// Marker left behind when a published post's slug changes, so requests
    /// for the old address can be forwarded.
    pub fn redirect(old_slug: String, new_slug: String) -> Self {
        Self {
            kind: PostType::Redirect,
            status: PostStatus::Publish,
            title: String::new(),
            body: String::new(),
            slug: old_slug,
            pub_date: None,
            modified: Utc::now(),
            redirect: Some(new_slug),
            guest_access_tokens: Value::Null,
        }
    }

    /// Build a post from a MetaWeblog field bag.
    ///
    /// The trailing `publish` RPC parameter is ignored: clients put the real
    /// status in `post_status` (MarsEdit sends the parameter wrong). A
    /// missing status means draft. `dateCreated` is only honored on edits,
    /// where it carries the existing publication date back to us; creates
    /// start unpublished and the workflow stamps `pub_date` when warranted.
    pub fn from_metaweblog(
        bag: &Map<String, Value>,
        kind: PostType,
        mode: ParseMode,
    ) -> Result<Self, WireError> {
        let title = opt_str(bag, "title")?.unwrap_or_default().to_owned();
        let body = opt_str(bag, "description")?.unwrap_or_default().to_owned();

        let slug = match opt_str(bag, "wp_slug")? {
            Some(s) if !s.is_empty() => s.to_owned(),
            _ => slugify(&title),
        };

        let status = opt_str(bag, "post_status")?
            .map(PostStatus::from)
            .unwrap_or(PostStatus::Draft);

        let pub_date = match mode {
            ParseMode::Edit => opt_str(bag, "dateCreated")?
                .map(|raw| {
                    DateTime::parse_from_rfc3339(raw)
                        .map(|d| d.with_timezone(&Utc))
                        .map_err(|_| WireError::Timestamp(raw.to_owned()))
                })
                .transpose()?,
            ParseMode::Create => None,
        };

        Ok(Self {
            kind,
            status,
            title,
            body,
            slug,
            pub_date,
            modified: Utc::now(),
            redirect: None,
            guest_access_tokens: Value::Null,
        })
    }
}

/// A document as it exists in the store: identifier plus field set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPost {
    pub id: Uuid,
    #[serde(flatten)]
    pub post: Post,
}

impl StoredPost {
    /// External wire representation of a post or page.
    pub fn to_metaweblog(&self, base_url: &str) -> Value {
        let link = format!("{}/{}", base_url.trim_end_matches('/'), self.post.slug);

        let mut doc = json!({
            "postid": self.id.to_string(),
            "title": self.post.title,
            "description": self.post.body,
            "wp_slug": self.post.slug,
            "post_status": self.post.status.as_str(),
            "post_type": self.post.kind.as_str(),
            "link": link.as_str(),
            "permaLink": link.as_str(),
            "date_modified": self.post.modified.to_rfc3339(),
        });

        if let Some(date) = self.post.pub_date {
            doc["dateCreated"] = json!(date.to_rfc3339());
        }

        doc
    }
}

fn opt_str<'a>(bag: &'a Map<String, Value>, field: &'static str) -> Result<Option<&'a str>, WireError> {
    match bag.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(WireError::FieldType { field }),
    }
}

/// Lowercase the title and collapse every non-alphanumeric run into a single
/// hyphen. Fallback when the client supplies no `wp_slug`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
