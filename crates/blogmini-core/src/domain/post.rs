use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::timestamp;
use crate::error::DomainError;

/// Author recorded when a post is created without one.
pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// Post entity - represents one blog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Absent until the first update.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::option"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    /// Keys this version does not know about, carried through rewrites.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// Create a new post with the given id, stamped at `now`.
    pub fn new(id: String, draft: NewPost, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
            author: draft.author,
            created_at: now,
            updated_at: None,
            extra: Map::new(),
        }
    }

    /// Merge the provided fields into this post and stamp `updated_at`.
    ///
    /// The stamp is always strictly later than `created_at` and any earlier
    /// `updated_at`, even when the clock has not moved on.
    pub fn apply(&mut self, patch: &PostPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(author) = &patch.author {
            self.author = author.clone();
        }

        let last = self.updated_at.unwrap_or(self.created_at);
        let floor = last + Duration::milliseconds(1);
        self.updated_at = Some(now.max(floor));
    }
}

/// A validated request to create a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
}

impl NewPost {
    /// Check required fields and fill in the default author.
    ///
    /// Missing and empty strings are treated alike.
    pub fn try_new(
        title: Option<String>,
        content: Option<String>,
        author: Option<String>,
    ) -> Result<Self, DomainError> {
        match (non_empty(title), non_empty(content)) {
            (Some(title), Some(content)) => Ok(Self {
                title,
                content,
                author: non_empty(author).unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            }),
            _ => Err(DomainError::Validation(
                "Title and content are required".to_string(),
            )),
        }
    }
}

/// Fields to overwrite on update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

impl PostPatch {
    /// Build a patch, treating empty strings as omitted.
    pub fn new(title: Option<String>, content: Option<String>, author: Option<String>) -> Self {
        Self {
            title: non_empty(title),
            content: non_empty(content),
            author: non_empty(author),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
