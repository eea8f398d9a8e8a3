//! Article entity - a bookmarked piece of content submitted by a user.

use crate::{CoreError, Result as CoreErrorResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookmarked article. `url` is unique across all articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    /// Owner (the identity that submitted it)
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub url: String,
    pub author: String,
    pub source: String,
    /// Stored exactly as submitted
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Create a new article with default values
    pub fn new(user_id: Uuid, title: String, url: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            content: String::new(),
            url,
            author: String::new(),
            source: String::new(),
            summary: None,
            tags: Vec::new(),
            published_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reject articles that cannot be stored meaningfully
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::validation("title", "title cannot be empty"));
        }
        if self.url.trim().is_empty() {
            return Err(CoreError::validation("url", "url cannot be empty"));
        }
        Ok(())
    }
}
