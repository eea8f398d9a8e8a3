use sc_core::Article;

use serde::Serialize;

/// Article DTO for JSON serialization
#[derive(Debug, Serialize)]
pub struct ArticleDto {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub url: String,
    pub author: String,
    pub source: String,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub published_at: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Article> for ArticleDto {
    fn from(a: Article) -> Self {
        Self {
            id: a.id.to_string(),
            user_id: a.user_id.to_string(),
            title: a.title,
            content: a.content,
            url: a.url,
            author: a.author,
            source: a.source,
            summary: a.summary,
            tags: a.tags,
            published_at: a.published_at.timestamp(),
            created_at: a.created_at.timestamp(),
            updated_at: a.updated_at.timestamp(),
        }
    }
}
