use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,

    /// Must be unique across all articles
    pub url: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub source: String,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Unix seconds; defaults to submission time
    #[serde(default)]
    pub published_at: Option<i64>,
}
