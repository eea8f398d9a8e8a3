use crate::ArticleDto;

use serde::Serialize;

/// List of articles response. Paging fields are only set for `GET /api/articles`.
#[derive(Debug, Serialize)]
pub struct ArticleListResponse {
    pub articles: Vec<ArticleDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

impl ArticleListResponse {
    pub fn unpaged(articles: Vec<ArticleDto>) -> Self {
        Self {
            articles,
            page: None,
            page_size: None,
            total: None,
        }
    }
}
