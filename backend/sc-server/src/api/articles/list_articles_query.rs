use serde::Deserialize;

/// Query parameters for listing articles
#[derive(Debug, Deserialize)]
pub struct ListArticlesQuery {
    /// 1-based
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}
