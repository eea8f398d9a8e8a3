use crate::ArticleDto;

use serde::Serialize;

/// Single article response
#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub article: ArticleDto,
}
