use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchArticlesQuery {
    #[serde(default)]
    pub q: String,
}
