use crate::repositories::{from_millis, parse_uuid};
use crate::{DbError, Result as DbErrorResult};

use sc_core::Article;

use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

const ARTICLE_COLUMNS: &str = "id, user_id, title, content, url, author, source, summary, tags, \
                               published_at, created_at, updated_at";

#[derive(FromRow)]
struct ArticleRow {
    id: String,
    user_id: String,
    title: String,
    content: String,
    url: String,
    author: String,
    source: String,
    summary: Option<String>,
    tags: String,
    published_at: i64,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DbError;

    fn try_from(row: ArticleRow) -> DbErrorResult<Self> {
        let tags: Vec<String> = serde_json::from_str(&row.tags)
            .map_err(|e| DbError::decode(format!("articles.tags: {}", e)))?;

        Ok(Article {
            id: parse_uuid(&row.id, "articles.id")?,
            user_id: parse_uuid(&row.user_id, "articles.user_id")?,
            title: row.title,
            content: row.content,
            url: row.url,
            author: row.author,
            source: row.source,
            summary: row.summary,
            tags,
            published_at: from_millis(row.published_at, "articles.published_at")?,
            created_at: from_millis(row.created_at, "articles.created_at")?,
            updated_at: from_millis(row.updated_at, "articles.updated_at")?,
        })
    }
}

fn collect_articles(rows: Vec<ArticleRow>) -> DbErrorResult<Vec<Article>> {
    rows.into_iter().map(Article::try_from).collect()
}

const NEWEST_FIRST: &str = "ORDER BY published_at DESC, created_at DESC, id ASC";

/// Escape LIKE wildcards so the query is matched literally.
///
/// Case is left alone: SQLite's `LIKE` already folds ASCII letters and
/// compares everything else byte for byte.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

pub struct ArticleRepository {
    pool: SqlitePool,
}

impl ArticleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an article. A duplicate URL surfaces as `DbError::Conflict`.
    pub async fn create(&self, article: &Article) -> DbErrorResult<()> {
        let tags = serde_json::to_string(&article.tags)
            .map_err(|e| DbError::decode(format!("articles.tags could not be encoded: {}", e)))?;

        sqlx::query(
            r#"
              INSERT INTO articles (
                  id, user_id, title, content, url, author, source, summary, tags,
                  published_at, created_at, updated_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(article.id.to_string())
        .bind(article.user_id.to_string())
        .bind(&article.title)
        .bind(&article.content)
        .bind(&article.url)
        .bind(&article.author)
        .bind(&article.source)
        .bind(&article.summary)
        .bind(tags)
        .bind(article.published_at.timestamp_millis())
        .bind(article.created_at.timestamp_millis())
        .bind(article.updated_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Article>> {
        let sql = format!("SELECT {} FROM articles WHERE id = ?", ARTICLE_COLUMNS);

        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Article::try_from).transpose()
    }

    /// One page of articles, most recently published first. `page` is 1-based.
    pub async fn list(&self, page: u32, page_size: u32) -> DbErrorResult<Vec<Article>> {
        let offset = i64::from(page.saturating_sub(1)) * i64::from(page_size);
        let sql = format!(
            "SELECT {} FROM articles {} LIMIT ? OFFSET ?",
            ARTICLE_COLUMNS, NEWEST_FIRST
        );

        let rows = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(i64::from(page_size))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        collect_articles(rows)
    }

    pub async fn count(&self) -> DbErrorResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Substring match on title, content or author; ASCII letters match
    /// regardless of case
    pub async fn search(&self, query: &str) -> DbErrorResult<Vec<Article>> {
        let pattern = like_pattern(query);
        let sql = format!(
            r#"
              SELECT {} FROM articles
              WHERE title LIKE ? ESCAPE '\'
                 OR content LIKE ? ESCAPE '\'
                 OR author LIKE ? ESCAPE '\'
              {}
              "#,
            ARTICLE_COLUMNS, NEWEST_FIRST
        );

        let rows = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?;

        collect_articles(rows)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> DbErrorResult<Vec<Article>> {
        let sql = format!(
            "SELECT {} FROM articles WHERE user_id = ? {}",
            ARTICLE_COLUMNS, NEWEST_FIRST
        );

        let rows = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        collect_articles(rows)
    }
}
