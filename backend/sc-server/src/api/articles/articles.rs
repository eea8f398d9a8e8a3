//! Article REST API handlers

use crate::{
    ApiError, ApiResult, AppState, ArticleDto, ArticleListResponse, ArticleResponse,
    AuthenticatedUser, CreateArticleRequest, DEFAULT_PAGE_SIZE, ListArticlesQuery, MAX_PAGE_SIZE,
    SearchArticlesQuery,
};

use sc_core::Article;
use sc_db::ArticleRepository;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::DateTime;
use log::info;
use uuid::Uuid;

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/articles
///
/// Submit an article owned by the caller
pub async fn create_article(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    body: Result<Json<CreateArticleRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ArticleResponse>)> {
    let Json(req) = body?;
    let mut article = Article::new(user.identity_id(), req.title, req.url);
    article.content = req.content;
    article.author = req.author;
    article.source = req.source;
    article.summary = req.summary;
    article.tags = req.tags;
    if let Some(secs) = req.published_at {
        article.published_at = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| ApiError::validation("published_at", "timestamp out of range"))?;
    }
    article.validate()?;

    let repo = ArticleRepository::new(state.pool.clone());
    repo.create(&article).await?;

    info!("Article {} submitted by {}", article.id, article.user_id);

    Ok((
        StatusCode::CREATED,
        Json(ArticleResponse {
            article: article.into(),
        }),
    ))
}

/// GET /api/articles/{id}
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ArticleResponse>> {
    let article_id = Uuid::parse_str(&id)?;

    let repo = ArticleRepository::new(state.pool.clone());
    let article = repo
        .find_by_id(article_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Article {} not found", id)))?;

    Ok(Json(ArticleResponse {
        article: article.into(),
    }))
}

/// GET /api/articles?page=&page_size=
///
/// Most recently published first
pub async fn list_articles(
    State(state): State<AppState>,
    query: Result<Query<ListArticlesQuery>, QueryRejection>,
) -> ApiResult<Json<ArticleListResponse>> {
    let Query(query) = query?;
    let page = query.page.unwrap_or(1);
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

    if page < 1 {
        return Err(ApiError::validation("page", "page must be at least 1"));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(ApiError::validation(
            "page_size",
            format!("page_size must be 1-{}", MAX_PAGE_SIZE),
        ));
    }

    let repo = ArticleRepository::new(state.pool.clone());
    let articles = repo.list(page, page_size).await?;
    let total = repo.count().await?;

    Ok(Json(ArticleListResponse {
        articles: articles.into_iter().map(ArticleDto::from).collect(),
        page: Some(page),
        page_size: Some(page_size),
        total: Some(total),
    }))
}

/// GET /api/articles/search?q=
pub async fn search_articles(
    State(state): State<AppState>,
    query: Result<Query<SearchArticlesQuery>, QueryRejection>,
) -> ApiResult<Json<ArticleListResponse>> {
    let Query(query) = query?;
    let q = query.q.trim();
    if q.is_empty() {
        return Err(ApiError::validation("q", "search query cannot be empty"));
    }

    let repo = ArticleRepository::new(state.pool.clone());
    let articles = repo.search(q).await?;

    Ok(Json(ArticleListResponse::unpaged(
        articles.into_iter().map(ArticleDto::from).collect(),
    )))
}

/// GET /api/articles/mine
pub async fn list_my_articles(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ArticleListResponse>> {
    let repo = ArticleRepository::new(state.pool.clone());
    let articles = repo.find_by_user(user.identity_id()).await?;

    Ok(Json(ArticleListResponse::unpaged(
        articles.into_iter().map(ArticleDto::from).collect(),
    )))
}

/// GET /api/users/{id}/articles
///
/// Public listing of everything one user has submitted
pub async fn list_user_articles(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ArticleListResponse>> {
    let user_id = Uuid::parse_str(&id)?;

    if state.users.find_by_id(user_id).await?.is_none() {
        return Err(ApiError::not_found(format!("User {} not found", id)));
    }

    let repo = ArticleRepository::new(state.pool.clone());
    let articles = repo.find_by_user(user_id).await?;

    Ok(Json(ArticleListResponse::unpaged(
        articles.into_iter().map(ArticleDto::from).collect(),
    )))
}
