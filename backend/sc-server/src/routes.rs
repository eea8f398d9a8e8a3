use crate::{
    AppState, create_article, current_user, get_article, health, list_articles, list_my_articles,
    list_user_articles, login_user, register_user, search_articles, wx_login,
};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Users
        .route("/api/users", post(register_user))
        .route("/api/users/login", post(login_user))
        .route("/api/users/wx-login", post(wx_login))
        .route("/api/users/me", get(current_user))
        .route("/api/users/{id}/articles", get(list_user_articles))
        // Articles; static segments win over `{id}`
        .route("/api/articles", get(list_articles).post(create_article))
        .route("/api/articles/search", get(search_articles))
        .route("/api/articles/mine", get(list_my_articles))
        .route("/api/articles/{id}", get(get_article))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
