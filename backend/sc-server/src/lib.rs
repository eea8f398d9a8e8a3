pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;


pub use api::{
    articles::{
        article_dto::ArticleDto,
        article_list_response::ArticleListResponse,
        article_response::ArticleResponse,
        articles::{
            create_article, get_article, list_articles, list_my_articles, list_user_articles,
            search_articles,
        },
        create_article_request::CreateArticleRequest,
        list_articles_query::ListArticlesQuery,
        search_articles_query::SearchArticlesQuery,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::authenticated_user::AuthenticatedUser,
    users::{
        login_request::LoginRequest,
        register_user_request::RegisterUserRequest,
        session_response::SessionResponse,
        user_dto::UserDto,
        user_response::UserResponse,
        users::{current_user, login_user, register_user, wx_login},
        wx_login_request::WxLoginRequest,
    },
};
pub use app_state::AppState;
pub use error::{Result as ServerResult, ServerError};

pub use crate::routes::build_router;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
