pub mod article_dto;
pub mod article_list_response;
pub mod article_response;
pub mod articles;
pub mod create_article_request;
pub mod list_articles_query;
pub mod search_articles_query;
