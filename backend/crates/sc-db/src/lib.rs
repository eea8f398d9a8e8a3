pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::database::{open_pool, ping, run_migrations};
pub use error::{DbError, Result};
pub use repositories::article_repository::ArticleRepository;
pub use repositories::user_repository::UserRepository;
