use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] sc_config::ConfigError),

    #[error("Auth setup error: {0}")]
    Auth(#[from] sc_auth::AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sc_db::DbError),

    #[error("Startup error: {message}")]
    Startup { message: String },

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
