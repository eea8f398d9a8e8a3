pub mod article_repository;
pub mod user_repository;

use crate::{DbError, Result as DbErrorResult};

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[track_caller]
pub(crate) fn parse_uuid(value: &str, column: &str) -> DbErrorResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| DbError::decode(format!("{}: {}", column, e)))
}

#[track_caller]
pub(crate) fn from_millis(value: i64, column: &str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value)
        .ok_or_else(|| DbError::decode(format!("{}: timestamp {} out of range", column, value)))
}
