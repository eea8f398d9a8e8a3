use sc_core::{StoreError, UniqueField};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Unique constraint violated on {field} {location}")]
    Conflict {
        field: UniqueField,
        location: ErrorLocation,
    },

    #[error("Record not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Stored row could not be decoded: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },
}

impl DbError {
    #[track_caller]
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        if let Some(field) = unique_violation_field(&source) {
            return Self::Conflict {
                field,
                location: ErrorLocation::from(Location::caller()),
            };
        }

        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for StoreError {
    #[track_caller]
    fn from(err: DbError) -> Self {
        match err {
            DbError::Conflict { field, .. } => StoreError::conflict(field),
            DbError::NotFound { message, .. } => StoreError::not_found(message),
            other => StoreError::unavailable(other.to_string()),
        }
    }
}

/// Map a SQLite `UNIQUE constraint failed: <table>.<column>` error to the
/// column it names.
fn unique_violation_field(err: &sqlx::Error) -> Option<UniqueField> {
    let db_err = err.as_database_error()?;
    if !db_err.is_unique_violation() {
        return None;
    }

    let column = db_err.message().rsplit('.').next()?.trim();
    match column {
        "username" => Some(UniqueField::Username),
        "email" => Some(UniqueField::Email),
        "external_id" => Some(UniqueField::ExternalId),
        "url" => Some(UniqueField::Url),
        _ => None,
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
