//! REST API error types
//!
//! Every failure leaves the server as `{"error": {"code", "message", "field?"}}`
//! with a matching status. Dependency failures get generic text; the full
//! error, location included, goes to the log.

use sc_auth::AuthError;
use sc_core::{CoreError, StoreError, UniqueField};
use sc_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g. "USERNAME_TAKEN")
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// 404
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// 400
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// 409, uniqueness lost to an existing or concurrent record
    #[error("Conflict ({code}): {message} {location}")]
    Conflict {
        code: &'static str,
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// 401
    #[error("Unauthenticated ({code}) {location}")]
    Unauthenticated {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// 503
    #[error("Service unavailable: {message} {location}")]
    ServiceUnavailable {
        message: String,
        location: ErrorLocation,
    },

    /// 500
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        ApiError::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation<S: Into<String>>(field: &str, message: S) -> Self {
        ApiError::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[track_caller]
    fn unique_conflict(field: UniqueField) -> Self {
        ApiError::Conflict {
            code: "CONFLICT",
            message: format!("A record with this {} already exists", field),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    fn unavailable() -> Self {
        ApiError::ServiceUnavailable {
            message: "Service temporarily unavailable".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    fn internal() -> Self {
        ApiError::Internal {
            message: "Internal server error".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::debug!("{}", self);
        }

        let body = match self {
            ApiError::NotFound { message, .. } => ApiErrorBody {
                code: "NOT_FOUND".into(),
                message,
                field: None,
            },
            ApiError::Validation { message, field, .. } => ApiErrorBody {
                code: "VALIDATION_ERROR".into(),
                message,
                field,
            },
            ApiError::Conflict {
                code,
                message,
                field,
                ..
            } => ApiErrorBody {
                code: code.into(),
                message,
                field,
            },
            ApiError::Unauthenticated { code, message, .. } => ApiErrorBody {
                code: code.into(),
                message,
                field: None,
            },
            ApiError::ServiceUnavailable { message, .. } => ApiErrorBody {
                code: "SERVICE_UNAVAILABLE".into(),
                message,
                field: None,
            },
            ApiError::Internal { message, .. } => ApiErrorBody {
                code: "INTERNAL_ERROR".into(),
                message,
                field: None,
            },
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        let code = e.error_code();

        if e.is_dependency_failure() {
            log::error!("Identity dependency failure: {}", e);
            return match e {
                AuthError::IdentityStoreUnavailable { .. } => ApiError::ServiceUnavailable {
                    message: "Identity service temporarily unavailable".to_string(),
                    location,
                },
                _ => ApiError::Internal {
                    message: "Internal server error".to_string(),
                    location,
                },
            };
        }

        match e {
            AuthError::Validation { field, message, .. } => ApiError::Validation {
                message,
                field: Some(field.to_string()),
                location,
            },
            AuthError::UsernameTaken { username, .. } => ApiError::Conflict {
                code,
                message: format!("Username '{}' is already taken", username),
                field: Some("username".to_string()),
                location,
            },
            AuthError::EmailTaken { .. } => ApiError::Conflict {
                code,
                message: "Email is already registered".to_string(),
                field: Some("email".to_string()),
                location,
            },
            AuthError::IdentityConflict { .. } => ApiError::Conflict {
                code,
                message: "Identity was created concurrently, retry the request".to_string(),
                field: None,
                location,
            },
            AuthError::InvalidCredentials { .. } => ApiError::Unauthenticated {
                code,
                message: "Invalid username or password".to_string(),
                location,
            },
            _ => ApiError::Unauthenticated {
                code,
                message: "Authentication required".to_string(),
                location,
            },
        }
    }
}

impl From<StoreError> for ApiError {
    #[track_caller]
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict { field, .. } => ApiError::unique_conflict(field),
            StoreError::NotFound { message, .. } => ApiError::not_found(message),
            StoreError::Unavailable { .. } => {
                log::error!("Store error: {}", e);
                ApiError::unavailable()
            }
        }
    }
}

impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        match e {
            DbError::Conflict { field, .. } => ApiError::unique_conflict(field),
            DbError::NotFound { message, .. } => ApiError::not_found(message),
            _ => {
                // Don't expose internal database details to clients
                log::error!("Database error: {}", e);
                ApiError::internal()
            }
        }
    }
}

impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation { field, message, .. } => ApiError::validation(field, message),
        }
    }
}

impl From<uuid::Error> for ApiError {
    #[track_caller]
    fn from(e: uuid::Error) -> Self {
        ApiError::Validation {
            message: format!("Invalid UUID format: {}", e),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(e: JsonRejection) -> Self {
        ApiError::Validation {
            message: format!("Invalid request body: {}", e.body_text()),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    #[track_caller]
    fn from(e: QueryRejection) -> Self {
        ApiError::Validation {
            message: format!("Invalid query string: {}", e.body_text()),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
