use sc_core::{StoreError, UniqueField};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Validation failed on '{field}': {message} {location}")]
    Validation {
        field: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Username already taken: {username} {location}")]
    UsernameTaken {
        username: String,
        location: ErrorLocation,
    },

    #[error("Email already registered {location}")]
    EmailTaken { location: ErrorLocation },

    #[error("Concurrent identity creation conflict on {field} {location}")]
    IdentityConflict {
        field: UniqueField,
        location: ErrorLocation,
    },

    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    #[error("Identity store unavailable: {source} {location}")]
    IdentityStoreUnavailable {
        #[source]
        source: StoreError,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {message} {location}")]
    HashingFailure {
        message: String,
        location: ErrorLocation,
    },

    #[error("Malformed password digest: {message} {location}")]
    MalformedDigest {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token malformed: {message} {location}")]
    TokenMalformed {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token signature invalid {location}")]
    TokenSignatureInvalid { location: ErrorLocation },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Token issuance failed: {source} {location}")]
    TokenIssue {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Missing or malformed authorization header {location}")]
    MissingCredentials { location: ErrorLocation },

    #[error("Unauthenticated {location}")]
    Unauthenticated { location: ErrorLocation },
}

impl AuthError {
    /// The single rejection for failed local logins.
    ///
    /// Deliberately not `#[track_caller]`: an unknown username and a wrong
    /// password must produce the same value, location included.
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The single rejection for failed bearer-token checks (same reasoning as
    /// [`AuthError::invalid_credentials`]).
    pub fn unauthenticated() -> Self {
        AuthError::Unauthenticated {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation<S: Into<String>>(field: &'static str, message: S) -> Self {
        AuthError::Validation {
            field,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn username_taken<S: Into<String>>(username: S) -> Self {
        AuthError::UsernameTaken {
            username: username.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn hashing<S: Into<String>>(message: S) -> Self {
        AuthError::HashingFailure {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Machine-readable code for client responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::UsernameTaken { .. } => "USERNAME_TAKEN",
            Self::EmailTaken { .. } => "EMAIL_TAKEN",
            Self::IdentityConflict { .. } => "IDENTITY_CONFLICT",
            Self::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            Self::IdentityStoreUnavailable { .. } => "SERVICE_UNAVAILABLE",
            Self::HashingFailure { .. } | Self::MalformedDigest { .. } | Self::TokenIssue { .. } => {
                "INTERNAL_ERROR"
            }
            Self::TokenMalformed { .. }
            | Self::TokenSignatureInvalid { .. }
            | Self::TokenExpired { .. }
            | Self::MissingCredentials { .. }
            | Self::Unauthenticated { .. } => "UNAUTHENTICATED",
        }
    }

    /// Failures of the caller's proof of identity (password or token).
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::TokenMalformed { .. }
                | Self::TokenSignatureInvalid { .. }
                | Self::TokenExpired { .. }
                | Self::MissingCredentials { .. }
                | Self::Unauthenticated { .. }
        )
    }

    /// Infrastructure failures; details stay in the logs.
    pub fn is_dependency_failure(&self) -> bool {
        matches!(
            self,
            Self::IdentityStoreUnavailable { .. }
                | Self::HashingFailure { .. }
                | Self::MalformedDigest { .. }
                | Self::TokenIssue { .. }
        )
    }

    /// Field name for validation-style errors
    pub fn field(&self) -> Option<String> {
        match self {
            Self::Validation { field, .. } => Some(field.to_string()),
            Self::UsernameTaken { .. } => Some("username".to_string()),
            Self::EmailTaken { .. } => Some("email".to_string()),
            _ => None,
        }
    }
}

impl From<StoreError> for AuthError {
    #[track_caller]
    fn from(source: StoreError) -> Self {
        AuthError::IdentityStoreUnavailable {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
