use crate::UniqueField;

use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error on '{field}': {message} {location}")]
    Validation {
        field: &'static str,
        message: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    #[track_caller]
    pub fn validation<S: Into<String>>(field: &'static str, message: S) -> Self {
        CoreError::Validation {
            field,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;

/// Failures reported by an [`IdentityStore`](crate::IdentityStore) or any other
/// persistence collaborator.
///
/// `Conflict` is an expected outcome: the storage layer is the only arbiter of
/// uniqueness, so concurrent writers learn about each other through it.
#[derive(Error, Debug)]
pub enum StoreError {
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

    #[error("Store unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },
}

impl StoreError {
    #[track_caller]
    pub fn conflict(field: UniqueField) -> Self {
        StoreError::Conflict {
            field,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        StoreError::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        StoreError::Unavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The field whose uniqueness was violated, if this is a conflict.
    pub fn conflict_field(&self) -> Option<UniqueField> {
        match self {
            Self::Conflict { field, .. } => Some(*field),
            _ => None,
        }
    }
}

pub type StoreResult<T> = StdResult<T, StoreError>;
