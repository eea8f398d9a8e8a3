use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (identity id)
    pub sub: String,
    /// Expiration timestamp (Unix seconds)
    pub exp: i64,
    /// Issued at timestamp (Unix seconds)
    pub iat: i64,
}

impl SessionClaims {
    pub fn new(identity_id: Uuid, issued_at: i64, expires_at: i64) -> Self {
        Self {
            sub: identity_id.to_string(),
            exp: expires_at,
            iat: issued_at,
        }
    }

    /// Parse the subject back into an identity id.
    /// Only called after the signature has been verified.
    #[track_caller]
    pub fn identity_id(&self) -> AuthErrorResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|e| AuthError::TokenMalformed {
            message: format!("sub is not an identity id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
