use crate::{AuthContext, AuthError, Result as AuthErrorResult, SessionTokenCodec};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, warn};

const BEARER_SCHEME: &str = "Bearer";

/// Request-boundary bearer token check.
///
/// Per request: no header -> `MissingCredentials`; header present but not
/// exactly `Bearer <token>` -> `MissingCredentials`; token fails any codec
/// check -> `Unauthenticated`; otherwise the request is authenticated.
/// Every rejection is terminal.
#[derive(Clone)]
pub struct AuthorizationGate {
    codec: Arc<SessionTokenCodec>,
}

impl AuthorizationGate {
    pub fn new(codec: Arc<SessionTokenCodec>) -> Self {
        Self { codec }
    }

    /// Check the raw `Authorization` header value.
    ///
    /// Codec failures are collapsed into a single `Unauthenticated` so callers
    /// cannot tell an expired token from a forged one.
    pub fn authorize(&self, authorization: Option<&str>) -> AuthErrorResult<AuthContext> {
        let token = extract_bearer_token(authorization)?;

        let identity_id = self.codec.validate(token).map_err(|e| {
            warn!("Bearer token rejected: {}", e);
            AuthError::unauthenticated()
        })?;

        debug!("Authenticated request for identity {}", identity_id);
        Ok(AuthContext::new(identity_id))
    }
}

/// Extract the token from an `Authorization` header value.
///
/// Accepts exactly the scheme, one space, and a non-empty token. Anything
/// else (lowercase scheme, extra spaces, trailing parts) is rejected.
#[track_caller]
pub fn extract_bearer_token(authorization: Option<&str>) -> AuthErrorResult<&str> {
    let missing = || AuthError::MissingCredentials {
        location: ErrorLocation::from(Location::caller()),
    };

    let header = authorization.ok_or_else(missing)?;

    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(BEARER_SCHEME), Some(token), None) if !token.is_empty() => Ok(token),
        _ => {
            warn!("Invalid authorization header shape");
            Err(missing())
        }
    }
}
