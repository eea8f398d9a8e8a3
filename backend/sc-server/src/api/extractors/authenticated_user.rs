//! Axum extractor for bearer-token authentication

use crate::{ApiError, AppState};

use sc_auth::AuthContext;

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

/// The caller's identity, established from the `Authorization: Bearer` header.
///
/// Only the token is checked; the identity store is never consulted here.
/// Handlers that need the stored record look it up themselves.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub AuthContext);

impl AuthenticatedUser {
    pub fn identity_id(&self) -> Uuid {
        self.0.identity_id
    }
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            // A non-ASCII header value is treated the same as a missing one
            let header = parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok());

            let context = state.gate.authorize(header)?;
            Ok(AuthenticatedUser(context))
        }
    }
}
