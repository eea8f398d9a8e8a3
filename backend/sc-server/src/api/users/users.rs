//! User REST API handlers
//!
//! Registration and both login paths go through the identity resolver;
//! `/me` is the only handler that reads the store directly.

use crate::{
    ApiError, ApiResult, AppState, AuthenticatedUser, LoginRequest, RegisterUserRequest,
    SessionResponse, UserResponse, WxLoginRequest,
};

use sc_auth::CredentialSubmission;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

/// POST /api/users
///
/// Register a local identity and open a session for it
pub async fn register_user(
    State(state): State<AppState>,
    body: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let Json(req) = body?;
    let session = state
        .resolver
        .resolve(CredentialSubmission::from(req))
        .await?;

    Ok((StatusCode::CREATED, Json(session.into())))
}

/// POST /api/users/login
pub async fn login_user(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<SessionResponse>> {
    let Json(req) = body?;
    let session = state
        .resolver
        .resolve(CredentialSubmission::from(req))
        .await?;

    Ok(Json(session.into()))
}

/// POST /api/users/wx-login
///
/// Create or refresh the identity linked to a WeChat open id
pub async fn wx_login(
    State(state): State<AppState>,
    body: Result<Json<WxLoginRequest>, JsonRejection>,
) -> ApiResult<Json<SessionResponse>> {
    let Json(req) = body?;
    let session = state
        .resolver
        .resolve(CredentialSubmission::from(req))
        .await?;

    Ok(Json(session.into()))
}

/// GET /api/users/me
pub async fn current_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<UserResponse>> {
    let id = user.identity_id();

    // A valid token for a deleted identity
    let record = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", id)))?;

    Ok(Json(UserResponse {
        user: record.into(),
    }))
}
