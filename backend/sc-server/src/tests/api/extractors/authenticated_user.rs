use crate::tests::{TEST_SECRET, create_test_state};
use crate::{ApiError, AppState, AuthenticatedUser};

use sc_auth::SessionTokenCodec;

use axum::{body::Body, extract::FromRequestParts, http::Request};
use chrono::{TimeDelta, Utc};
use googletest::prelude::*;
use uuid::Uuid;

async fn extract(
    state: &AppState,
    header: Option<&str>,
) -> std::result::Result<AuthenticatedUser, ApiError> {
    let mut builder = Request::builder();
    if let Some(value) = header {
        builder = builder.header("Authorization", value);
    }
    let (mut parts, _) = builder.body(Body::empty()).unwrap().into_parts();

    AuthenticatedUser::from_request_parts(&mut parts, state).await
}

#[tokio::test]
async fn given_valid_bearer_token_when_extracted_then_identity_is_attached() {
    let state = create_test_state().await;
    let id = Uuid::new_v4();
    let issued = state.resolver.codec().issue(id).unwrap();

    let user = extract(&state, Some(&format!("Bearer {}", issued.token)))
        .await
        .unwrap();

    assert_that!(user.identity_id(), eq(id));
}

#[tokio::test]
async fn given_no_header_when_extracted_then_rejected_as_unauthenticated() {
    let state = create_test_state().await;

    let rejection = extract(&state, None).await.unwrap_err();

    assert!(matches!(
        rejection,
        ApiError::Unauthenticated {
            code: "UNAUTHENTICATED",
            ..
        }
    ));
}

#[tokio::test]
async fn given_wrong_scheme_when_extracted_then_rejected() {
    let state = create_test_state().await;

    let rejection = extract(&state, Some("Basic YWxpY2U6cHc=")).await.unwrap_err();

    assert_that!(rejection.status().as_u16(), eq(401));
}

#[tokio::test]
async fn given_token_signed_with_other_secret_when_extracted_then_rejected() {
    let state = create_test_state().await;
    let forger = SessionTokenCodec::with_hs256(
        b"a-completely-different-secret-value!",
        TimeDelta::hours(1),
    );
    let forged = forger.issue(Uuid::new_v4()).unwrap();

    let rejection = extract(&state, Some(&format!("Bearer {}", forged.token)))
        .await
        .unwrap_err();

    assert_that!(rejection.status().as_u16(), eq(401));
}

#[tokio::test]
async fn given_expired_token_when_extracted_then_rejected() {
    let state = create_test_state().await;
    let codec = SessionTokenCodec::with_hs256(TEST_SECRET.as_bytes(), TimeDelta::hours(1));
    let issued = codec
        .issue_at(
            Uuid::new_v4(),
            TimeDelta::seconds(60),
            Utc::now() - TimeDelta::hours(2),
        )
        .unwrap();

    let rejection = extract(&state, Some(&format!("Bearer {}", issued.token)))
        .await
        .unwrap_err();

    assert_that!(rejection.status().as_u16(), eq(401));
}
