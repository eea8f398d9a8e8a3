use crate::ApiError;

use sc_auth::AuthError;
use sc_core::{CoreError, StoreError, UniqueField};
use sc_db::DbError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use googletest::prelude::*;
use http::StatusCode;
use http_body_util::BodyExt;

async fn render(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_not_found_when_rendered_then_404_with_json_body() {
    let (status, json) = render(ApiError::not_found("Article x not found")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "Article x not found");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn given_auth_validation_error_when_converted_then_400_names_field() {
    let error = ApiError::from(AuthError::validation(
        "username",
        "username cannot be empty",
    ));
    let (status, json) = render(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "username");
}

#[tokio::test]
async fn given_username_taken_when_converted_then_409_username_taken() {
    let (status, json) = render(AuthError::username_taken("alice").into()).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "USERNAME_TAKEN");
    assert_eq!(json["error"]["field"], "username");
}

#[tokio::test]
async fn given_email_taken_when_converted_then_409_email_taken() {
    let error = ApiError::from(AuthError::EmailTaken {
        location: ErrorLocation::from(Location::caller()),
    });
    let (status, json) = render(error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "EMAIL_TAKEN");
    assert_eq!(json["error"]["field"], "email");
}

#[tokio::test]
async fn given_invalid_credentials_when_converted_then_401_without_detail() {
    let (status, json) = render(AuthError::invalid_credentials().into()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "INVALID_CREDENTIALS");
    assert_eq!(json["error"]["message"], "Invalid username or password");
}

#[tokio::test]
async fn given_missing_and_rejected_tokens_when_converted_then_bodies_are_identical() {
    let missing = sc_auth::extract_bearer_token(None).unwrap_err();
    let (missing_status, missing_json) = render(missing.into()).await;
    let (rejected_status, rejected_json) = render(AuthError::unauthenticated().into()).await;

    assert_eq!(missing_status, StatusCode::UNAUTHORIZED);
    assert_eq!(rejected_status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing_json, rejected_json);
    assert_eq!(rejected_json["error"]["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn given_expired_and_forged_token_errors_when_converted_then_bodies_are_identical() {
    let expired = AuthError::TokenExpired {
        location: ErrorLocation::from(Location::caller()),
    };
    let forged = AuthError::TokenSignatureInvalid {
        location: ErrorLocation::from(Location::caller()),
    };

    let (expired_status, expired_json) = render(expired.into()).await;
    let (forged_status, forged_json) = render(forged.into()).await;

    assert_eq!(expired_status, forged_status);
    assert_eq!(expired_json, forged_json);
}

#[tokio::test]
async fn given_store_unavailable_when_converted_then_503_hides_cause() {
    let error = ApiError::from(AuthError::from(StoreError::unavailable(
        "database is locked at /var/lib/scissor.db",
    )));
    let (status, json) = render(error).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"]["code"], "SERVICE_UNAVAILABLE");
    assert_that!(
        json["error"]["message"].as_str().unwrap(),
        not(contains_substring("scissor.db"))
    );
}

#[tokio::test]
async fn given_hashing_failure_when_converted_then_500_generic() {
    let (status, json) = render(AuthError::hashing("argon2 exploded").into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert_that!(
        json["error"]["message"].as_str().unwrap(),
        not(contains_substring("argon2"))
    );
}

#[tokio::test]
async fn given_url_conflict_from_db_when_converted_then_409_names_url() {
    let error = ApiError::from(DbError::Conflict {
        field: UniqueField::Url,
        location: ErrorLocation::from(Location::caller()),
    });
    let (status, json) = render(error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "CONFLICT");
    assert_eq!(json["error"]["field"], "url");
}

#[tokio::test]
async fn given_decode_failure_from_db_when_converted_then_500_generic() {
    let (status, json) = render(DbError::decode("users.id: bad uuid").into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_that!(
        json["error"]["message"].as_str().unwrap(),
        not(contains_substring("users.id"))
    );
}

#[tokio::test]
async fn given_store_not_found_when_converted_then_404() {
    let (status, _) = render(StoreError::not_found("user 1").into()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_core_validation_when_converted_then_400_with_field() {
    let error = ApiError::from(CoreError::validation("title", "title cannot be empty"));
    let (status, json) = render(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["field"], "title");
}

#[tokio::test]
async fn given_bad_uuid_when_converted_then_400() {
    let error: ApiError = uuid::Uuid::parse_str("not-a-uuid").unwrap_err().into();
    let (status, json) = render(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}
