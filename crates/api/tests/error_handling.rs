//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests call `IntoResponse` directly on `AppError` values; no router
//! or store is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use roehrenboerse_api::error::AppError;
use roehrenboerse_api::services::ListingError;
use roehrenboerse_core::error::CoreError;

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_returns_404() {
    let (status, json) = error_to_response(ListingError::NotFound(42).into()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Listing with id 42 not found");
}

#[tokio::test]
async fn update_of_missing_row_returns_404() {
    let err = ListingError::Update {
        message: "no listing with id 9".into(),
        missing: true,
    };
    let (status, _) = error_to_response(err.into()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_listing_returns_400() {
    let (status, json) =
        error_to_response(ListingError::Invalid("price must not be empty".into()).into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "price must not be empty");
}

#[tokio::test]
async fn core_validation_returns_400() {
    let (status, json) =
        error_to_response(CoreError::Validation("category must not be empty".into()).into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn bad_request_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("nope".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "nope");
}

#[tokio::test]
async fn store_failures_return_500_and_sanitize_message() {
    let errors = [
        ListingError::Fetch("secret connection string".into()),
        ListingError::Create("secret".into()),
        ListingError::Update {
            message: "secret".into(),
            missing: false,
        },
        ListingError::Delete("secret".into()),
        ListingError::Search("secret".into()),
    ];

    for err in errors {
        let (status, json) = error_to_response(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert_eq!(json["error"], "An internal error occurred");
    }
}
