//! HTTP-level tests for `/validate-field` and the mock verification endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, post_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_validate_field_valid_value(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/validate-field",
        json!({"field": "aadhaarNumber", "value": "123456789012"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["data"],
        json!({
            "field": "aadhaarNumber",
            "value": "123456789012",
            "isValid": true,
            "message": "Valid Aadhaar number"
        })
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_validate_field_invalid_value_is_still_200(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/validate-field",
        json!({"field": "mobileNumber", "value": "5123456789"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["isValid"], false);
    assert_eq!(
        json["data"]["message"],
        "Mobile number must be 10 digits starting with 6, 7, 8, or 9"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_validate_field_unknown_name_returns_400(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/validate-field",
        json!({"field": "gstNumber", "value": "27AAAAA0000A1Z5"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_FIELD_NAME");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_verify_aadhaar_otp(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app.clone(),
        "/api/v1/verify/aadhaar-otp",
        json!({"aadhaarNumber": "123456789012", "otp": "789012"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], json!({"kind": "aadhaar_otp", "verified": true}));

    let response = post_json(
        app,
        "/api/v1/verify/aadhaar-otp",
        json!({"aadhaarNumber": "123456789012", "otp": "654321"}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["verified"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_verify_pan(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app.clone(),
        "/api/v1/verify/pan",
        json!({"panNumber": "ABCDE1234F"}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"], json!({"kind": "pan", "verified": true}));

    let response = post_json(app, "/api/v1/verify/pan", json!({"panNumber": "aaaaa0000a"})).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["verified"], false);
}
