//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, build_test_app, build_test_app_with, get, lazy_pool, test_config};
use rollcall_notify::SmsConfig;
use sqlx::PgPool;

#[tokio::test]
async fn health_reports_degraded_when_database_is_unreachable() {
    let response = get(build_test_app(lazy_pool()), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert!(json["version"].is_string());
    assert_eq!(json["sms_configured"], false);
}

#[tokio::test]
async fn health_reports_configured_sms_gateway() {
    let mut config = test_config();
    config.sms = Some(SmsConfig {
        gateway_url: "http://127.0.0.1:1/rest".to_string(),
        user_id: "2000000000".to_string(),
        password: "secret".to_string(),
        sender_id: "VKSMIS".to_string(),
        timeout: Duration::from_secs(1),
    });

    let response = get(build_test_app_with(lazy_pool(), config), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["sms_configured"], true);
    assert_eq!(json["status"], "degraded");
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let response = get(build_test_app(lazy_pool()), "/this-route-does-not-exist").await;

    assert!(
        response.headers().contains_key("x-request-id"),
        "response must include x-request-id header"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let response = get(build_test_app(pool), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}
