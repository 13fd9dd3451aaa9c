//! HTTP-level tests for the student registry.
//!
//! `#[sqlx::test]` creates a fresh database per test from `DATABASE_URL`.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, build_test_app, delete_auth, get_auth, lazy_pool, post_json_auth, put_json_auth,
    send_raw, token_for,
};
use serde_json::json;
use sqlx::PgPool;

fn asha() -> serde_json::Value {
    json!({
        "std": "5",
        "div": "A",
        "academic_year": "2024-25",
        "name": "Asha Rao",
        "roll": 1,
        "mobile": "9800000000",
    })
}

#[tokio::test]
async fn invalid_mobile_is_rejected_before_storage() {
    let admin = token_for(1, "admin");
    let mut body = asha();
    body["mobile"] = json!("call me");

    let response = post_json_auth(build_test_app(lazy_pool()), "/api/v1/students", body, &admin).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_student_bodies_return_400_envelope() {
    let admin = token_for(1, "admin");

    for (method, uri, body) in [
        (Method::POST, "/api/v1/students", "{\"std\": \"5\","),
        (Method::PUT, "/api/v1/students/7", "not json"),
        (Method::POST, "/api/v1/students", "{\"std\": \"5\"}"),
    ] {
        let response = send_raw(
            build_test_app(lazy_pool()),
            method.clone(),
            uri,
            body,
            Some(&admin),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method} {uri}");
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "BAD_REQUEST");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn student_crud_flow(pool: PgPool) {
    let admin = token_for(1, "admin");
    let teacher = token_for(2, "teacher");

    let response =
        post_json_auth(build_test_app(pool.clone()), "/api/v1/students", asha(), &admin).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response =
        post_json_auth(build_test_app(pool.clone()), "/api/v1/students", asha(), &admin).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/students?std=5&div=A",
        &teacher,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/students/{id}"),
        json!({ "mobile": "9811111111" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["mobile"], "9811111111");
    assert_eq!(json["data"]["name"], "Asha Rao");

    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/students/{id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/students/{id}"),
        &teacher,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
