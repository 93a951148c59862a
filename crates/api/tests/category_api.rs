//! HTTP-level integration tests for the `/api/categories` endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, delete_auth, get, post_json, post_json_auth, put_json_auth, send_raw_auth,
};
use serde_json::json;
use sqlx::PgPool;

async fn create_category(pool: &PgPool, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/categories", json!({"categoryName": name})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["category"]["_id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_201_with_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response =
        post_json_auth(app, "/api/categories", json!({"categoryName": "  Pumps "})).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Category created successfully");
    assert_eq!(json["category"]["categoryName"], "Pumps");
    assert_eq!(json["category"]["isActive"], true);
    assert!(json["category"]["createdAt"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_without_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/categories", json!({"categoryName": "Pumps"})).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Authentication required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_blank_name_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/categories", json!({"categoryName": ""})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Category name is required"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_name_returns_409(pool: PgPool) {
    create_category(&pool, "Valves").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/categories", json!({"categoryName": "Valves"})).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["message"], "Category already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_is_public_and_in_creation_order(pool: PgPool) {
    create_category(&pool, "First").await;
    create_category(&pool, "Second").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/categories").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<&str> = json["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["categoryName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["First", "Second"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_by_id_and_missing_id(pool: PgPool) {
    let id = create_category(&pool, "Motors").await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["category"]["categoryName"], "Motors");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/categories/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Category not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_keeps_active_flag_when_omitted(pool: PgPool) {
    let id = create_category(&pool, "Old").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        "/api/categories",
        json!({"_id": id, "categoryName": "Hidden", "isActive": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        "/api/categories",
        json!({"_id": id, "categoryName": "Renamed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Category updated successfully");
    assert_eq!(json["category"]["categoryName"], "Renamed");
    assert_eq!(json["category"]["isActive"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_error_cases(pool: PgPool) {
    let taken = create_category(&pool, "Taken").await;
    let other = create_category(&pool, "Other").await;
    assert_ne!(taken, other);

    let cases = [
        (json!({"categoryName": "No Id"}), StatusCode::BAD_REQUEST),
        (json!({"_id": other}), StatusCode::BAD_REQUEST),
        (json!({"_id": 999999, "categoryName": "Ghost"}), StatusCode::NOT_FOUND),
        (json!({"_id": other, "categoryName": "Taken"}), StatusCode::CONFLICT),
    ];

    for (body, status) in cases {
        let app = common::build_test_app(pool.clone());
        let response = put_json_auth(app, "/api/categories", body).await;
        assert_eq!(response.status(), status);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_returns_removed_row(pool: PgPool) {
    let id = create_category(&pool, "Doomed").await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/categories?id={id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Category deleted successfully");
    assert_eq!(json["category"]["_id"], id);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/categories?id={id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, "/api/categories").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Category ID required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn undecodable_requests_return_json_errors(pool: PgPool) {
    let cases = [
        (Method::PUT, "/api/categories", Some("application/json"), "{not json"),
        (Method::POST, "/api/categories", None, r#"{"categoryName": "Pumps"}"#),
        (Method::POST, "/api/categories", Some("application/json"), r#"{"categoryName": 5}"#),
        (Method::GET, "/api/categories/abc", None, ""),
    ];

    for (method, uri, content_type, body) in cases {
        let app = common::build_test_app(pool.clone());
        let response = send_raw_auth(app, method.clone(), uri, content_type, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method} {uri} {body}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
        assert!(json["message"].is_string());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_accepts_string_id(pool: PgPool) {
    let id = create_category(&pool, "Pumps").await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        "/api/categories",
        json!({"_id": id.to_string(), "categoryName": "Motors"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["category"]["categoryName"], "Motors");
}
