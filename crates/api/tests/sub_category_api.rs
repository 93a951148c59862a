//! HTTP-level integration tests for the `/api/subcategories` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

async fn create_category(pool: &PgPool, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/categories", json!({"categoryName": name})).await;
    body_json(response).await["category"]["_id"].as_i64().unwrap()
}

async fn create_sub_category(pool: &PgPool, name: &str, category_id: i64) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/subcategories",
        json!({"subCategoryName": name, "categoryId": category_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_raw_category_id(pool: PgPool) {
    let pumps = create_category(&pool, "Pumps").await;
    let json = create_sub_category(&pool, "Submersible", pumps).await;

    assert_eq!(json["message"], "Subcategory created successfully");
    assert_eq!(json["subCategory"]["subCategoryName"], "Submersible");
    assert_eq!(json["subCategory"]["categoryId"], pumps);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn same_name_allowed_in_different_categories_only(pool: PgPool) {
    let pumps = create_category(&pool, "Pumps").await;
    let valves = create_category(&pool, "Valves").await;
    create_sub_category(&pool, "Industrial", pumps).await;
    create_sub_category(&pool, "Industrial", valves).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/subcategories",
        json!({"subCategoryName": "Industrial", "categoryId": pumps}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["message"],
        "Subcategory already exists in this category"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_requires_name_and_category(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response =
        post_json_auth(app, "/api/subcategories", json!({"subCategoryName": "Orphan"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Subcategory name and category ID are required"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_populates_parent_and_filters(pool: PgPool) {
    let pumps = create_category(&pool, "Pumps").await;
    let valves = create_category(&pool, "Valves").await;
    create_sub_category(&pool, "Submersible", pumps).await;
    create_sub_category(&pool, "Gate", valves).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/subcategories").await).await;
    let all = json["subCategories"].as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["categoryId"]["categoryName"], "Pumps");

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/subcategories?categoryId={valves}")).await).await;
    let filtered = json["subCategories"].as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["subCategoryName"], "Gate");
    assert_eq!(filtered[0]["categoryId"]["_id"], valves);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_parent_leaves_dangling_null_reference(pool: PgPool) {
    let pumps = create_category(&pool, "Pumps").await;
    create_sub_category(&pool, "Submersible", pumps).await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/categories?id={pumps}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/subcategories").await).await;
    let subs = json["subCategories"].as_array().unwrap();
    assert_eq!(subs.len(), 1);
    assert!(subs[0]["categoryId"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_moves_to_another_category_and_populates(pool: PgPool) {
    let pumps = create_category(&pool, "Pumps").await;
    let valves = create_category(&pool, "Valves").await;
    let created = create_sub_category(&pool, "Brass", pumps).await;
    let id = created["subCategory"]["_id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        "/api/subcategories",
        json!({"_id": id, "subCategoryName": "Brass Fittings", "categoryId": valves}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Subcategory updated successfully");
    assert_eq!(json["subCategory"]["subCategoryName"], "Brass Fittings");
    assert_eq!(json["subCategory"]["categoryId"]["categoryName"], "Valves");

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        "/api/subcategories",
        json!({"_id": 999999, "subCategoryName": "Ghost", "categoryId": valves}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Subcategory not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_by_query_id(pool: PgPool) {
    let pumps = create_category(&pool, "Pumps").await;
    let created = create_sub_category(&pool, "Inline", pumps).await;
    let id = created["subCategory"]["_id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/subcategories?id={id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Subcategory deleted successfully");
    assert_eq!(json["subCategory"]["_id"], id);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, "/api/subcategories").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Subcategory ID required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dropdown_string_ids_are_accepted(pool: PgPool) {
    let pumps = create_category(&pool, "Pumps").await;
    let valves = create_category(&pool, "Valves").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/subcategories",
        json!({"subCategoryName": "Sub", "categoryId": pumps.to_string()}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["subCategory"]["categoryId"], pumps);
    let id = json["subCategory"]["_id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        "/api/subcategories",
        json!({
            "_id": id.to_string(),
            "subCategoryName": "Sub",
            "categoryId": valves.to_string(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["subCategory"]["categoryId"]["_id"],
        valves
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unusable_category_ids_return_400_json(pool: PgPool) {
    let cases = [
        (json!(""), "Subcategory name and category ID are required"),
        (json!("abc"), "categoryId must be a positive integer id"),
        (json!(-4), "categoryId must be a positive integer id"),
    ];

    for (category_id, message) in cases {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            "/api/subcategories",
            json!({"subCategoryName": "Sub", "categoryId": category_id}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], message);
    }

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/subcategories",
        json!({"subCategoryName": "Sub", "categoryId": {"nested": true}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
