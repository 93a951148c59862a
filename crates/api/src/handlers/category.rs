//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::http::StatusCode;
use catalog_core::catalog::ENTITY_CATEGORY;
use catalog_core::credentials::require_text;
use catalog_core::error::CoreError;
use catalog_core::types::{parse_optional_id, DbId, IdInput};
use catalog_db::models::category::{Category, CreateCategory, UpdateCategory};
use catalog_db::repositories::CategoryRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::auth::AuthUser;
use crate::query::IdParams;
use crate::state::AppState;

/// Body for create (`_id` ignored) and update (`_id` required).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    #[serde(rename = "_id")]
    pub id: Option<IdInput>,
    pub category_name: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub category: Category,
}

#[derive(Debug, Serialize)]
pub struct CategoryMessageResponse {
    pub message: &'static str,
    pub category: Category,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_CATEGORY,
        id,
    })
}

/// GET /api/categories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<CategoryListResponse>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(CategoryListResponse { categories }))
}

/// GET /api/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CategoryResponse>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(CategoryResponse { category }))
}

/// POST /api/categories
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CategoryRequest>,
) -> AppResult<(StatusCode, Json<CategoryMessageResponse>)> {
    let category_name = require_text("Category name", input.category_name.as_deref())?;

    if CategoryRepo::find_by_name(&state.pool, &category_name)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Category already exists".into(),
        )));
    }

    let category = CategoryRepo::create(
        &state.pool,
        &CreateCategory {
            category_name,
            is_active: input.is_active,
        },
    )
    .await?;

    tracing::info!(category_id = category.id, user_id = auth.user_id, "Category created");

    Ok((
        StatusCode::CREATED,
        Json(CategoryMessageResponse {
            message: "Category created successfully",
            category,
        }),
    ))
}

/// PUT /api/categories
///
/// The id travels in the body as `_id`. Renaming onto another category's
/// name is rejected by `uq_categories_category_name`.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CategoryRequest>,
) -> AppResult<Json<CategoryMessageResponse>> {
    let name = input
        .category_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    let id = parse_optional_id("_id", input.id.as_ref())?;
    let (Some(id), Some(name)) = (id, name) else {
        return Err(AppError::Core(CoreError::Validation(
            "Category ID and name are required".into(),
        )));
    };

    let category = CategoryRepo::update(
        &state.pool,
        id,
        &UpdateCategory {
            category_name: name.to_string(),
            is_active: input.is_active,
        },
    )
    .await?
    .ok_or_else(|| not_found(id))?;

    tracing::info!(category_id = id, user_id = auth.user_id, "Category updated");

    Ok(Json(CategoryMessageResponse {
        message: "Category updated successfully",
        category,
    }))
}

/// DELETE /api/categories?id=
///
/// Subcategories and products referencing the category are left alone.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> AppResult<Json<CategoryMessageResponse>> {
    let id = params.require("Category")?;

    let category = CategoryRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(category_id = id, user_id = auth.user_id, "Category deleted");

    Ok(Json(CategoryMessageResponse {
        message: "Category deleted successfully",
        category,
    }))
}
