//! Handlers for the `/subcategories` resource.

use axum::extract::State;
use axum::http::StatusCode;
use catalog_core::catalog::ENTITY_SUB_CATEGORY;
use catalog_core::error::CoreError;
use catalog_core::types::{parse_optional_id, DbId, IdInput};
use catalog_db::models::sub_category::{
    CreateSubCategory, PopulatedSubCategory, SubCategory, UpdateSubCategory,
};
use catalog_db::repositories::SubCategoryRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Query};
use crate::middleware::auth::AuthUser;
use crate::query::{CategoryFilterParams, IdParams};
use crate::state::AppState;

/// Body for create (`_id` ignored) and update (`_id` required).
///
/// Ids are accepted as numbers or as the string value of a dropdown.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryRequest {
    #[serde(rename = "_id")]
    pub id: Option<IdInput>,
    pub sub_category_name: Option<String>,
    pub category_id: Option<IdInput>,
    pub is_active: Option<bool>,
}

impl SubCategoryRequest {
    fn category_id(&self) -> Result<Option<DbId>, CoreError> {
        parse_optional_id("categoryId", self.category_id.as_ref())
    }

    fn trimmed_name(&self) -> Option<String> {
        self.sub_category_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryListResponse {
    pub sub_categories: Vec<PopulatedSubCategory>,
}

/// Envelope for mutations; `T` is the raw row or the populated view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryMessageResponse<T> {
    pub message: &'static str,
    pub sub_category: T,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_SUB_CATEGORY,
        id,
    })
}

/// GET /api/subcategories?categoryId=
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilterParams>,
) -> AppResult<Json<SubCategoryListResponse>> {
    let sub_categories =
        SubCategoryRepo::list_populated(&state.pool, filter.category_id()?).await?;
    Ok(Json(SubCategoryListResponse { sub_categories }))
}

/// POST /api/subcategories
///
/// Names are unique per category, not globally.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubCategoryRequest>,
) -> AppResult<(StatusCode, Json<SubCategoryMessageResponse<SubCategory>>)> {
    let category_id = input.category_id()?;
    let (Some(name), Some(category_id)) = (input.trimmed_name(), category_id) else {
        return Err(AppError::Core(CoreError::Validation(
            "Subcategory name and category ID are required".into(),
        )));
    };

    if SubCategoryRepo::find_by_name_in_category(&state.pool, &name, category_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Subcategory already exists in this category".into(),
        )));
    }

    let sub_category = SubCategoryRepo::create(
        &state.pool,
        &CreateSubCategory {
            sub_category_name: name,
            category_id,
            is_active: input.is_active,
        },
    )
    .await?;

    tracing::info!(
        sub_category_id = sub_category.id,
        category_id,
        user_id = auth.user_id,
        "Subcategory created"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubCategoryMessageResponse {
            message: "Subcategory created successfully",
            sub_category,
        }),
    ))
}

/// PUT /api/subcategories
///
/// Responds with the parent category populated.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubCategoryRequest>,
) -> AppResult<Json<SubCategoryMessageResponse<PopulatedSubCategory>>> {
    let id = parse_optional_id("_id", input.id.as_ref())?;
    let category_id = input.category_id()?;
    let (Some(id), Some(name), Some(category_id)) = (id, input.trimmed_name(), category_id) else {
        return Err(AppError::Core(CoreError::Validation(
            "Subcategory ID, name, and category ID are required".into(),
        )));
    };

    SubCategoryRepo::update(
        &state.pool,
        id,
        &UpdateSubCategory {
            sub_category_name: name,
            category_id,
            is_active: input.is_active,
        },
    )
    .await?
    .ok_or_else(|| not_found(id))?;

    let sub_category = SubCategoryRepo::find_populated_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(sub_category_id = id, user_id = auth.user_id, "Subcategory updated");

    Ok(Json(SubCategoryMessageResponse {
        message: "Subcategory updated successfully",
        sub_category,
    }))
}

/// DELETE /api/subcategories?id=
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> AppResult<Json<SubCategoryMessageResponse<SubCategory>>> {
    let id = params.require("Subcategory")?;

    let sub_category = SubCategoryRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(sub_category_id = id, user_id = auth.user_id, "Subcategory deleted");

    Ok(Json(SubCategoryMessageResponse {
        message: "Subcategory deleted successfully",
        sub_category,
    }))
}
