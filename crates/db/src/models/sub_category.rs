//! SubCategory entity model and DTOs.

use catalog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `sub_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub sub_category_name: String,
    pub category_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A subcategory row joined with its parent's name.
///
/// `category_name` is `NULL` when the referenced category no longer exists.
#[derive(Debug, Clone, FromRow)]
pub struct SubCategoryJoinRow {
    pub id: DbId,
    pub sub_category_name: String,
    pub category_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub category_name: Option<String>,
}

/// The parent category as embedded in a populated subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub category_name: String,
}

/// A subcategory whose `categoryId` is replaced by the parent's id and name,
/// or `null` when the parent is gone.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedSubCategory {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub sub_category_name: String,
    pub category_id: Option<CategoryRef>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<SubCategoryJoinRow> for PopulatedSubCategory {
    fn from(row: SubCategoryJoinRow) -> Self {
        let category_id = row.category_name.map(|category_name| CategoryRef {
            id: row.category_id,
            category_name,
        });
        Self {
            id: row.id,
            sub_category_name: row.sub_category_name,
            category_id,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new subcategory.
#[derive(Debug, Clone)]
pub struct CreateSubCategory {
    pub sub_category_name: String,
    pub category_id: DbId,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}

/// DTO for updating a subcategory. Name and parent are always replaced.
#[derive(Debug, Clone)]
pub struct UpdateSubCategory {
    pub sub_category_name: String,
    pub category_id: DbId,
    pub is_active: Option<bool>,
}
