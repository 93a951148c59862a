//! Repository for the `sub_categories` table.

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::sub_category::{
    CreateSubCategory, PopulatedSubCategory, SubCategory, SubCategoryJoinRow, UpdateSubCategory,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, sub_category_name, category_id, is_active, created_at, updated_at";

/// Columns for the subcategory/category join. The parent is LEFT JOINed so a
/// dangling `category_id` still yields a row.
const JOIN_COLUMNS: &str = "s.id, s.sub_category_name, s.category_id, s.is_active, \
                            s.created_at, s.updated_at, c.category_name";

/// Provides CRUD operations for subcategories.
pub struct SubCategoryRepo;

impl SubCategoryRepo {
    /// Insert a new subcategory, returning the created row.
    ///
    /// The parent category is not checked for existence.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubCategory,
    ) -> Result<SubCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO sub_categories (sub_category_name, category_id, is_active)
             VALUES ($1, $2, COALESCE($3, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SubCategory>(&query)
            .bind(&input.sub_category_name)
            .bind(input.category_id)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SubCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sub_categories WHERE id = $1");
        sqlx::query_as::<_, SubCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a subcategory by name within one category.
    pub async fn find_by_name_in_category(
        pool: &PgPool,
        name: &str,
        category_id: DbId,
    ) -> Result<Option<SubCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sub_categories
             WHERE sub_category_name = $1 AND category_id = $2"
        );
        sqlx::query_as::<_, SubCategory>(&query)
            .bind(name)
            .bind(category_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every subcategory whose id is in `ids`. Unknown ids are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<SubCategory>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM sub_categories WHERE id = ANY($1)");
        sqlx::query_as::<_, SubCategory>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List subcategories with their parent populated, optionally restricted
    /// to one category, in creation order.
    pub async fn list_populated(
        pool: &PgPool,
        category_id: Option<DbId>,
    ) -> Result<Vec<PopulatedSubCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {JOIN_COLUMNS}
             FROM sub_categories s
             LEFT JOIN categories c ON c.id = s.category_id
             WHERE ($1::BIGINT IS NULL OR s.category_id = $1)
             ORDER BY s.created_at, s.id"
        );
        let rows = sqlx::query_as::<_, SubCategoryJoinRow>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(PopulatedSubCategory::from).collect())
    }

    /// Find one subcategory with its parent populated.
    pub async fn find_populated_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PopulatedSubCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {JOIN_COLUMNS}
             FROM sub_categories s
             LEFT JOIN categories c ON c.id = s.category_id
             WHERE s.id = $1"
        );
        let row = sqlx::query_as::<_, SubCategoryJoinRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(PopulatedSubCategory::from))
    }

    /// Replace name and parent, and the active flag when given.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSubCategory,
    ) -> Result<Option<SubCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE sub_categories SET
                sub_category_name = $2,
                category_id = $3,
                is_active = COALESCE($4, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SubCategory>(&query)
            .bind(id)
            .bind(&input.sub_category_name)
            .bind(input.category_id)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a subcategory, returning the removed row.
    ///
    /// Products that list it keep the stale id.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<SubCategory>, sqlx::Error> {
        let query = format!("DELETE FROM sub_categories WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, SubCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
