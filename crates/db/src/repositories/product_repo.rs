//! Repository for the `products` table.

use catalog_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::product::{
    populate, referenced_ids, CreateProduct, PopulatedProduct, Product, UpdateProduct,
};
use crate::repositories::{CategoryRepo, SubCategoryRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category_id, sub_category_ids, product_name, product_image, \
                       short_description, features, descriptions, pdfs, is_active, \
                       created_at, updated_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (category_id, sub_category_ids, product_name, product_image,
                                   short_description, features, descriptions, pdfs, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(input.category_id)
            .bind(&input.sub_category_ids)
            .bind(&input.product_name)
            .bind(&input.product_image)
            .bind(&input.short_description)
            .bind(&input.features)
            .bind(Json(&input.descriptions))
            .bind(Json(&input.pdfs))
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List products in creation order, optionally restricted to one category.
    pub async fn list(pool: &PgPool, category_id: Option<DbId>) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE ($1::BIGINT IS NULL OR category_id = $1)
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Resolve category and subcategory references for `products`.
    ///
    /// Issues one query per referenced table regardless of product count.
    pub async fn populate(
        pool: &PgPool,
        products: Vec<Product>,
    ) -> Result<Vec<PopulatedProduct>, sqlx::Error> {
        let (category_ids, sub_category_ids) = referenced_ids(&products);
        let categories = CategoryRepo::find_by_ids(pool, &category_ids).await?;
        let sub_categories = SubCategoryRepo::find_by_ids(pool, &sub_category_ids).await?;
        Ok(populate(products, categories, sub_categories))
    }

    /// Update a product. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                category_id = COALESCE($2, category_id),
                sub_category_ids = COALESCE($3, sub_category_ids),
                product_name = COALESCE($4, product_name),
                product_image = COALESCE($5, product_image),
                short_description = COALESCE($6, short_description),
                features = COALESCE($7, features),
                descriptions = COALESCE($8, descriptions),
                pdfs = COALESCE($9, pdfs),
                is_active = COALESCE($10, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(&input.sub_category_ids)
            .bind(&input.product_name)
            .bind(&input.product_image)
            .bind(&input.short_description)
            .bind(&input.features)
            .bind(input.descriptions.as_ref().map(Json))
            .bind(input.pdfs.as_ref().map(Json))
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product, returning the removed row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("DELETE FROM products WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
