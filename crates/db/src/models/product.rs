//! Product entity model, DTOs and reference population.

use std::collections::HashMap;

use catalog_core::catalog::{DescriptionSection, PdfAttachment};
use catalog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use crate::models::category::Category;
use crate::models::sub_category::SubCategory;

/// A row from the `products` table.
///
/// References are raw ids: `category` and `subCategory` on the wire.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: DbId,
    #[serde(rename = "category")]
    pub category_id: DbId,
    #[serde(rename = "subCategory")]
    pub sub_category_ids: Vec<DbId>,
    pub product_name: String,
    pub product_image: Option<String>,
    pub short_description: Option<String>,
    pub features: Option<String>,
    pub descriptions: Json<Vec<DescriptionSection>>,
    pub pdfs: Json<Vec<PdfAttachment>>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    /// Public paths of every file this product references.
    pub fn uploaded_files(&self) -> Vec<&str> {
        self.product_image
            .as_deref()
            .into_iter()
            .chain(self.pdfs.0.iter().filter_map(|pdf| pdf.file.as_deref()))
            .collect()
    }
}

/// A product with its references resolved to full documents.
///
/// `category` is `null` when the referenced category no longer exists;
/// vanished subcategories are dropped from `subCategory`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedProduct {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub category: Option<Category>,
    pub sub_category: Vec<SubCategory>,
    pub product_name: String,
    pub product_image: Option<String>,
    pub short_description: Option<String>,
    pub features: Option<String>,
    pub descriptions: Vec<DescriptionSection>,
    pub pdfs: Vec<PdfAttachment>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub category_id: DbId,
    pub sub_category_ids: Vec<DbId>,
    pub product_name: String,
    pub product_image: Option<String>,
    pub short_description: Option<String>,
    pub features: Option<String>,
    pub descriptions: Vec<DescriptionSection>,
    pub pdfs: Vec<PdfAttachment>,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}

/// DTO for updating a product. Only `Some` fields are replaced.
#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    pub category_id: Option<DbId>,
    pub sub_category_ids: Option<Vec<DbId>>,
    pub product_name: Option<String>,
    pub product_image: Option<String>,
    pub short_description: Option<String>,
    pub features: Option<String>,
    pub descriptions: Option<Vec<DescriptionSection>>,
    pub pdfs: Option<Vec<PdfAttachment>>,
    pub is_active: Option<bool>,
}

/// Ids referenced by a set of products, deduplicated, in first-seen order.
pub fn referenced_ids(products: &[Product]) -> (Vec<DbId>, Vec<DbId>) {
    let mut categories = Vec::new();
    let mut sub_categories = Vec::new();
    for product in products {
        if !categories.contains(&product.category_id) {
            categories.push(product.category_id);
        }
        for id in &product.sub_category_ids {
            if !sub_categories.contains(id) {
                sub_categories.push(*id);
            }
        }
    }
    (categories, sub_categories)
}

/// Resolve each product's references against the given lookup rows.
pub fn populate(
    products: Vec<Product>,
    categories: Vec<Category>,
    sub_categories: Vec<SubCategory>,
) -> Vec<PopulatedProduct> {
    let categories: HashMap<DbId, Category> = categories.into_iter().map(|c| (c.id, c)).collect();
    let sub_categories: HashMap<DbId, SubCategory> =
        sub_categories.into_iter().map(|s| (s.id, s)).collect();

    products
        .into_iter()
        .map(|product| PopulatedProduct {
            id: product.id,
            category: categories.get(&product.category_id).cloned(),
            sub_category: product
                .sub_category_ids
                .iter()
                .filter_map(|id| sub_categories.get(id).cloned())
                .collect(),
            product_name: product.product_name,
            product_image: product.product_image,
            short_description: product.short_description,
            features: product.features,
            descriptions: product.descriptions.0,
            pdfs: product.pdfs.0,
            is_active: product.is_active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: DbId, category_id: DbId, sub_category_ids: Vec<DbId>) -> Product {
        let now = chrono::Utc::now();
        Product {
            id,
            category_id,
            sub_category_ids,
            product_name: format!("Product {id}"),
            product_image: None,
            short_description: None,
            features: None,
            descriptions: Json(Vec::new()),
            pdfs: Json(Vec::new()),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn category(id: DbId) -> Category {
        let now = chrono::Utc::now();
        Category {
            id,
            category_name: format!("Category {id}"),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn sub_category(id: DbId, category_id: DbId) -> SubCategory {
        let now = chrono::Utc::now();
        SubCategory {
            id,
            sub_category_name: format!("Sub {id}"),
            category_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn referenced_ids_are_deduplicated_in_order() {
        let products = vec![product(1, 5, vec![9, 8]), product(2, 5, vec![8, 7])];
        let (categories, subs) = referenced_ids(&products);
        assert_eq!(categories, vec![5]);
        assert_eq!(subs, vec![9, 8, 7]);
    }

    #[test]
    fn populate_resolves_and_drops_dangling_references() {
        let products = vec![product(1, 5, vec![9, 404, 8]), product(2, 404, vec![])];
        let populated = populate(
            products,
            vec![category(5)],
            vec![sub_category(8, 5), sub_category(9, 5)],
        );

        assert_eq!(populated.len(), 2);
        assert_eq!(populated[0].category.as_ref().map(|c| c.id), Some(5));
        let subs: Vec<DbId> = populated[0].sub_category.iter().map(|s| s.id).collect();
        assert_eq!(subs, vec![9, 8], "stored order kept, missing id dropped");
        assert!(populated[1].category.is_none());
    }

    #[test]
    fn raw_product_uses_form_field_names() {
        let mut p = product(3, 5, vec![9]);
        p.pdfs = Json(vec![PdfAttachment {
            heading: Some("Manual".into()),
            file: Some("/uploads/pdfs/1-manual.pdf".into()),
        }]);
        p.product_image = Some("/uploads/products/1-pump.jpg".into());

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["_id"], 3);
        assert_eq!(json["category"], 5);
        assert_eq!(json["subCategory"][0], 9);
        assert_eq!(json["pdfs"][0]["file"], "/uploads/pdfs/1-manual.pdf");
        assert_eq!(
            p.uploaded_files(),
            vec!["/uploads/products/1-pump.jpg", "/uploads/pdfs/1-manual.pdf"]
        );
    }
}
