//! Nested document types embedded in a product.
//!
//! Both are stored as JSONB arrays on the `products` row and keep the field
//! names the dashboard forms use.

use serde::{Deserialize, Serialize};

/// Entity labels used in not-found errors.
pub const ENTITY_CATEGORY: &str = "Category";
pub const ENTITY_SUB_CATEGORY: &str = "Subcategory";
pub const ENTITY_PRODUCT: &str = "Product";
pub const ENTITY_TODO: &str = "Todo";

/// One titled section of long-form product copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionSection {
    pub title: Option<String>,
    pub heading: Option<String>,
    pub desc: Option<String>,
}

/// A downloadable PDF attached to a product.
///
/// `file` is the public path of the stored upload, or `None` when the form
/// carried a heading without a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfAttachment {
    pub heading: Option<String>,
    pub file: Option<String>,
}
