//! Shared query parameter types for API handlers.

use catalog_core::error::CoreError;
use catalog_core::types::{parse_id, DbId};
use serde::Deserialize;

/// `?id=` as used by the update/delete endpoints of the catalog resources.
///
/// Kept as text so that a missing or malformed id produces a JSON error
/// instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

impl IdParams {
    /// Parse the id, or fail with `"<label> ID required"` when absent.
    pub fn require(&self, label: &str) -> Result<DbId, CoreError> {
        match self.id.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_id("id", raw),
            _ => Err(CoreError::Validation(format!("{label} ID required"))),
        }
    }
}

/// Optional `?categoryId=` filter for list endpoints.
///
/// An empty value (`?categoryId=`) means no filter.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryFilterParams {
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
}

impl CategoryFilterParams {
    pub fn category_id(&self) -> Result<Option<DbId>, CoreError> {
        match self.category_id.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_id("categoryId", raw).map(Some),
            _ => Ok(None),
        }
    }
}
