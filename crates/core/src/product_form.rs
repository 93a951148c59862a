//! Assembly of a product from the dashboard's multipart form.
//!
//! Field layout:
//!
//! ```text
//! category                      single id
//! subCategory                   repeatable, each value may be comma separated
//! productName                   text
//! shortDescription / features   text
//! isActive                      "true" | "false" (also "on", "1", "0")
//! productImage                  file
//! descriptions[i][title|heading|desc]
//! pdfs[i][heading], pdfs[i][file]
//! ```
//!
//! Indexed groups are read from `i = 0` upward and stop at the first index
//! that has none of its keys (descriptions) or no heading (pdfs).

use crate::catalog::DescriptionSection;
use crate::error::CoreError;
use crate::form::FormData;
use crate::types::{parse_id, DbId};

pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_SUB_CATEGORY: &str = "subCategory";
pub const FIELD_PRODUCT_NAME: &str = "productName";
pub const FIELD_SHORT_DESCRIPTION: &str = "shortDescription";
pub const FIELD_FEATURES: &str = "features";
pub const FIELD_IS_ACTIVE: &str = "isActive";
pub const FIELD_PRODUCT_IMAGE: &str = "productImage";

const DESCRIPTIONS_PREFIX: &str = "descriptions[";
const PDFS_PREFIX: &str = "pdfs[";

/// A PDF entry before its file has been stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfSlot {
    pub heading: Option<String>,
    /// Form key of the (possibly absent) file part for this entry.
    pub file_field: String,
}

/// Everything the form carried, with `None` for fields that were absent.
///
/// Creation requires `category` and `product_name`; an update applies only
/// the fields that are `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub category: Option<DbId>,
    pub sub_categories: Option<Vec<DbId>>,
    pub product_name: Option<String>,
    pub short_description: Option<String>,
    pub features: Option<String>,
    pub is_active: Option<bool>,
    pub descriptions: Option<Vec<DescriptionSection>>,
    pub pdfs: Option<Vec<PdfSlot>>,
}

/// Required fields of a new product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProductCore {
    pub category: DbId,
    pub product_name: String,
}

impl ProductForm {
    /// Read a [`ProductForm`] out of submitted form data.
    pub fn parse(form: &FormData) -> Result<Self, CoreError> {
        let category = match form.text(FIELD_CATEGORY).map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(parse_id(FIELD_CATEGORY, raw)?),
            _ => None,
        };

        let sub_categories = if form.has(FIELD_SUB_CATEGORY) {
            Some(parse_id_list(form.texts(FIELD_SUB_CATEGORY))?)
        } else {
            None
        };

        let is_active = form
            .text(FIELD_IS_ACTIVE)
            .map(parse_flag)
            .transpose()?;

        let descriptions = form
            .has_prefix(DESCRIPTIONS_PREFIX)
            .then(|| collect_descriptions(form));

        let pdfs = form.has_prefix(PDFS_PREFIX).then(|| collect_pdf_slots(form));

        Ok(Self {
            category,
            sub_categories,
            product_name: form.text(FIELD_PRODUCT_NAME).map(str::to_string),
            short_description: form.text(FIELD_SHORT_DESCRIPTION).map(str::to_string),
            features: form.text(FIELD_FEATURES).map(str::to_string),
            is_active,
            descriptions,
            pdfs,
        })
    }

    /// Check the fields a new product cannot do without.
    pub fn require_for_create(&self) -> Result<NewProductCore, CoreError> {
        let category = self.category.ok_or_else(|| CoreError::required("category"))?;
        let product_name = self
            .product_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| CoreError::required("productName"))?
            .to_string();
        Ok(NewProductCore {
            category,
            product_name,
        })
    }

    /// Reject an update that would blank out the product name.
    pub fn validate_for_update(&self) -> Result<(), CoreError> {
        if let Some(name) = &self.product_name {
            if name.trim().is_empty() {
                return Err(CoreError::Validation("productName must not be empty".into()));
            }
        }
        Ok(())
    }
}

fn parse_id_list<'a>(values: impl Iterator<Item = &'a str>) -> Result<Vec<DbId>, CoreError> {
    let mut ids = Vec::new();
    for value in values {
        for raw in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let id = parse_id(FIELD_SUB_CATEGORY, raw)?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    Ok(ids)
}

fn parse_flag(raw: &str) -> Result<bool, CoreError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" => Ok(false),
        other => Err(CoreError::Validation(format!(
            "isActive must be true or false, got '{other}'"
        ))),
    }
}

fn collect_descriptions(form: &FormData) -> Vec<DescriptionSection> {
    let mut sections = Vec::new();
    for index in 0.. {
        let title = format!("descriptions[{index}][title]");
        let heading = format!("descriptions[{index}][heading]");
        let desc = format!("descriptions[{index}][desc]");
        if !(form.has(&title) || form.has(&heading) || form.has(&desc)) {
            break;
        }
        sections.push(DescriptionSection {
            title: form.text(&title).map(str::to_string),
            heading: form.text(&heading).map(str::to_string),
            desc: form.text(&desc).map(str::to_string),
        });
    }
    sections
}

fn collect_pdf_slots(form: &FormData) -> Vec<PdfSlot> {
    let mut slots = Vec::new();
    for index in 0.. {
        let heading = format!("pdfs[{index}][heading]");
        if !form.has(&heading) {
            break;
        }
        slots.push(PdfSlot {
            heading: form.text(&heading).map(str::to_string),
            file_field: format!("pdfs[{index}][file]"),
        });
    }
    slots
}
