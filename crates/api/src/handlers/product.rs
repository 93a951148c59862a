//! Handlers for the `/products` resource.
//!
//! Create and update take the dashboard's `multipart/form-data` body. Files
//! are written to the [`UploadStore`](crate::uploads::UploadStore) before the
//! row is touched, and removed again if the database write fails.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use catalog_core::catalog::{PdfAttachment, ENTITY_PRODUCT};
use catalog_core::error::CoreError;
use catalog_core::form::FormData;
use catalog_core::product_form::{ProductForm, FIELD_PRODUCT_IMAGE};
use catalog_core::types::DbId;
use catalog_core::upload::UploadKind;
use catalog_db::models::product::{CreateProduct, PopulatedProduct, Product, UpdateProduct};
use catalog_db::repositories::ProductRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::auth::AuthUser;
use crate::query::{CategoryFilterParams, IdParams};
use crate::state::AppState;
use crate::uploads::{read_form, UploadStore};

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<PopulatedProduct>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product: PopulatedProduct,
}

#[derive(Debug, Serialize)]
pub struct ProductMessageResponse {
    pub message: &'static str,
    pub product: Product,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_PRODUCT,
        id,
    })
}

// ---------------------------------------------------------------------------
// Upload staging
// ---------------------------------------------------------------------------

/// Files written for one request.
#[derive(Debug, Default)]
struct StagedUploads {
    product_image: Option<String>,
    pdfs: Option<Vec<PdfAttachment>>,
    /// Public paths of everything written, for rollback.
    written: Vec<String>,
}

impl StagedUploads {
    async fn discard(self, store: &UploadStore) {
        if !self.written.is_empty() {
            tracing::debug!(count = self.written.len(), "Discarding staged uploads");
            store.remove_all(&self.written).await;
        }
    }
}

/// Store the product image and every PDF slot's file.
///
/// On a write failure the files already written are removed before the error
/// is returned.
async fn stage_uploads(
    store: &UploadStore,
    form: &FormData,
    parsed: &ProductForm,
) -> AppResult<StagedUploads> {
    let mut staged = StagedUploads::default();

    if let Some(file) = form.file(FIELD_PRODUCT_IMAGE) {
        match store.save(UploadKind::ProductImage, file).await {
            Ok(path) => {
                staged.written.push(path.clone());
                staged.product_image = Some(path);
            }
            Err(e) => {
                staged.discard(store).await;
                return Err(AppError::InternalError(format!("Failed to store image: {e}")));
            }
        }
    }

    if let Some(slots) = &parsed.pdfs {
        let mut pdfs = Vec::with_capacity(slots.len());
        for slot in slots {
            let file = match form.file(&slot.file_field) {
                Some(upload) => match store.save(UploadKind::Pdf, upload).await {
                    Ok(path) => {
                        staged.written.push(path.clone());
                        Some(path)
                    }
                    Err(e) => {
                        staged.discard(store).await;
                        return Err(AppError::InternalError(format!(
                            "Failed to store PDF: {e}"
                        )));
                    }
                },
                None => None,
            };
            pdfs.push(PdfAttachment {
                heading: slot.heading.clone(),
                file,
            });
        }
        staged.pdfs = Some(pdfs);
    }

    Ok(staged)
}

/// Files referenced by `before` that `after` no longer references.
fn orphaned_files(before: &Product, after: &Product) -> Vec<String> {
    let kept = after.uploaded_files();
    before
        .uploaded_files()
        .into_iter()
        .filter(|path| !kept.contains(path))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/products?categoryId=
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilterParams>,
) -> AppResult<Json<ProductListResponse>> {
    let products = ProductRepo::list(&state.pool, filter.category_id()?).await?;
    let products = ProductRepo::populate(&state.pool, products).await?;
    Ok(Json(ProductListResponse { products }))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductResponse>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let product = ProductRepo::populate(&state.pool, vec![product])
        .await?
        .pop()
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ProductResponse { product }))
}

/// POST /api/products
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<ProductMessageResponse>)> {
    let form = read_form(multipart?).await?;
    let parsed = ProductForm::parse(&form)?;
    let required = parsed.require_for_create()?;

    let staged = stage_uploads(&state.uploads, &form, &parsed).await?;

    let input = CreateProduct {
        category_id: required.category,
        sub_category_ids: parsed.sub_categories.unwrap_or_default(),
        product_name: required.product_name,
        product_image: staged.product_image.clone(),
        short_description: parsed.short_description,
        features: parsed.features,
        descriptions: parsed.descriptions.unwrap_or_default(),
        pdfs: staged.pdfs.clone().unwrap_or_default(),
        is_active: parsed.is_active,
    };

    let product = match ProductRepo::create(&state.pool, &input).await {
        Ok(product) => product,
        Err(e) => {
            staged.discard(&state.uploads).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        product_id = product.id,
        files = staged.written.len(),
        user_id = auth.user_id,
        "Product created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ProductMessageResponse {
            message: "Product Created",
            product,
        }),
    ))
}

/// PUT /api/products?id=
///
/// Only fields present in the form are replaced. Files the product no longer
/// references afterwards are removed from disk.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<ProductMessageResponse>> {
    let id = params.require("Product")?;
    let form = read_form(multipart?).await?;
    let parsed = ProductForm::parse(&form)?;
    parsed.validate_for_update()?;

    let existing = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let staged = stage_uploads(&state.uploads, &form, &parsed).await?;

    let input = UpdateProduct {
        category_id: parsed.category,
        sub_category_ids: parsed.sub_categories,
        product_name: parsed.product_name.map(|name| name.trim().to_string()),
        product_image: staged.product_image.clone(),
        short_description: parsed.short_description,
        features: parsed.features,
        descriptions: parsed.descriptions,
        pdfs: staged.pdfs.clone(),
        is_active: parsed.is_active,
    };

    let product = match ProductRepo::update(&state.pool, id, &input).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            staged.discard(&state.uploads).await;
            return Err(not_found(id));
        }
        Err(e) => {
            staged.discard(&state.uploads).await;
            return Err(e.into());
        }
    };

    state
        .uploads
        .remove_all(&orphaned_files(&existing, &product))
        .await;

    tracing::info!(product_id = id, user_id = auth.user_id, "Product updated");

    Ok(Json(ProductMessageResponse {
        message: "Product updated",
        product,
    }))
}

/// DELETE /api/products?id=
///
/// The product's image and PDFs are removed from disk after the row.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> AppResult<Json<ProductMessageResponse>> {
    let id = params.require("Product")?;

    let product = ProductRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    state.uploads.remove_all(&product.uploaded_files()).await;

    tracing::info!(product_id = id, user_id = auth.user_id, "Product deleted");

    Ok(Json(ProductMessageResponse {
        message: "Product deleted",
        product,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json as SqlJson;

    fn product(image: Option<&str>, pdfs: &[&str]) -> Product {
        let now = chrono::Utc::now();
        Product {
            id: 1,
            category_id: 1,
            sub_category_ids: Vec::new(),
            product_name: "Pump".into(),
            product_image: image.map(str::to_string),
            short_description: None,
            features: None,
            descriptions: SqlJson(Vec::new()),
            pdfs: SqlJson(
                pdfs.iter()
                    .map(|file| PdfAttachment {
                        heading: Some("Doc".into()),
                        file: Some(file.to_string()),
                    })
                    .collect(),
            ),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn replaced_files_are_orphaned() {
        let before = product(Some("/uploads/products/1-a.jpg"), &["/uploads/pdfs/1-a.pdf"]);
        let after = product(Some("/uploads/products/2-b.jpg"), &["/uploads/pdfs/1-a.pdf"]);
        assert_eq!(
            orphaned_files(&before, &after),
            vec!["/uploads/products/1-a.jpg".to_string()]
        );
    }

    #[test]
    fn untouched_product_orphans_nothing() {
        let before = product(Some("/uploads/products/1-a.jpg"), &["/uploads/pdfs/1-a.pdf"]);
        let after = before.clone();
        assert!(orphaned_files(&before, &after).is_empty());
    }
}
