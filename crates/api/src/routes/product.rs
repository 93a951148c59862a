//! Route definitions for the `/products` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /?categoryId=  -> list
/// POST   /              -> create     (multipart)
/// PUT    /?id=          -> update     (multipart)
/// DELETE /?id=          -> delete
/// GET    /{id}          -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(product::list)
                .post(product::create)
                .put(product::update)
                .delete(product::delete),
        )
        .route("/{id}", get(product::get_by_id))
}
