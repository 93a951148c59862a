//! Route definitions for the `/categories` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /         -> list
/// POST   /         -> create
/// PUT    /         -> update     (id in body)
/// DELETE /?id=     -> delete
/// GET    /{id}     -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(category::list)
                .post(category::create)
                .put(category::update)
                .delete(category::delete),
        )
        .route("/{id}", get(category::get_by_id))
}
