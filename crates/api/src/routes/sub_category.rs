//! Route definitions for the `/subcategories` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::sub_category;
use crate::state::AppState;

/// Routes mounted at `/subcategories`.
///
/// ```text
/// GET    /?categoryId=  -> list
/// POST   /              -> create
/// PUT    /              -> update     (id in body)
/// DELETE /?id=          -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(sub_category::list)
            .post(sub_category::create)
            .put(sub_category::update)
            .delete(sub_category::delete),
    )
}
