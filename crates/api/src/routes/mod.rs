pub mod auth;
pub mod category;
pub mod health;
pub mod product;
pub mod sub_category;
pub mod todo;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                       create account (public)
/// /auth/signin                       sign in, sets authToken cookie (public)
/// /auth/change-password              change password (public)
/// /auth/logout                       clear authToken cookie (public)
///
/// /categories                        list, create, update (_id in body)
/// /categories?id=                    delete
/// /categories/{id}                   get
///
/// /subcategories                     list (?categoryId=), create, update
/// /subcategories?id=                 delete
///
/// /products                          list (?categoryId=), create (multipart)
/// /products?id=                      update (multipart), delete
/// /products/{id}                     get
///
/// /todos                             list, create
/// /todos/{id}                        update, delete
/// ```
///
/// Every mutation outside `/auth` requires a session token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes.
        .nest("/auth", auth::router())
        // Catalog.
        .nest("/categories", category::router())
        .nest("/subcategories", sub_category::router())
        .nest("/products", product::router())
        // Todos.
        .nest("/todos", todo::router())
}
