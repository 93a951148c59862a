pub mod auth;
pub mod category;
pub mod product;
pub mod sub_category;
pub mod todo;
