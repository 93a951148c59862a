//! Domain types and pure logic for the catalog admin backend.
//!
//! Nothing in this crate performs I/O. Handlers in `catalog-api` parse
//! requests into the types defined here and persist them through
//! `catalog-db`.

pub mod catalog;
pub mod credentials;
pub mod error;
pub mod form;
pub mod product_form;
pub mod types;
pub mod upload;
