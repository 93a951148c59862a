//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row, serialised with
//!   the field names the dashboard forms use (`_id`, camelCase)
//! - A create DTO for inserts
//! - An update DTO for replacements and patches

pub mod category;
pub mod product;
pub mod sub_category;
pub mod todo;
pub mod user;
