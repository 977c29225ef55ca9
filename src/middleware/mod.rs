pub mod validate;

pub use validate::{validate_category_query, validate_create_body, validate_update_body};
