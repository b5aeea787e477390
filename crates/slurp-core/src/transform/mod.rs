pub mod name_normalizer;
pub mod type_names;

pub use name_normalizer::{identifier_from_title, is_valid_category};
pub use type_names::TypeMap;
