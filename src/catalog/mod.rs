//! Product catalog types.
//!
//! `model` holds the persisted records and the JSON codec, `schema` the shape
//! check applied when decoding, and `filter` the pure name search used to build
//! views. Mutation goes through [`crate::CatalogStore`] only.

pub mod filter;
pub mod identity;
pub mod model;
pub mod schema;

pub use filter::{NO_PRODUCTS_TEXT, filter_catalog};
pub use identity::{ImageRef, ProductName};
pub use model::{Catalog, Product, ProductDraft, decode_catalog, encode_catalog};
pub use schema::{catalog_schema, validate_catalog_value};
