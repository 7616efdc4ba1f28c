//! On-device product catalog for the storefront app.
//!
//! The crate owns the one piece of the app with a real contract: the catalog
//! store. [`CatalogStore`] loads the product list from a [`KeyValueStore`],
//! validates and de-duplicates additions, writes the whole list back after
//! every mutation, and serves filtered views built by [`filter_catalog`].
//! Login gating ([`auth`]), user-facing notices ([`notice`]) and
//! configuration ([`config`]) sit around it for the presentation layer.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notice;
pub mod storage;
pub mod store;

pub use auth::{
    AuthFailure, AuthOutcome, AuthToken, Authenticator, CatalogAccess, Credentials, TOKEN_KEY,
    login,
};
pub use catalog::{
    Catalog, ImageRef, NO_PRODUCTS_TEXT, Product, ProductDraft, ProductName, decode_catalog,
    encode_catalog, filter_catalog,
};
pub use config::StorefrontConfig;
pub use error::{CatalogError, ErrorKind, StorageError, ValidationError};
pub use notice::{ImagePick, Notice, NoticeLevel, NotificationSink, StderrSink, TracingSink};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{CATALOG_KEY, CatalogStore, LoadOutcome};

/// Open the file-backed catalog store under the configured data directory.
pub fn open_catalog(config: &StorefrontConfig) -> CatalogStore<FileStore> {
    CatalogStore::new(FileStore::new(&config.data_dir))
}

