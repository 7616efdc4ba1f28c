//! The catalog store: sole owner of the persisted product list.
//!
//! Every mutation re-reads the persisted catalog, applies the change, and
//! writes the whole list back under [`CATALOG_KEY`]. Receivers are `&mut self`
//! so a single store handle can never have two operations in flight.

use crate::catalog::{
    Catalog, Product, ProductDraft, ProductName, decode_catalog, encode_catalog, filter_catalog,
};
use crate::error::{CatalogError, StorageError};
use crate::storage::KeyValueStore;
use tracing::{debug, info, warn};

/// Storage key holding the JSON-encoded catalog.
pub const CATALOG_KEY: &str = "products";

/// Result of [`CatalogStore::load_or_empty`].
#[derive(Debug)]
pub struct LoadOutcome {
    pub catalog: Catalog,
    /// Set when the persisted value could not be read; `catalog` is then empty
    /// for this session and the stored value is left untouched.
    pub degraded: Option<CatalogError>,
}

/// Owns the product list and mediates every read and write of it.
pub struct CatalogStore<S> {
    storage: S,
    // Last catalog known to match storage. `None` before the first load and
    // after a failed write.
    current: Option<Catalog>,
}

impl<S: KeyValueStore> CatalogStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            current: None,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Catalog as of the last successful load or mutation.
    pub fn current(&self) -> Option<&Catalog> {
        self.current.as_ref()
    }

    /// Read the persisted catalog.
    ///
    /// A missing key yields an empty catalog. Undecodable data fails with
    /// `StorageRead`; the session then sees an empty catalog until the next
    /// successful load, and nothing is written back.
    pub async fn load(&mut self) -> Result<Catalog, CatalogError> {
        match self.read_persisted().await {
            Ok(catalog) => {
                self.current = Some(catalog.clone());
                Ok(catalog)
            }
            Err(err) => {
                warn!(key = CATALOG_KEY, error = %err, "persisted catalog unreadable; using empty catalog");
                self.current = Some(Catalog::new());
                Err(err)
            }
        }
    }

    /// [`load`](Self::load), degrading a read failure to an empty catalog.
    pub async fn load_or_empty(&mut self) -> LoadOutcome {
        match self.load().await {
            Ok(catalog) => LoadOutcome {
                catalog,
                degraded: None,
            },
            Err(err) => LoadOutcome {
                catalog: Catalog::new(),
                degraded: Some(err),
            },
        }
    }

    /// Validate `product`, reject duplicate names, append, and persist.
    ///
    /// Validation runs before storage is touched. The duplicate check runs
    /// against a fresh read of the persisted catalog, so an unreadable catalog
    /// fails the add rather than being overwritten.
    pub async fn add(&mut self, product: Product) -> Result<(), CatalogError> {
        product.validate()?;
        let mut catalog = self.read_persisted().await?;
        if catalog.contains_name(&product.name) {
            debug!(name = %product.name, "rejecting duplicate product name");
            return Err(CatalogError::DuplicateName(product.name.0));
        }
        let name = product.name.clone();
        catalog.push(product);
        self.persist(catalog).await?;
        info!(name = %name, "product added");
        Ok(())
    }

    /// Validate raw form input and [`add`](Self::add) the resulting product.
    pub async fn add_draft(&mut self, draft: ProductDraft) -> Result<Product, CatalogError> {
        let product = draft.into_product()?;
        self.add(product.clone()).await?;
        Ok(product)
    }

    /// Remove every product named exactly `name` and persist the result.
    ///
    /// Returns how many products were dropped; zero is not an error.
    pub async fn remove(&mut self, name: &ProductName) -> Result<usize, CatalogError> {
        let mut catalog = self.read_persisted().await?;
        let removed = catalog.remove_named(name);
        self.persist(catalog).await?;
        info!(name = %name, removed, "product removed");
        Ok(removed)
    }

    /// Reset the persisted catalog to empty.
    ///
    /// This is the only operation that overwrites an unreadable catalog.
    pub async fn clear(&mut self) -> Result<(), CatalogError> {
        self.persist(Catalog::new()).await?;
        info!(key = CATALOG_KEY, "catalog cleared");
        Ok(())
    }

    /// Filtered view of the current catalog for rendering.
    ///
    /// Recomputed on every call; callers should not keep the result as their
    /// own mutable copy. Empty when nothing has been loaded yet.
    pub fn view(&self, query: &str) -> Catalog {
        match &self.current {
            Some(catalog) => filter_catalog(catalog, query),
            None => Catalog::new(),
        }
    }

    async fn read_persisted(&self) -> Result<Catalog, CatalogError> {
        let raw = self
            .storage
            .get(CATALOG_KEY)
            .await
            .map_err(CatalogError::read_failed)?;
        match raw {
            None => {
                debug!(key = CATALOG_KEY, "no persisted catalog; starting empty");
                Ok(Catalog::new())
            }
            Some(raw) => decode_catalog(&raw),
        }
    }

    async fn persist(&mut self, catalog: Catalog) -> Result<(), CatalogError> {
        let encoded = encode_catalog(&catalog)
            .map_err(|err| CatalogError::StorageWrite(StorageError::from(err)))?;
        if let Err(err) = self.storage.set(CATALOG_KEY, encoded).await {
            warn!(key = CATALOG_KEY, error = %err, "failed to persist catalog");
            self.current = None;
            return Err(CatalogError::StorageWrite(err));
        }
        debug!(key = CATALOG_KEY, products = catalog.len(), "persisted catalog");
        self.current = Some(catalog);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ValidationError};
    use crate::storage::MemoryStore;

    fn speaker() -> Product {
        Product::new("Speaker X", 120.5, "file://a.png")
    }

    #[tokio::test]
    async fn load_of_missing_key_is_empty_and_writes_nothing() {
        let mut store = CatalogStore::new(MemoryStore::new());
        assert!(store.load().await.unwrap().is_empty());
        assert_eq!(store.storage().get(CATALOG_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn add_then_load_round_trips() {
        let mut store = CatalogStore::new(MemoryStore::new());
        store.add(speaker()).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.products(), &[speaker()]);
        assert_eq!(store.current(), Some(&loaded));
    }

    #[tokio::test]
    async fn invalid_product_never_reaches_storage() {
        let mut store = CatalogStore::new(MemoryStore::new());
        let err = store
            .add(Product::new("", 10.0, "file://c.png"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Validation(ValidationError::MissingName)
        ));
        assert_eq!(store.storage().get(CATALOG_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_names_are_rejected_case_sensitively() {
        let mut store = CatalogStore::new(MemoryStore::new());
        store.add(speaker()).await.unwrap();
        let err = store
            .add(Product::new("Speaker X", 99.0, "file://b.png"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateName);

        store
            .add(Product::new("speaker x", 99.0, "file://b.png"))
            .await
            .unwrap();
        assert_eq!(store.load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn corrupt_catalog_degrades_without_overwrite() {
        let storage = MemoryStore::with_entries([(CATALOG_KEY, "{oops")]);
        let mut store = CatalogStore::new(storage);

        let outcome = store.load_or_empty().await;
        assert!(outcome.catalog.is_empty());
        let err = outcome.degraded.expect("corrupt data should be reported");
        assert_eq!(err.kind(), ErrorKind::StorageRead);
        assert!(store.view("").is_empty());

        let add_err = store.add(speaker()).await.unwrap_err();
        assert_eq!(add_err.kind(), ErrorKind::StorageRead);
        let remove_err = store.remove(&"Speaker X".into()).await.unwrap_err();
        assert_eq!(remove_err.kind(), ErrorKind::StorageRead);
        assert_eq!(
            store.storage().get(CATALOG_KEY).await.unwrap().as_deref(),
            Some("{oops")
        );
    }

    #[tokio::test]
    async fn clear_replaces_corrupt_value() {
        let storage = MemoryStore::with_entries([(CATALOG_KEY, "42")]);
        let mut store = CatalogStore::new(storage);
        assert!(store.load().await.is_err());
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
        assert_eq!(
            store.storage().get(CATALOG_KEY).await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn remove_reports_count_and_tolerates_misses() {
        let mut store = CatalogStore::new(MemoryStore::new());
        store.add(speaker()).await.unwrap();
        assert_eq!(store.remove(&"Cable Y".into()).await.unwrap(), 0);
        assert_eq!(store.load().await.unwrap().len(), 1);
        assert_eq!(store.remove(&"Speaker X".into()).await.unwrap(), 1);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn view_filters_current_catalog() {
        let mut store = CatalogStore::new(MemoryStore::new());
        assert!(store.view("").is_empty());
        store.add(speaker()).await.unwrap();
        store
            .add(Product::new("Cable Y", 5.0, "file://c.png"))
            .await
            .unwrap();
        let view = store.view("CABLE");
        assert_eq!(view.len(), 1);
        assert_eq!(view.products()[0].name.as_str(), "Cable Y");
        assert_eq!(store.view(" ").len(), 2);
    }

    #[tokio::test]
    async fn add_draft_parses_and_persists() {
        let mut store = CatalogStore::new(MemoryStore::new());
        let added = store
            .add_draft(ProductDraft::new(
                "Speaker X",
                "120.5",
                Some("file://a.png".into()),
            ))
            .await
            .unwrap();
        assert_eq!(added, speaker());
        let err = store
            .add_draft(ProductDraft::new("Amp", "ten", Some("file://z.png".into())))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(store.load().await.unwrap().len(), 1);
    }
}
