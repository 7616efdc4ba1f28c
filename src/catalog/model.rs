//! Product records and the ordered catalog persisted under one key.
//!
//! The persisted layout is a bare JSON array of
//! `{ "name": string, "price": number, "image": string }` objects. There is no
//! version field, so any change to these types is a breaking change to data
//! already on disk.

use crate::catalog::identity::{ImageRef, ProductName};
use crate::catalog::schema::validate_catalog_value;
use crate::error::{CatalogError, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// A single storefront entry.
pub struct Product {
    pub name: ProductName,
    pub price: f64,
    pub image: ImageRef,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
/// Insertion-ordered list of products.
///
/// Name uniqueness is enforced when products are added through the store; a
/// catalog decoded from storage is accepted as-is even if it carries
/// duplicates written by an older build.
pub struct Catalog {
    products: Vec<Product>,
}

#[derive(Clone, Debug, Default)]
/// Raw add-product form input before validation.
///
/// `price` is the text the user typed; `image` is whatever the image picker
/// returned, if anything.
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub image: Option<ImageRef>,
}

impl Product {
    pub fn new(name: impl Into<ProductName>, price: f64, image: impl Into<ImageRef>) -> Self {
        Self {
            name: name.into(),
            price,
            image: image.into(),
        }
    }

    /// Check the stored-product invariants: non-blank name and image, finite
    /// non-negative price.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_blank() {
            return Err(ValidationError::MissingName);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::InvalidPrice(self.price));
        }
        if self.image.is_blank() {
            return Err(ValidationError::MissingImage);
        }
        Ok(())
    }

    /// Price as shown on the product grid, e.g. `$120.5`.
    pub fn display_price(&self) -> String {
        format!("${}", self.price)
    }
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: impl Into<String>, image: Option<ImageRef>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            image,
        }
    }

    /// Apply the "all fields are required" rule and parse the price text.
    ///
    /// Presence is checked for every field before the price is parsed, so an
    /// empty form reports the first missing field rather than a parse error.
    pub fn into_product(self) -> Result<Product, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        let price_text = self.price.trim();
        if price_text.is_empty() {
            return Err(ValidationError::MissingPrice);
        }
        let image = match self.image {
            Some(image) if !image.is_blank() => image,
            _ => return Err(ValidationError::MissingImage),
        };
        let price = parse_price(price_text)?;

        let product = Product {
            name: ProductName(self.name),
            price,
            image,
        };
        product.validate()?;
        Ok(product)
    }
}

fn parse_price(text: &str) -> Result<f64, ValidationError> {
    let price: f64 = text
        .parse()
        .map_err(|_| ValidationError::UnparseablePrice(text.to_string()))?;
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::InvalidPrice(price));
    }
    Ok(price)
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn contains_name(&self, name: &ProductName) -> bool {
        self.products.iter().any(|product| &product.name == name)
    }

    pub fn get(&self, name: &ProductName) -> Option<&Product> {
        self.products.iter().find(|product| &product.name == name)
    }

    pub(crate) fn push(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Drop every product named `name`; returns how many were removed.
    pub(crate) fn remove_named(&mut self, name: &ProductName) -> usize {
        let before = self.products.len();
        self.products.retain(|product| &product.name != name);
        before - self.products.len()
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self {
            products: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Catalog {
    type Item = Product;
    type IntoIter = std::vec::IntoIter<Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.into_iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

/// Serialize a catalog to its persisted JSON text.
pub fn encode_catalog(catalog: &Catalog) -> serde_json::Result<String> {
    serde_json::to_string(catalog)
}

/// Parse persisted JSON text into a catalog.
///
/// The text must be a JSON array matching the persisted catalog schema; any
/// other shape is reported as a `StorageRead` error with the schema details.
pub fn decode_catalog(raw: &str) -> Result<Catalog, CatalogError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|err| CatalogError::malformed(format!("invalid JSON: {err}")))?;
    validate_catalog_value(&value).map_err(CatalogError::malformed)?;
    serde_json::from_value(value).map_err(|err| CatalogError::malformed(err.to_string()))
}
