use serde::{Deserialize, Serialize};
use std::fmt;

/// Product name; the natural key of a catalog entry.
///
/// Comparison is exact and case-sensitive. Two names that differ only in case
/// are distinct products.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductName(pub String);

/// Opaque handle to image data (usually a `file://` URI).
///
/// The store never parses or opens it; only presence is checked.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ProductName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name carries no visible characters.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl ImageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for ProductName {
    fn from(value: &str) -> Self {
        ProductName(value.to_string())
    }
}

impl From<String> for ProductName {
    fn from(value: String) -> Self {
        ProductName(value)
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        ImageRef(value.to_string())
    }
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        ImageRef(value)
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
