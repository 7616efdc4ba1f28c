//! Structured failures returned by the catalog store.
//!
//! Every failure is recoverable at the operation boundary. The store hands
//! back one of these values and the presentation layer decides how to surface
//! it; nothing here terminates the process.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which required product field failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("product name is missing")]
    MissingName,
    #[error("product price is missing")]
    MissingPrice,
    #[error("product price '{0}' is not a number")]
    UnparseablePrice(String),
    #[error("product price {0} must be a finite number >= 0")]
    InvalidPrice(f64),
    #[error("product image is missing")]
    MissingImage,
}

/// Failure reported by a key-value backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
    #[error("could not encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Error kinds surfaced by [`crate::CatalogStore`] operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid product: {0}")]
    Validation(#[from] ValidationError),
    #[error("a product named '{0}' already exists")]
    DuplicateName(String),
    #[error("stored catalog could not be decoded: {reason}")]
    StorageRead {
        reason: String,
        #[source]
        source: Option<StorageError>,
    },
    #[error("catalog could not be persisted: {0}")]
    StorageWrite(#[source] StorageError),
}

/// Stable, serializable discriminant for [`CatalogError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    DuplicateName,
    StorageRead,
    StorageWrite,
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::Validation,
            CatalogError::DuplicateName(_) => ErrorKind::DuplicateName,
            CatalogError::StorageRead { .. } => ErrorKind::StorageRead,
            CatalogError::StorageWrite(_) => ErrorKind::StorageWrite,
        }
    }

    /// Persisted bytes exist but do not describe a catalog.
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CatalogError::StorageRead {
            reason: reason.into(),
            source: None,
        }
    }

    /// The backend failed while reading the catalog key.
    pub(crate) fn read_failed(source: StorageError) -> Self {
        CatalogError::StorageRead {
            reason: source.to_string(),
            source: Some(source),
        }
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::DuplicateName => "duplicate_name",
            ErrorKind::StorageRead => "storage_read",
            ErrorKind::StorageWrite => "storage_write",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let err = CatalogError::from(ValidationError::MissingName);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            CatalogError::DuplicateName("Speaker X".into()).kind(),
            ErrorKind::DuplicateName
        );
        assert_eq!(
            CatalogError::malformed("not json").kind(),
            ErrorKind::StorageRead
        );
        let write = CatalogError::StorageWrite(StorageError::Unavailable("full".into()));
        assert_eq!(write.kind(), ErrorKind::StorageWrite);
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::DuplicateName).unwrap();
        assert_eq!(json, "\"duplicate_name\"");
        assert_eq!(ErrorKind::StorageWrite.to_string(), "storage_write");
    }

    #[test]
    fn messages_name_the_failing_field() {
        let err = CatalogError::from(ValidationError::UnparseablePrice("abc".into()));
        assert!(err.to_string().contains("'abc'"), "got {err}");
        let dup = CatalogError::DuplicateName("Cable Y".into());
        assert!(dup.to_string().contains("Cable Y"));
    }
}
