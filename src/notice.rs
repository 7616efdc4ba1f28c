//! Short user-facing messages for operation outcomes.
//!
//! The store only returns structured results. This module turns them into the
//! one-line notices the presentation layer shows, and defines the sink those
//! notices are pushed to.

use crate::auth::AuthFailure;
use crate::catalog::ImageRef;
use crate::error::{CatalogError, ValidationError};
use serde::Serialize;
use std::fmt;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// What the image picker handed back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImagePick {
    Selected(ImageRef),
    Cancelled,
    Failed(String),
}

/// Receives notices for display.
pub trait NotificationSink {
    fn notify(&self, notice: &Notice);
}

#[derive(Debug, Default, Clone, Copy)]
/// Forwards notices to `tracing` at info. The underlying failures are already
/// logged at warn by the store.
pub struct TracingSink;

#[derive(Debug, Default, Clone, Copy)]
/// Prints notices to stderr, one per line.
pub struct StderrSink;

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    pub fn product_added() -> Self {
        Self::success("Product added")
    }

    pub fn product_deleted() -> Self {
        Self::success("Product deleted")
    }

    pub fn catalog_cleared() -> Self {
        Self::success("Catalog cleared")
    }

    pub fn add_failed(err: &CatalogError) -> Self {
        match err {
            CatalogError::Validation(
                ValidationError::UnparseablePrice(_) | ValidationError::InvalidPrice(_),
            ) => Self::error("Price must be a non-negative number"),
            CatalogError::Validation(_) => Self::error("All fields are required"),
            CatalogError::DuplicateName(_) => Self::error("Product already exists"),
            CatalogError::StorageRead { .. } | CatalogError::StorageWrite(_) => {
                Self::error("Error adding product")
            }
        }
    }

    pub fn load_failed(_err: &CatalogError) -> Self {
        Self::error("Error loading products")
    }

    pub fn delete_failed(_err: &CatalogError) -> Self {
        Self::error("Error deleting product")
    }

    pub fn clear_failed(_err: &CatalogError) -> Self {
        Self::error("Error clearing catalog")
    }

    pub fn login_failed(failure: &AuthFailure) -> Self {
        match failure {
            AuthFailure::MissingCredentials => Self::error(failure.to_string()),
            _ => Self::error("Login failed"),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Error => "error",
        };
        write!(f, "[{label}] {}", self.text)
    }
}

impl ImagePick {
    /// The picked reference, if the user chose one.
    pub fn image(&self) -> Option<&ImageRef> {
        match self {
            ImagePick::Selected(image) if !image.is_blank() => Some(image),
            _ => None,
        }
    }

    /// Cancelled, failed, or empty picks produce an error notice.
    pub fn notice(&self) -> Option<Notice> {
        match self.image() {
            Some(_) => None,
            None => Some(Notice::error("Image selection canceled or failed")),
        }
    }

    pub fn into_image(self) -> Option<ImageRef> {
        match self {
            ImagePick::Selected(image) if !image.is_blank() => Some(image),
            _ => None,
        }
    }
}

impl NotificationSink for TracingSink {
    fn notify(&self, notice: &Notice) {
        info!(level = ?notice.level, notice = %notice.text, "notice");
    }
}

impl NotificationSink for StderrSink {
    fn notify(&self, notice: &Notice) {
        eprintln!("{notice}");
    }
}

impl<A, B> NotificationSink for (A, B)
where
    A: NotificationSink,
    B: NotificationSink,
{
    fn notify(&self, notice: &Notice) {
        self.0.notify(notice);
        self.1.notify(notice);
    }
}
