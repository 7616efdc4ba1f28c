//! Environment-driven configuration for the storefront binaries.
//!
//! Resolution order for the data directory: `STOREFRONT_DATA_DIR` when set
//! and non-empty, then the platform data directory (`<data>/storefront`),
//! then `./.storefront` relative to the working directory.

use std::env;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "STOREFRONT_DATA_DIR";
pub const LOG_ENV: &str = "STOREFRONT_LOG";
pub const DEFAULT_LOG_FILTER: &str = "storefront=warn";

const APP_DIR: &str = "storefront";
const FALLBACK_DIR: &str = ".storefront";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub data_dir: PathBuf,
    pub log_filter: String,
}

impl StorefrontConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = non_empty(lookup(DATA_DIR_ENV))
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let log_filter =
            non_empty(lookup(LOG_ENV)).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Self {
            data_dir,
            log_filter,
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR))
}
