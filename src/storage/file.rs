use crate::error::StorageError;
use crate::storage::{KeyValueStore, validate_key};
use async_trait::async_trait;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

#[derive(Debug, Clone)]
/// One file per key under a data directory.
///
/// Writes go to a temp file in the same directory and are renamed over the
/// target, so a crash mid-write leaves the previous value intact.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

fn io_error(key: &str, source: io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

fn write_atomically(root: &Path, target: &Path, value: &str) -> io::Result<()> {
    std::fs::create_dir_all(root)?;
    let mut staged = NamedTempFile::new_in(root)?;
    staged.write_all(value.as_bytes())?;
    staged.as_file().sync_all()?;
    staged.persist(target).map_err(|err| err.error)?;
    Ok(())
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => {
                debug!(key, bytes = value.len(), path = %path.display(), "read key");
                Ok(Some(value))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(key, path = %path.display(), "key not present");
                Ok(None)
            }
            Err(err) => Err(io_error(key, err)),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let root = self.root.clone();
        let bytes = value.len();
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&root, &target, &value))
            .await
            .map_err(|err| StorageError::Unavailable(format!("write task for '{key}': {err}")))?
            .map_err(|err| io_error(key, err))?;
        debug!(key, bytes, path = %path.display(), "wrote key");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(key, err)),
        }
    }
}
