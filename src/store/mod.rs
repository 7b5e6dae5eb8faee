//! Whole-collection persistence over a single JSON file.
//!
//! A [`CollectionStore`] knows one file path and nothing else. It reads the
//! entire collection, and writes the entire collection back by replacing the
//! file atomically (temporary sibling file, `sync_all`, `rename`). It holds no
//! lock of its own: exclusive access comes from the single
//! [`ResourceActor`](crate::actor_framework::ResourceActor) that owns it.

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("stored collection at {path} cannot be decoded: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("collection for {path} cannot be encoded: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Typed load/save of an ordered collection of `T` stored as a JSON array.
#[derive(Debug, Clone)]
pub struct CollectionStore<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> CollectionStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the persisted collection in stored order.
    ///
    /// A missing file is an empty collection, not an error.
    pub async fn load_all(&self) -> Result<Vec<T>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No collection file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    /// Replaces the persisted collection with `items`.
    ///
    /// Either the new content is durably in place when this returns `Ok`, or
    /// the previous content is left untouched.
    pub async fn save_all(&self, items: &[T]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(items).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|source| self.io_error(source))?;
        }

        let tmp = self.temp_path();
        if let Err(e) = write_and_sync(&tmp, &bytes).await {
            discard(&tmp).await;
            return Err(self.io_error(e));
        }
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            discard(&tmp).await;
            return Err(self.io_error(e));
        }

        debug!(path = %self.path.display(), records = items.len(), "Collection saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

async fn write_and_sync(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

async fn discard(tmp: &Path) {
    if let Err(e) = fs::remove_file(tmp).await {
        if e.kind() != ErrorKind::NotFound {
            warn!(path = %tmp.display(), error = %e, "Failed to remove temporary collection file");
        }
    }
}
