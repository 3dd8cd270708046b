use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::StoreError;

use super::KvStore;

/// Filesystem-backed store: one file per key inside a data directory.
///
/// ```text
/// data/
///   sources.enabled.val
///   sources.custom.val
///   sources.text__custom__3f2c....val
/// ```
///
/// Keys may contain `:` and `/`, so they are flattened to a safe filename
/// (see [`key_filename`]). Writes go to a temporary file first and are then
/// renamed into place.
#[derive(Debug)]
pub struct FileStore {
    base_dir: PathBuf,
    quota_bytes: Option<u64>,
}

impl FileStore {
    /// Create a new FileStore, ensuring the directory exists.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            quota_bytes: None,
        })
    }

    /// Cap total on-disk usage of stored values.
    pub fn with_quota(mut self, bytes: u64) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    /// Base path for this store.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(key_filename(key))
    }

    fn used_bytes_excluding(&self, skip: &Path) -> Result<u64, StoreError> {
        let mut total = 0;
        for entry in std::fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path == skip || path.extension().and_then(|s| s.to_str()) != Some("val") {
                continue;
            }
            total += entry.metadata()?.len();
        }
        Ok(total)
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key, path = %path.display(), error = %e, "failed to read stored value");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);

        if let Some(quota) = self.quota_bytes {
            let used = self.used_bytes_excluding(&path)?;
            let available = quota.saturating_sub(used);
            if value.len() as u64 > available {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed: value.len(),
                    available: available as usize,
                });
            }
        }

        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(key, path = %path.display(), error = %e, "failed to remove stored value"),
        }
    }
}

/// Convert a key (which may contain `:` or `/`) to a safe filename.
fn key_filename(key: &str) -> String {
    format!("{}.val", key.replace(':', "__").replace(['/', '\\'], "_"))
}
