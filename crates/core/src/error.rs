use thiserror::Error;

/// Errors produced by a [`KvStore`](crate::store::KvStore) write.
///
/// Reads never fail: an unreadable or missing key is reported as absent.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("quota exceeded writing '{key}': needs {needed} bytes, {available} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
