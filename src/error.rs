use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the catalog and session operations.
///
/// `NotFound` and `InvalidCredentials` are expected outcomes and carry their own user-facing
/// message; the rest are faults that a caller reports generically.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Movie not found")]
    NotFound { id: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Failed to read {}: {source}", .path.display())]
    StorageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("Slot {slot} holds malformed data: {source}")]
    Corrupt {
        slot: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),

    #[error("{0}")]
    Assistant(String),
}

impl ApiError {
    pub fn not_found(id: impl Into<String>) -> Self { ApiError::NotFound { id: id.into() } }

    /// Expected outcomes are data for the caller; everything else is a fault.
    pub fn is_expected(&self) -> bool { matches!(self, ApiError::NotFound { .. } | ApiError::InvalidCredentials) }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
