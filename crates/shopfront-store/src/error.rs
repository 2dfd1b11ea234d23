//! # Store Error Types
//!
//! Error types for repository, file and snapshot operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (not found, invalid rating, parse, validation)              │
//! │  std::io::Error / serde_json::Error / toml::de::Error                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds path context and categorization       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller: one failed operation, repository still usable                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use shopfront_core::{CoreError, ProductId};
use thiserror::Error;

/// Repository layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Domain failure (not found, invalid rating, parse, validation).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// File system access failed.
    ///
    /// ## When This Occurs
    /// - Reports folder is not writable
    /// - Data file disappeared between listing and reading
    /// - Disk full while saving
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot JSON could not be written or read back.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// The temp folder holds no snapshot to restore.
    #[error("No snapshot found in {}", .0.display())]
    NoSnapshot(PathBuf),

    /// Configuration is invalid or unreadable.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl StoreError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a ProductNotFound error.
    pub fn not_found(id: ProductId) -> Self {
        StoreError::Core(CoreError::ProductNotFound(id))
    }

    /// True when the operation failed only because the id is unknown.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Core(CoreError::ProductNotFound(_)))
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_helpers() {
        let err = StoreError::not_found(9);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Product with id 9 not found");

        let err = StoreError::Config("bad".into());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = StoreError::io(
            "/reports/x.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = err.to_string();
        assert!(message.contains("/reports/x.txt"));
        assert!(message.contains("denied"));
    }
}
