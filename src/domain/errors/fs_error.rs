//! File system port error types.

use thiserror::Error;

/// Result type for file system port calls.
pub type FsResult<T> = std::result::Result<T, FsError>;

/// Errors reported by a file system adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    /// Local I/O failed.
    #[error("IO error: {0}")]
    Io(String),
    /// Fetching remote bytes failed.
    #[error("Network error: {0}")]
    Network(String),
}
