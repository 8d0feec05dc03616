//! Port definition for the device file system.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::{FsResult, ImageError};

/// Port for the file system operations the local image cache relies on.
/// Implementations must be thread-safe.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileSystemPort: Send + Sync {
    /// Root directory under which application documents are stored.
    fn document_dir(&self) -> PathBuf;

    /// Returns whether a file or directory exists at `path`.
    async fn exists(&self, path: &Path) -> FsResult<bool>;

    /// Creates `path` and any missing parents.
    async fn mkdir(&self, path: &Path) -> FsResult<()>;

    /// Downloads `url` into `dest` and returns the HTTP status code.
    /// `dest` is only written, in full, when the status is 200.
    async fn download(&self, url: &str, dest: &Path) -> FsResult<u16>;

    /// Lists the entry names of a directory.
    async fn list_dir(&self, path: &Path) -> FsResult<Vec<String>>;

    /// Deletes a file, or a directory with its contents.
    async fn delete(&self, path: &Path) -> FsResult<()>;
}

/// File system capability resolved once at startup.
#[derive(Clone)]
pub enum FileSystemCapability {
    /// A working file system adapter.
    Available(Arc<dyn FileSystemPort>),
    /// No usable file system; cache operations degrade to the remote URL.
    Unavailable {
        /// Why the adapter could not be created.
        reason: String,
    },
}

impl FileSystemCapability {
    /// Wraps an adapter as available.
    #[must_use]
    pub fn available(fs: Arc<dyn FileSystemPort>) -> Self {
        Self::Available(fs)
    }

    /// Marks the capability as unavailable.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Returns the adapter, or `FileSystemUnavailable`.
    ///
    /// # Errors
    /// Returns error when the capability is unavailable.
    pub fn get(&self) -> Result<&Arc<dyn FileSystemPort>, ImageError> {
        match self {
            Self::Available(fs) => Ok(fs),
            Self::Unavailable { reason } => Err(ImageError::unavailable(reason.clone())),
        }
    }

    /// Returns true if an adapter is present.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl std::fmt::Debug for FileSystemCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(fs) => f
                .debug_tuple("Available")
                .field(&fs.document_dir())
                .finish(),
            Self::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}
