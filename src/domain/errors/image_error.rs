//! Image operation error types.

use thiserror::Error;

/// Errors raised by image save, delete, clear and browse operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ImageError {
    #[error("invalid image: {reason}")]
    InvalidImage { reason: String },

    #[error("failed to download image: {message}")]
    DownloadFailure { message: String },

    #[error("file system not available: {reason}")]
    FileSystemUnavailable { reason: String },

    #[error("failed to persist saved images: {message}")]
    Persistence { message: String },

    #[error("critical failure saving image: {message}")]
    CriticalSaveFailure { message: String },

    #[error("gallery request failed: {message}")]
    Remote { message: String },
}

impl ImageError {
    /// Creates invalid image error.
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            reason: reason.into(),
        }
    }

    /// Creates download failure error.
    #[must_use]
    pub fn download(message: impl Into<String>) -> Self {
        Self::DownloadFailure {
            message: message.into(),
        }
    }

    /// Creates file system unavailable error.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::FileSystemUnavailable {
            reason: reason.into(),
        }
    }

    /// Creates persistence error.
    #[must_use]
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Creates critical save failure error.
    #[must_use]
    pub fn critical_save(message: impl Into<String>) -> Self {
        Self::CriticalSaveFailure {
            message: message.into(),
        }
    }

    /// Creates remote gallery error.
    #[must_use]
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// Returns whether the caller can carry on using the remote URL.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DownloadFailure { .. } | Self::FileSystemUnavailable { .. } | Self::Remote { .. }
        )
    }
}
