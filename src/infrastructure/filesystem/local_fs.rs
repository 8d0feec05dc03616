//! Disk-backed file system adapter with HTTP downloads.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use tokio::fs;
use tracing::{debug, trace, warn};

use crate::domain::errors::{FsError, FsResult};
use crate::domain::ports::{FileSystemCapability, FileSystemPort};

const USER_AGENT: &str = concat!("pixvault/", env!("CARGO_PKG_VERSION"));

/// File system adapter rooted at the application's document directory.
pub struct LocalFileSystem {
    document_dir: PathBuf,
    http_client: Client,
}

impl std::fmt::Debug for LocalFileSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalFileSystem")
            .field("document_dir", &self.document_dir)
            .finish_non_exhaustive()
    }
}

impl LocalFileSystem {
    /// Creates an adapter rooted at `document_dir`.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(document_dir: PathBuf, timeout_secs: u64) -> FsResult<Self> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FsError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            document_dir,
            http_client,
        })
    }

    /// Resolves the capability once at startup.
    ///
    /// The capability is unavailable when no document directory is known, the
    /// directory cannot be created, or the HTTP client cannot be built.
    pub async fn detect(document_dir: Option<PathBuf>, timeout_secs: u64) -> FileSystemCapability {
        let Some(dir) = document_dir else {
            warn!("No document directory available, local copies disabled");
            return FileSystemCapability::unavailable("no document directory");
        };

        if let Err(e) = fs::create_dir_all(&dir).await {
            warn!(dir = %dir.display(), error = %e, "Document directory not writable");
            return FileSystemCapability::unavailable(format!(
                "cannot create {}: {e}",
                dir.display()
            ));
        }

        match Self::new(dir, timeout_secs) {
            Ok(adapter) => FileSystemCapability::available(Arc::new(adapter)),
            Err(e) => FileSystemCapability::unavailable(e.to_string()),
        }
    }

    async fn fetch(&self, url: &str) -> FsResult<(u16, Option<Bytes>)> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| FsError::Network(format!("Request failed: {e}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Ok((status.as_u16(), None));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FsError::Network(format!("Failed to read body: {e}")))?;

        Ok((status.as_u16(), Some(bytes)))
    }
}

/// Writes through a sibling temp file so `dest` never holds a partial image.
fn write_atomically(dest: &Path, bytes: &[u8]) -> FsResult<()> {
    let to_err = |e: std::io::Error| FsError::Io(format!("Failed to write image file: {e}"));

    let parent = dest
        .parent()
        .ok_or_else(|| FsError::Io(format!("Invalid image path: {}", dest.display())))?;
    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(to_err)?;
    temp_file.write_all(bytes).map_err(to_err)?;
    temp_file.flush().map_err(to_err)?;
    temp_file.persist(dest).map_err(|e| to_err(e.error))?;

    Ok(())
}

#[async_trait]
impl FileSystemPort for LocalFileSystem {
    fn document_dir(&self) -> PathBuf {
        self.document_dir.clone()
    }

    async fn exists(&self, path: &Path) -> FsResult<bool> {
        fs::try_exists(path)
            .await
            .map_err(|e| FsError::Io(format!("Failed to stat {}: {e}", path.display())))
    }

    async fn mkdir(&self, path: &Path) -> FsResult<()> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| FsError::Io(format!("Failed to create dir: {e}")))
    }

    async fn download(&self, url: &str, dest: &Path) -> FsResult<u16> {
        debug!(url = %url, dest = %dest.display(), "Downloading image");

        let (status, bytes) = self.fetch(url).await?;
        let Some(bytes) = bytes else {
            warn!(url = %url, status, "Download returned non-success status");
            return Ok(status);
        };

        let size = bytes.len();
        let target = dest.to_path_buf();
        tokio::task::spawn_blocking(move || write_atomically(&target, &bytes))
            .await
            .map_err(|e| FsError::Io(format!("Image write task failed: {e}")))??;

        trace!(dest = %dest.display(), size, "Wrote image file");
        Ok(status)
    }

    async fn list_dir(&self, path: &Path) -> FsResult<Vec<String>> {
        let mut entries = fs::read_dir(path)
            .await
            .map_err(|e| FsError::Io(format!("Failed to read dir: {e}")))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| FsError::Io(format!("Failed to read entry: {e}")))?
        {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    async fn delete(&self, path: &Path) -> FsResult<()> {
        let meta = fs::metadata(path)
            .await
            .map_err(|e| FsError::Io(format!("Failed to stat {}: {e}", path.display())))?;

        let result = if meta.is_dir() {
            fs::remove_dir_all(path).await
        } else {
            fs::remove_file(path).await
        };

        result.map_err(|e| FsError::Io(format!("Failed to delete {}: {e}", path.display())))
    }
}
