//! Local mirror of saved gallery images.
//!
//! Files live under `<document_dir>/<images_dir_name>/<id><ext>`. Every operation
//! degrades instead of failing: a download that cannot complete hands back the remote
//! URL, and lookups or deletions on a missing file system become no-ops.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::entities::{Image, ImageId};
use crate::domain::errors::{FsError, ImageError};
use crate::domain::ports::{FileSystemCapability, FileSystemPort};

/// Default name of the images directory.
pub const DEFAULT_IMAGES_DIR: &str = "images";

const FALLBACK_EXTENSION: &str = "jpg";

/// Where a saved image can be displayed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLocation {
    /// A local copy was written to this path.
    Local(PathBuf),
    /// Local storage failed; the remote URL is still usable.
    Remote(String),
}

impl ImageLocation {
    /// Returns the local path, if this is a local copy.
    #[must_use]
    pub fn local_path(&self) -> Option<&Path> {
        match self {
            Self::Local(path) => Some(path),
            Self::Remote(_) => None,
        }
    }

    /// Returns the location as a displayable source string.
    #[must_use]
    pub fn to_source(&self) -> String {
        match self {
            Self::Local(path) => path.display().to_string(),
            Self::Remote(url) => url.clone(),
        }
    }
}

/// Result of a local deletion. Never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalDeletion {
    /// The file or directory was removed.
    Removed,
    /// Nothing existed at the path.
    NotFound,
    /// The file system capability is unavailable.
    Unavailable,
    /// The file system refused the deletion.
    Failed(String),
}

impl LocalDeletion {
    /// Returns true unless the file system reported a failure.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// Returns the file extension (without dot) for an image URL.
///
/// Takes the text after the last `.` and keeps it when it names a known image
/// format; anything else maps to `jpg`.
#[must_use]
pub fn infer_extension(url: &str) -> &'static str {
    let candidate = url.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    match candidate.as_str() {
        "jpg" => "jpg",
        "jpeg" => "jpeg",
        "png" => "png",
        "gif" => "gif",
        "webp" => "webp",
        _ => FALLBACK_EXTENSION,
    }
}

/// Local file cache backed by an injected file system capability.
#[derive(Debug, Clone)]
pub struct LocalImageCache {
    fs: FileSystemCapability,
    images_dir_name: String,
}

impl LocalImageCache {
    /// Creates a cache using the default images directory name.
    #[must_use]
    pub fn new(fs: FileSystemCapability) -> Self {
        Self::with_dir_name(fs, DEFAULT_IMAGES_DIR)
    }

    /// Creates a cache using a custom images directory name.
    #[must_use]
    pub fn with_dir_name(fs: FileSystemCapability, images_dir_name: impl Into<String>) -> Self {
        Self {
            fs,
            images_dir_name: images_dir_name.into(),
        }
    }

    /// Returns true if the underlying file system is usable.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.fs.is_available()
    }

    /// Returns the images directory, if the file system is available.
    #[must_use]
    pub fn images_dir(&self) -> Option<PathBuf> {
        self.fs
            .get()
            .ok()
            .map(|fs| fs.document_dir().join(&self.images_dir_name))
    }

    /// Downloads the image into the cache.
    ///
    /// Falls back to the remote URL on any failure.
    pub async fn download_and_save(&self, image: &Image) -> ImageLocation {
        debug!(id = %image.id, url = %image.url, "Starting local download");

        match self.try_download(image).await {
            Ok(path) => {
                info!(id = %image.id, path = %path.display(), "Stored image locally");
                ImageLocation::Local(path)
            }
            Err(e) => {
                warn!(id = %image.id, error = %e, "Local download failed, using remote URL");
                ImageLocation::Remote(image.url.clone())
            }
        }
    }

    async fn try_download(&self, image: &Image) -> Result<PathBuf, ImageError> {
        let fs = self.fs.get()?;
        let dir = self
            .ensure_images_dir(fs.as_ref())
            .await
            .map_err(|e| ImageError::download(e.to_string()))?;

        let path = dir.join(format!("{}.{}", image.id, infer_extension(&image.url)));

        let status = fs
            .download(&image.url, &path)
            .await
            .map_err(|e| ImageError::download(e.to_string()))?;

        if status != 200 {
            return Err(ImageError::download(format!("unexpected status {status}")));
        }

        Ok(path)
    }

    /// Looks up an existing local copy by image id.
    ///
    /// Prefers a file named exactly `<id>.<ext>` over longer ids sharing the prefix.
    ///
    /// Without an exact match any file starting with `id` is returned, so with numeric
    /// ids `1` can resolve to `10.jpg`. A save then records that file, and deleting `1`
    /// later removes image 10's copy.
    pub async fn lookup_local(&self, id: &ImageId) -> Option<PathBuf> {
        let fs = self.fs.get().ok()?;

        let result = async {
            let dir = self.ensure_images_dir(fs.as_ref()).await?;
            let names = fs.list_dir(&dir).await?;
            Ok::<_, FsError>(pick_match(id, &names).map(|name| dir.join(name)))
        }
        .await;

        match result {
            Ok(found) => {
                debug!(id = %id, found = found.is_some(), "Checked for local copy");
                found
            }
            Err(e) => {
                warn!(id = %id, error = %e, "Failed to check for local copy");
                None
            }
        }
    }

    /// Deletes a local file if it exists.
    pub async fn delete_local(&self, path: &Path) -> LocalDeletion {
        let Ok(fs) = self.fs.get() else {
            debug!(path = %path.display(), "File system unavailable, skipping delete");
            return LocalDeletion::Unavailable;
        };

        match fs.exists(path).await {
            Ok(false) => {
                debug!(path = %path.display(), "Local file already gone");
                return LocalDeletion::NotFound;
            }
            Ok(true) => {}
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to check local file");
                return LocalDeletion::Failed(e.to_string());
            }
        }

        match fs.delete(path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Deleted local file");
                LocalDeletion::Removed
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to delete local file");
                LocalDeletion::Failed(e.to_string())
            }
        }
    }

    /// Deletes the whole images directory.
    pub async fn clear_all_local(&self) -> LocalDeletion {
        let Some(dir) = self.images_dir() else {
            return LocalDeletion::Unavailable;
        };
        let outcome = self.delete_local(&dir).await;
        info!(dir = %dir.display(), outcome = ?outcome, "Cleared local images");
        outcome
    }

    /// Returns the source an image should be displayed from.
    ///
    /// The recorded local path is only trusted when the cache still holds that file.
    pub async fn resolve_source(&self, image: &Image) -> String {
        let Some(local) = image.local_path() else {
            return image.url.clone();
        };

        match self.lookup_local(&image.id).await {
            Some(found) if found == local => local.display().to_string(),
            _ => {
                warn!(id = %image.id, "Local copy missing, using remote URL");
                image.url.clone()
            }
        }
    }

    async fn ensure_images_dir(&self, fs: &dyn FileSystemPort) -> Result<PathBuf, FsError> {
        let dir = fs.document_dir().join(&self.images_dir_name);
        if !fs.exists(&dir).await? {
            debug!(dir = %dir.display(), "Creating images directory");
            fs.mkdir(&dir).await?;
        }
        Ok(dir)
    }
}

fn pick_match<'a>(id: &ImageId, names: &'a [String]) -> Option<&'a str> {
    let exact = format!("{id}.");
    names
        .iter()
        .find(|name| name.starts_with(&exact))
        .or_else(|| names.iter().find(|name| name.starts_with(id.as_str())))
        .map(String::as_str)
}
