//! JSON file repository for the saved image set.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::entities::{Image, ImageId};
use crate::domain::errors::ImageError;
use crate::domain::ports::ImageRepositoryPort;

/// File name of the saved set inside the data directory.
pub const SAVED_IMAGES_FILE: &str = "saved_images.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SavedImagesFile {
    #[serde(default)]
    images: Vec<Image>,
}

/// Stores the saved set as one JSON document, rewritten atomically on every change.
#[derive(Debug)]
pub struct JsonImageRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonImageRepository {
    /// Creates a repository storing its file in `data_dir`.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self::with_path(data_dir.join(SAVED_IMAGES_FILE))
    }

    /// Creates a repository at an explicit file path.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<Image>, ImageError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ImageError::persistence(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };

        match serde_json::from_str::<SavedImagesFile>(&content) {
            Ok(file) => Ok(file.images),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Saved images file is malformed");
                Err(ImageError::persistence(format!("malformed saved images file: {e}")))
            }
        }
    }

    async fn store(&self, images: Vec<Image>) -> Result<(), ImageError> {
        let path = self.path.clone();
        let count = images.len();

        tokio::task::spawn_blocking(move || write_atomically(&path, &SavedImagesFile { images }))
            .await
            .map_err(|e| ImageError::persistence(format!("write task panicked: {e}")))??;

        debug!(path = %self.path.display(), count, "Saved images written");
        Ok(())
    }
}

fn write_atomically(path: &Path, data: &SavedImagesFile) -> Result<(), ImageError> {
    let to_err = |e: std::io::Error| ImageError::persistence(e.to_string());

    let content = serde_json::to_string_pretty(data)
        .map_err(|e| ImageError::persistence(format!("failed to serialize: {e}")))?;

    let parent = path
        .parent()
        .ok_or_else(|| ImageError::persistence("invalid saved images path"))?;
    std::fs::create_dir_all(parent).map_err(to_err)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(to_err)?;
    temp_file.write_all(content.as_bytes()).map_err(to_err)?;
    temp_file.persist(path).map_err(|e| to_err(e.error))?;

    Ok(())
}

#[async_trait]
impl ImageRepositoryPort for JsonImageRepository {
    async fn save_image(&self, image: &Image) -> Result<(), ImageError> {
        let _guard = self.write_lock.lock().await;
        let mut images = self.load().await?;

        if let Some(existing) = images.iter_mut().find(|i| i.id == image.id) {
            *existing = image.clone();
        } else {
            images.push(image.clone());
        }

        self.store(images).await
    }

    async fn get_saved_images(&self) -> Result<Vec<Image>, ImageError> {
        let _guard = self.write_lock.lock().await;
        self.load().await
    }

    async fn delete_image(&self, id: &ImageId) -> Result<(), ImageError> {
        let _guard = self.write_lock.lock().await;
        let mut images = self.load().await?;
        let before = images.len();
        images.retain(|i| &i.id != id);

        if images.len() == before {
            debug!(id = %id, "Image not in saved set, nothing to delete");
            return Ok(());
        }
        self.store(images).await
    }

    async fn clear_all_images(&self) -> Result<(), ImageError> {
        let _guard = self.write_lock.lock().await;
        self.store(Vec::new()).await
    }
}
