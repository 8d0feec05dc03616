//! Save image use case implementation.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::application::services::{ImageLocation, LocalImageCache};
use crate::domain::entities::Image;
use crate::domain::errors::ImageError;
use crate::domain::ports::ImageRepositoryPort;

/// Persists an image to the saved set, mirroring it locally when possible.
#[derive(Clone)]
pub struct SaveImageUseCase {
    repository: Arc<dyn ImageRepositoryPort>,
    cache: Arc<LocalImageCache>,
}

impl SaveImageUseCase {
    /// Creates new save use case.
    #[must_use]
    pub const fn new(
        repository: Arc<dyn ImageRepositoryPort>,
        cache: Arc<LocalImageCache>,
    ) -> Self {
        Self { repository, cache }
    }

    /// Saves `image` and returns the entry that was persisted.
    ///
    /// Local download problems never fail the save. A failed write is retried once
    /// with the image as received, without any local path added here.
    ///
    /// # Errors
    /// Returns `InvalidImage` when id or url is empty, `CriticalSaveFailure` when
    /// both writes fail.
    pub async fn execute(&self, image: Image) -> Result<Image, ImageError> {
        if !image.is_complete() {
            warn!(id = %image.id, "Rejected image without id or url");
            return Err(ImageError::invalid("image id and url are required"));
        }

        let enriched = self.attach_local_copy(&image).await;

        match self.repository.save_image(&enriched).await {
            Ok(()) => {
                info!(
                    id = %enriched.id,
                    local = enriched.local_path.is_some(),
                    "Image saved"
                );
                Ok(enriched)
            }
            Err(e) => {
                error!(id = %image.id, error = %e, "Failed to save image, retrying as received");
                self.repository.save_image(&image).await.map_err(|retry_err| {
                    error!(id = %image.id, error = %retry_err, "Retry failed");
                    ImageError::critical_save(retry_err.to_string())
                })?;
                Ok(image)
            }
        }
    }

    async fn attach_local_copy(&self, image: &Image) -> Image {
        if image.local_path.is_some() {
            return image.clone();
        }

        if let Some(existing) = self.cache.lookup_local(&image.id).await {
            debug!(id = %image.id, path = %existing.display(), "Reusing existing local copy");
            return image.clone().with_local_path(existing);
        }

        match self.cache.download_and_save(image).await {
            ImageLocation::Local(path) => image.clone().with_local_path(path),
            ImageLocation::Remote(_) => image.clone(),
        }
    }
}
