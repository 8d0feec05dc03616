//! List saved images use case implementation.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::Image;
use crate::domain::errors::ImageError;
use crate::domain::ports::ImageRepositoryPort;

/// Reads the full saved set from the repository.
#[derive(Clone)]
pub struct ListSavedImagesUseCase {
    repository: Arc<dyn ImageRepositoryPort>,
}

impl ListSavedImagesUseCase {
    /// Creates new list use case.
    #[must_use]
    pub const fn new(repository: Arc<dyn ImageRepositoryPort>) -> Self {
        Self { repository }
    }

    /// Returns every saved image.
    ///
    /// # Errors
    /// Returns the repository error.
    pub async fn execute(&self) -> Result<Vec<Image>, ImageError> {
        let images = self.repository.get_saved_images().await?;
        debug!(count = images.len(), "Loaded saved images");
        Ok(images)
    }
}
