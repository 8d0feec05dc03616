//! Delete image use case implementation.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::ImageId;
use crate::domain::errors::ImageError;
use crate::domain::ports::ImageRepositoryPort;

/// Removes one image from the saved set.
///
/// Local file removal is scheduled separately by the caller once this succeeds.
#[derive(Clone)]
pub struct DeleteImageUseCase {
    repository: Arc<dyn ImageRepositoryPort>,
}

impl DeleteImageUseCase {
    /// Creates new delete use case.
    #[must_use]
    pub const fn new(repository: Arc<dyn ImageRepositoryPort>) -> Self {
        Self { repository }
    }

    /// Deletes the image with `id`.
    ///
    /// # Errors
    /// Returns `InvalidImage` for an empty id, or the repository error.
    pub async fn execute(&self, id: &ImageId) -> Result<(), ImageError> {
        if id.is_blank() {
            return Err(ImageError::invalid("image id is required"));
        }

        debug!(id = %id, "Deleting saved image");
        self.repository.delete_image(id).await?;
        info!(id = %id, "Saved image deleted");
        Ok(())
    }
}
