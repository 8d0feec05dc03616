//! Clear-all use case implementation.

use std::sync::Arc;

use tracing::info;

use crate::domain::errors::ImageError;
use crate::domain::ports::ImageRepositoryPort;

/// Empties the saved set. Local files are removed afterwards by the cleanup worker.
#[derive(Clone)]
pub struct ClearAllImagesUseCase {
    repository: Arc<dyn ImageRepositoryPort>,
}

impl ClearAllImagesUseCase {
    /// Creates new clear-all use case.
    #[must_use]
    pub const fn new(repository: Arc<dyn ImageRepositoryPort>) -> Self {
        Self { repository }
    }

    /// Removes every saved image.
    ///
    /// # Errors
    /// Returns the repository error.
    pub async fn execute(&self) -> Result<(), ImageError> {
        self.repository.clear_all_images().await?;
        info!("Cleared all saved images");
        Ok(())
    }
}
