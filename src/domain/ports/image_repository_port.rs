//! Saved image repository port definition.

use async_trait::async_trait;

use crate::domain::entities::{Image, ImageId};
use crate::domain::errors::ImageError;

/// Port for durable storage of the saved image set.
///
/// Writes are idempotent: saving an image whose id is already stored replaces it.
#[async_trait]
pub trait ImageRepositoryPort: Send + Sync {
    /// Stores one image.
    async fn save_image(&self, image: &Image) -> Result<(), ImageError>;

    /// Returns the full saved set in insertion order.
    async fn get_saved_images(&self) -> Result<Vec<Image>, ImageError>;

    /// Removes the image with `id`. Missing ids are not an error.
    async fn delete_image(&self, id: &ImageId) -> Result<(), ImageError>;

    /// Removes every saved image.
    async fn clear_all_images(&self) -> Result<(), ImageError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::RwLock;

    /// In-memory repository for testing.
    pub struct MockImageRepository {
        images: Arc<RwLock<Vec<Image>>>,
        failing_saves: AtomicUsize,
        save_attempts: RwLock<Vec<Image>>,
        fail_reads: AtomicBool,
        fail_deletes: AtomicBool,
    }

    impl MockImageRepository {
        /// Creates empty repository.
        pub fn new() -> Self {
            Self {
                images: Arc::new(RwLock::new(Vec::new())),
                failing_saves: AtomicUsize::new(0),
                save_attempts: RwLock::new(Vec::new()),
                fail_reads: AtomicBool::new(false),
                fail_deletes: AtomicBool::new(false),
            }
        }

        /// Creates repository holding `images`.
        pub fn with_images(images: Vec<Image>) -> Self {
            Self {
                images: Arc::new(RwLock::new(images)),
                ..Self::new()
            }
        }

        /// Makes the next `count` saves fail.
        pub fn fail_next_saves(&self, count: usize) {
            self.failing_saves.store(count, Ordering::SeqCst);
        }

        /// Makes reads fail.
        pub fn set_fail_reads(&self, value: bool) {
            self.fail_reads.store(value, Ordering::SeqCst);
        }

        /// Makes deletes and clears fail.
        pub fn set_fail_deletes(&self, value: bool) {
            self.fail_deletes.store(value, Ordering::SeqCst);
        }

        /// Returns every image passed to `save_image`, including failed attempts.
        pub async fn save_attempts(&self) -> Vec<Image> {
            self.save_attempts.read().await.clone()
        }

        /// Returns the stored images.
        pub async fn stored(&self) -> Vec<Image> {
            self.images.read().await.clone()
        }
    }

    impl Default for MockImageRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ImageRepositoryPort for MockImageRepository {
        async fn save_image(&self, image: &Image) -> Result<(), ImageError> {
            self.save_attempts.write().await.push(image.clone());

            let remaining = self.failing_saves.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failing_saves.store(remaining - 1, Ordering::SeqCst);
                return Err(ImageError::persistence("mock write failure"));
            }

            let mut images = self.images.write().await;
            if let Some(existing) = images.iter_mut().find(|i| i.id == image.id) {
                *existing = image.clone();
            } else {
                images.push(image.clone());
            }
            Ok(())
        }

        async fn get_saved_images(&self) -> Result<Vec<Image>, ImageError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(ImageError::persistence("mock read failure"));
            }
            Ok(self.images.read().await.clone())
        }

        async fn delete_image(&self, id: &ImageId) -> Result<(), ImageError> {
            if self.fail_deletes.load(Ordering::SeqCst) {
                return Err(ImageError::persistence("mock delete failure"));
            }
            self.images.write().await.retain(|i| &i.id != id);
            Ok(())
        }

        async fn clear_all_images(&self) -> Result<(), ImageError> {
            if self.fail_deletes.load(Ordering::SeqCst) {
                return Err(ImageError::persistence("mock clear failure"));
            }
            self.images.write().await.clear();
            Ok(())
        }
    }
}
