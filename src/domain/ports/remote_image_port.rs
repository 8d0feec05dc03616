//! Remote gallery port definition.

use async_trait::async_trait;

use crate::domain::entities::{Image, ImageId, ImagePage, ImageQuery};
use crate::domain::errors::ImageError;

/// Port for browsing the remote image gallery.
#[async_trait]
pub trait RemoteImagePort: Send + Sync {
    /// Fetches one page of gallery images.
    async fn fetch_page(&self, query: ImageQuery) -> Result<ImagePage, ImageError>;

    /// Fetches a single image by id.
    async fn fetch_image(&self, id: &ImageId) -> Result<Image, ImageError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Fixed gallery for testing.
    pub struct MockRemoteGallery {
        images: Vec<Image>,
    }

    impl MockRemoteGallery {
        /// Creates gallery serving `images`.
        pub fn new(images: Vec<Image>) -> Self {
            Self { images }
        }
    }

    #[async_trait]
    impl RemoteImagePort for MockRemoteGallery {
        async fn fetch_page(&self, query: ImageQuery) -> Result<ImagePage, ImageError> {
            let start = ((query.page - 1) * query.limit) as usize;
            let images: Vec<Image> = self
                .images
                .iter()
                .skip(start)
                .take(query.limit as usize)
                .cloned()
                .collect();
            let next_page = (start + images.len() < self.images.len())
                .then(|| query.page.checked_add(1))
                .flatten();
            Ok(ImagePage {
                images,
                has_more: next_page.is_some(),
                next_page,
            })
        }

        async fn fetch_image(&self, id: &ImageId) -> Result<Image, ImageError> {
            self.images
                .iter()
                .find(|i| &i.id == id)
                .cloned()
                .ok_or_else(|| ImageError::remote(format!("image {id} not found")))
        }
    }
}
