//! Application services shared by use cases and operations.

pub mod cleanup_worker;
pub mod local_image_cache;

pub use cleanup_worker::{CleanupJob, CleanupQueue, CleanupReport, CleanupWorker};
pub use local_image_cache::{
    DEFAULT_IMAGES_DIR, ImageLocation, LocalDeletion, LocalImageCache, infer_extension,
};
