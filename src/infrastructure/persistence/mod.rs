//! Saved image persistence adapters.

mod json_image_repository;

pub use json_image_repository::{JsonImageRepository, SAVED_IMAGES_FILE};
