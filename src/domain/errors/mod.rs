//! Domain error types.

mod fs_error;
mod image_error;

pub use fs_error::{FsError, FsResult};
pub use image_error::ImageError;
