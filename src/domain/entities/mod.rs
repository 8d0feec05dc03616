//! Domain entity definitions.

mod image;

pub use image::{Image, ImageId, ImagePage, ImageQuery};
