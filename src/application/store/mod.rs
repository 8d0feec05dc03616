//! Reducer-style state container for saved images.

mod image_store;
mod reducer;
mod state;

pub use image_store::ImageStore;
pub use reducer::{ImageAction, reduce};
pub use state::{ImageState, Operation, OperationSlot, OperationStatus};
