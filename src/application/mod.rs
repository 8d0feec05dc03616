//! Application layer with use cases, services and the state container.

/// Store-backed image operations.
pub mod image_operations;
/// Local cache and cleanup services.
pub mod services;
/// Reducer-style state container.
pub mod store;
/// Use case implementations.
pub mod use_cases;

pub use image_operations::ImageOperations;
pub use services::{CleanupWorker, LocalImageCache};
pub use store::{ImageState, ImageStore, Operation, OperationStatus};
pub use use_cases::{
    ClearAllImagesUseCase, DeleteImageUseCase, ListSavedImagesUseCase, SaveImageUseCase,
};
