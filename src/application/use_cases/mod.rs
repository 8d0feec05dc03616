//! Use case implementations.

mod clear_all_images_use_case;
mod delete_image_use_case;
mod list_saved_images_use_case;
mod save_image_use_case;

pub use clear_all_images_use_case::ClearAllImagesUseCase;
pub use delete_image_use_case::DeleteImageUseCase;
pub use list_saved_images_use_case::ListSavedImagesUseCase;
pub use save_image_use_case::SaveImageUseCase;
