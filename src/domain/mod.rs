//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{Image, ImageId, ImagePage, ImageQuery};
pub use errors::{FsError, ImageError};
pub use ports::{FileSystemCapability, FileSystemPort, ImageRepositoryPort, RemoteImagePort};
