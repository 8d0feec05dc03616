mod file_system_port;
mod image_repository_port;
mod remote_image_port;

pub use file_system_port::{FileSystemCapability, FileSystemPort};
pub use image_repository_port::ImageRepositoryPort;
pub use remote_image_port::RemoteImagePort;

#[cfg(test)]
pub use file_system_port::MockFileSystemPort;
