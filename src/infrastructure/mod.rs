//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Local file system adapter.
pub mod filesystem;
/// Saved image persistence.
pub mod persistence;
/// Remote gallery client.
pub mod remote;

pub use config::{AppConfig, CliArgs, Command, ConfigManager, LogLevel};
pub use filesystem::LocalFileSystem;
pub use persistence::{JsonImageRepository, SAVED_IMAGES_FILE};
pub use remote::{PICSUM_API_BASE, PicsumClient};
