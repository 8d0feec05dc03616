//! File system adapters.

mod local_fs;

pub use local_fs::LocalFileSystem;
