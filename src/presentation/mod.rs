//! Presentation layer: command line handlers.

/// CLI command handlers.
pub mod commands;

pub use commands::CommandRunner;
