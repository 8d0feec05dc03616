//! Pixvault - browse a remote image gallery and keep local copies of saved images.
//!
//! The crate follows a clean architecture: domain entities and ports, application
//! use cases around a reducer-style store, infrastructure adapters for the file
//! system, the saved-image repository and the gallery API, and a CLI front end.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases, services and the state container.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing command handlers.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "pixvault";
