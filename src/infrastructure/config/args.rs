use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "pixvault",
    version,
    about = "Browse a remote image gallery and keep local copies of the images you save",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", env = "PIXVAULT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", env = "PIXVAULT_LOG_PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, env = "PIXVAULT_LOG_LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Directory holding saved images.
    #[arg(long, value_name = "PATH", env = "PIXVAULT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Gallery API base URL.
    #[arg(long, value_name = "URL", env = "PIXVAULT_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List one page of the remote gallery.
    Browse {
        /// Page number, starting at 1.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Images per page. Defaults to the configured page size.
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Save a gallery image and keep a local copy.
    Save {
        /// Gallery image id.
        id: String,
    },
    /// List saved images.
    List,
    /// Show where a saved image is displayed from.
    Show {
        /// Saved image id.
        id: String,
    },
    /// Delete one saved image.
    Delete {
        /// Saved image id.
        id: String,
    },
    /// Delete every saved image.
    Clear,
    /// Remove the whole local images directory.
    PurgeCache,
}
