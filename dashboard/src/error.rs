//! Errors surfaced while starting or running the dashboard binary.
//!
//! Query operations themselves are total; only setup and terminal I/O fail.

use thiserror::Error;
use user_directory::{DirectoryError, GenerationError};

/// Top-level dashboard failure.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Settings could not be loaded from flags, environment, or files.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration failure.
        message: String,
    },
    /// The configured directory could not be loaded.
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),
    /// The demo directory could not be generated.
    #[error("directory generation error: {0}")]
    Generation(#[from] GenerationError),
    /// Reading commands or writing output failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
