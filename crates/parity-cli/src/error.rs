//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

use parity_analytics::AnalyticsError;
use parity_bonds::BondError;
use parity_config::ConfigError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A bond book could not be read.
    #[error("Cannot read bond book {}: {message}", path.display())]
    Book {
        /// Path of the book file.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// Market or analyzer setup failed.
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    /// A single-bond calculation failed.
    #[error("Calculation error: {0}")]
    Calculation(#[from] BondError),

    /// Neither a book file nor the demo book was given.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Refused to overwrite an existing file.
    #[error("{} already exists (use --force to overwrite)", .0.display())]
    FileExists(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
