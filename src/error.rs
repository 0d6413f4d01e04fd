//! Top-level error types for the packaging CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum PackagerError {
    /// Packaging errors
    #[error("Packaging error: {0}")]
    Packaging(#[from] crate::bundler::Error),

    /// CLI argument and configuration errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid product version
    #[error("Invalid version: {0}")]
    Version(#[from] semver::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file could not be read
    #[error("Cannot read configuration {}: {reason}", .path.display())]
    ConfigUnreadable {
        /// Configuration file
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Configuration file is malformed
    #[error("Invalid configuration {}: {reason}", .path.display())]
    InvalidConfig {
        /// Configuration file
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

impl PackagerError {
    /// True for errors caused by wrong inputs rather than a failed step.
    pub fn is_configuration(&self) -> bool {
        match self {
            PackagerError::Packaging(e) => e.is_configuration(),
            PackagerError::Cli(_) | PackagerError::Toml(_) | PackagerError::Version(_) => true,
            PackagerError::Io(_) => false,
        }
    }
}
