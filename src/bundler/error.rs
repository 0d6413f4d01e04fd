//! Error types for packaging operations.
//!
//! Every failure in the packaging flow is fatal. [`Error::category`] sorts the
//! variants into the four classes the orchestrator reports on: configuration,
//! subprocess, artifact resolution and I/O.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for packaging operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of a packaging error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorCategory {
    /// Missing resource file or unrecognized platform. Raised before any tool runs.
    Configuration,
    /// External tool could not be spawned or exited non-zero.
    Subprocess,
    /// Artifact glob matched zero or several files.
    Resolution,
    /// Read, write, rename or permission failure.
    Io,
}

/// Errors raised while packaging and checksumming installers.
#[derive(Error, Debug)]
pub enum Error {
    /// Host operating system has no packager.
    #[error("I don't know how to package for {0}")]
    UnsupportedPlatform(String),

    /// A resource file required before packaging is absent.
    #[error("expected {kind} not found at location: {}", .path.display())]
    MissingResource {
        /// Human readable resource description
        kind: String,
        /// Location that was checked
        path: PathBuf,
    },

    /// Invalid or incomplete packaging configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// External tool binary could not be located.
    #[error("tool `{name}` not found (looked at {} and in PATH)", .configured.display())]
    ToolNotFound {
        /// Tool name searched in PATH
        name: String,
        /// Configured location that did not exist
        configured: PathBuf,
    },

    /// External command could not be spawned.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command that failed
        command: String,
        /// Underlying spawn error
        error: io::Error,
    },

    /// External command exited unsuccessfully.
    #[error("`{command}` failed with exit code {code:?}: {stderr}")]
    ToolFailed {
        /// Command that failed
        command: String,
        /// Exit code, `None` if terminated by a signal
        code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// No file matched an artifact pattern.
    #[error("expected one installer matching '{pattern}' but found none")]
    ArtifactNotFound {
        /// Glob pattern
        pattern: String,
    },

    /// More than one file matched an artifact pattern.
    #[error("expected one installer matching '{pattern}' but instead found '{}'", display_paths(.matches))]
    AmbiguousArtifact {
        /// Glob pattern
        pattern: String,
        /// Every match, sorted
        matches: Vec<PathBuf>,
    },

    /// Artifact pattern is not a valid glob.
    #[error("invalid artifact pattern '{pattern}': {error}")]
    InvalidPattern {
        /// Glob pattern
        pattern: String,
        /// Parse error
        error: glob::PatternError,
    },

    /// Artifact expected on disk does not exist.
    #[error("installer artifact does not exist: {}", .0.display())]
    ArtifactMissing(PathBuf),

    /// Artifact exists but has no content.
    #[error("installer artifact is empty: {}", .0.display())]
    EmptyArtifact(PathBuf),

    /// Filesystem operation failed on a specific path.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        error: io::Error,
    },

    /// Plain I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// JSON serialization error.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// URL parse error.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Background task panicked or was cancelled.
    #[error("background task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Returns the error class used for reporting and exit handling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::UnsupportedPlatform(_)
            | Error::MissingResource { .. }
            | Error::Configuration(_) => ErrorCategory::Configuration,
            Error::ToolNotFound { .. } | Error::CommandFailed { .. } | Error::ToolFailed { .. } => {
                ErrorCategory::Subprocess
            }
            Error::ArtifactNotFound { .. }
            | Error::AmbiguousArtifact { .. }
            | Error::InvalidPattern { .. } => ErrorCategory::Resolution,
            Error::ArtifactMissing(_)
            | Error::EmptyArtifact(_)
            | Error::Fs { .. }
            | Error::IoError(_)
            | Error::Json(_)
            | Error::Url(_)
            | Error::TaskFailed(_)
            | Error::GenericError(_) => ErrorCategory::Io,
        }
    }

    /// True for errors raised before any external tool was started.
    pub fn is_configuration(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Attaches filesystem context to I/O results.
pub trait ErrorExt<T> {
    /// Converts an I/O error into [`Error::Fs`] naming the operation and path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Converts options and foreign errors into [`Error::GenericError`] with a message.
pub trait Context<T> {
    /// Wraps the failure case with `msg`.
    fn context<C: Display>(self, msg: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, msg: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C: Display>(self, msg: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{msg}: {e}")))
    }
}
