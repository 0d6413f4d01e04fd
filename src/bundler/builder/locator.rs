//! Artifact location by glob pattern.
//!
//! Installer builders choose their own output names (embedding version and
//! architecture). The pattern is the contract; exactly one match is the
//! invariant. Zero or several matches fail, the locator never guesses.

use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Resolves the single file matching `pattern`.
///
/// # Errors
///
/// - [`Error::InvalidPattern`] if `pattern` is not a valid glob
/// - [`Error::ArtifactNotFound`] if nothing matches
/// - [`Error::AmbiguousArtifact`] if more than one path matches
pub fn resolve_one(pattern: &str) -> Result<PathBuf> {
    let paths = glob::glob(pattern).map_err(|error| Error::InvalidPattern {
        pattern: pattern.to_string(),
        error,
    })?;

    let mut matches = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| Error::Fs {
            context: "reading while matching artifacts",
            path: e.path().to_path_buf(),
            error: std::io::Error::new(e.error().kind(), e.error().to_string()),
        })?;
        matches.push(path);
    }

    match matches.len() {
        0 => Err(Error::ArtifactNotFound {
            pattern: pattern.to_string(),
        }),
        1 => Ok(matches.remove(0)),
        _ => {
            matches.sort();
            Err(Error::AmbiguousArtifact {
                pattern: pattern.to_string(),
                matches,
            })
        }
    }
}

/// Resolves the single file in `dir` whose name matches `file_pattern`.
///
/// `dir` is matched literally, so directories whose names contain glob
/// metacharacters (`[`, `*`, `?`) are safe.
pub fn resolve_in(dir: &Path, file_pattern: &str) -> Result<PathBuf> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{}/{}", escaped.trim_end_matches('/'), file_pattern);
    resolve_one(&pattern)
}
