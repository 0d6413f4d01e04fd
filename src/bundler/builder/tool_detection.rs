//! External tool location.
//!
//! Builders normally live in the project's `node_modules/.bin`. When the
//! configured location is missing the tool is looked up in `PATH`.

use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Resolves the executable for an external packaging tool.
///
/// # Errors
///
/// Returns [`Error::ToolNotFound`] if `configured` does not exist and
/// `fallback_name` is not in `PATH`.
pub fn locate_tool(configured: &Path, fallback_name: &str) -> Result<PathBuf> {
    if configured.is_file() {
        log::debug!("Using {} at: {}", fallback_name, configured.display());
        return Ok(configured.to_path_buf());
    }

    match which::which(fallback_name) {
        Ok(path) => {
            log::debug!(
                "{} not found at {}, using {} from PATH",
                fallback_name,
                configured.display(),
                path.display()
            );
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", fallback_name, e);
            Err(Error::ToolNotFound {
                name: fallback_name.to_string(),
                configured: configured.to_path_buf(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("electron-builder");
        std::fs::write(&tool, b"#!/bin/sh\n").unwrap();

        assert_eq!(locate_tool(&tool, "electron-builder").unwrap(), tool);
    }

    #[test]
    fn missing_everywhere_is_tool_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = locate_tool(
            &dir.path().join("nope"),
            "kodegen-definitely-missing-tool",
        )
        .unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
    }
}
