//! File system utilities for packaging.
//!
//! Idempotent removal, atomic writes and renames with path context on every
//! error.

use crate::bundler::error::{Context, ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Removes the file or directory at `path` if it exists.
///
/// Missing paths are not an error, so re-running a packaging step is safe.
pub async fn remove_if_exists(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).fs_context("inspecting existing destination", path),
    };

    let removal = if metadata.is_dir() {
        fs::remove_dir_all(path).await
    } else {
        fs::remove_file(path).await
    };

    match removal {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing existing destination", path),
    }
}

/// Writes `contents` to `path` atomically.
///
/// The data lands in a temporary sibling first and is renamed over `path`,
/// so readers never observe a partially written file.
pub async fn write_atomic(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .fs_context("creating output directory", parent)?;
    }

    let temp = temp_sibling(path)?;
    fs::write(&temp, contents)
        .await
        .fs_context("writing temporary file", &temp)?;

    if let Err(e) = fs::rename(&temp, path).await {
        let _ = fs::remove_file(&temp).await;
        return Err(e).fs_context("replacing", path);
    }

    Ok(())
}

/// Renames `from` to `to`. A missing source is an error.
pub async fn rename_file(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).await.fs_context("renaming", from)
}

fn temp_sibling(path: &Path) -> Result<PathBuf> {
    let mut name = path
        .file_name()
        .context(format!("cannot write to {}: no file name", path.display()))?
        .to_os_string();
    name.push(format!(".{}.tmp", std::process::id()));
    Ok(path.with_file_name(name))
}
