//! Artifact checksum calculation.
//!
//! Streams each installer through SHA-256, writes a `<artifact>.sha256`
//! sidecar next to it and a `checksums.txt` manifest in the output root.
//! Missing or empty artifacts fail loudly; nothing is skipped.

use crate::bundler::{
    error::{ErrorExt, Result},
    platform::InstallerArtifact,
    utils::fs,
};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// File name of the aggregate manifest.
pub const MANIFEST_FILE_NAME: &str = "checksums.txt";

/// First line of the manifest.
pub const MANIFEST_HEADER: &str = "Checksums: \n";

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Digest algorithm of a [`ChecksumRecord`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChecksumAlgorithm {
    /// SHA-256, 64 lowercase hex characters
    Sha256,
}

impl ChecksumAlgorithm {
    /// Identifier used as the sidecar extension.
    pub fn as_str(self) -> &'static str {
        match self {
            ChecksumAlgorithm::Sha256 => "sha256",
        }
    }
}

/// Digest of one installer artifact.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChecksumRecord {
    /// Artifact the digest was computed over.
    pub path: PathBuf,
    /// Algorithm used.
    pub algorithm: ChecksumAlgorithm,
    /// Lowercase hex digest.
    pub digest: String,
}

impl ChecksumRecord {
    /// Manifest line for this record: `<digest> - <file name>`.
    pub fn manifest_line(&self) -> String {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        format!("{} - {}\n", self.digest, file_name)
    }
}

/// Calculates the SHA-256 digest of a file.
///
/// Reads in fixed-size chunks so artifacts of any size hash in constant memory.
///
/// # Returns
///
/// * `Ok(String)` - Lowercase hex digest (64 characters)
/// * `Err` - If the file cannot be opened or a read fails mid-stream
pub async fn compute_digest(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Writes `<path>.<algorithm>` containing the bare digest.
pub async fn write_sidecar(record: &ChecksumRecord) -> Result<PathBuf> {
    let mut sidecar = record.path.as_os_str().to_os_string();
    sidecar.push(".");
    sidecar.push(record.algorithm.as_str());
    let sidecar = PathBuf::from(sidecar);

    tokio::fs::write(&sidecar, &record.digest)
        .await
        .fs_context("writing checksum sidecar", &sidecar)?;

    Ok(sidecar)
}

/// Writes `<root>/checksums.txt` with one line per record, in order.
///
/// The manifest is replaced atomically.
pub async fn write_manifest(root: &Path, records: &[ChecksumRecord]) -> Result<PathBuf> {
    let mut text = String::from(MANIFEST_HEADER);
    for record in records {
        text.push_str(&record.manifest_line());
    }

    let manifest = root.join(MANIFEST_FILE_NAME);
    fs::write_atomic(&manifest, text).await?;
    Ok(manifest)
}

/// Checksums every artifact and writes sidecars plus the manifest.
///
/// Artifacts are hashed concurrently; results are collected in input order.
/// The manifest is only written after every digest and sidecar succeeded.
pub async fn generate_checksums(
    root: &Path,
    artifacts: &[InstallerArtifact],
) -> Result<Vec<ChecksumRecord>> {
    for artifact in artifacts {
        artifact.verify().await?;
    }

    let tasks: Vec<_> = artifacts
        .iter()
        .map(|artifact| {
            let path = artifact.path().to_path_buf();
            tokio::spawn(async move {
                let digest = compute_digest(&path).await?;
                Ok::<_, crate::bundler::Error>(ChecksumRecord {
                    path,
                    algorithm: ChecksumAlgorithm::Sha256,
                    digest,
                })
            })
        })
        .collect();

    let mut records = Vec::with_capacity(tasks.len());
    for task in tasks {
        records.push(task.await??);
    }

    for record in &records {
        let sidecar = write_sidecar(record).await?;
        log::debug!("Wrote {}", sidecar.display());
    }

    let manifest = write_manifest(root, &records).await?;
    log::info!("✓ Wrote checksums for {} installer(s) to {}", records.len(), manifest.display());

    Ok(records)
}
