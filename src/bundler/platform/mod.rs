//! Platform-specific packagers.
//!
//! One packager per [`HostOs`]. [`PlatformPackager::select`] is an exhaustive
//! match, so adding a host without a packager fails to compile.
//!
//! - [`macos`] - zip archive of the signed `.app`
//! - [`windows`] - setup executable, MSI and NuGet packages
//! - [`linux`] - AppImage, Debian and Redhat packages

pub mod linux;
pub mod macos;
pub mod windows;

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::{DistributionInfo, HostOs, PackagingRequest},
};
use std::{
    fmt, io,
    path::{Path, PathBuf},
};

/// Kind of installer an artifact holds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArtifactKind {
    /// Zipped application bundle (macOS)
    Archive,
    /// Full NuGet update package (Windows)
    FullInstaller,
    /// Delta NuGet update package (Windows)
    DeltaInstaller,
    /// AppImage executable
    AppImage,
    /// Debian package
    Debian,
    /// Redhat package
    Redhat,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArtifactKind::Archive => "archive",
            ArtifactKind::FullInstaller => "full installer",
            ArtifactKind::DeltaInstaller => "delta installer",
            ArtifactKind::AppImage => "AppImage",
            ArtifactKind::Debian => "Debian package",
            ArtifactKind::Redhat => "Redhat package",
        })
    }
}

/// An installer file confirmed to exist on disk.
///
/// Only constructed through [`InstallerArtifact::confirm`], which checks the
/// file exists and is non-empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstallerArtifact {
    path: PathBuf,
    kind: ArtifactKind,
}

impl InstallerArtifact {
    /// Confirms `path` is a non-empty file and wraps it.
    ///
    /// # Errors
    ///
    /// [`Error::ArtifactMissing`] if nothing (or a directory) is at `path`,
    /// [`Error::EmptyArtifact`] if the file has no content.
    pub async fn confirm(path: PathBuf, kind: ArtifactKind) -> Result<Self> {
        verify_file(&path).await?;
        Ok(Self { path, kind })
    }

    /// Re-checks that the artifact still exists and is non-empty.
    pub async fn verify(&self) -> Result<()> {
        verify_file(&self.path).await
    }

    /// Path of the artifact.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Kind of the artifact.
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }
}

async fn verify_file(path: &Path) -> Result<()> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::ArtifactMissing(path.to_path_buf()));
        }
        Err(e) => return Err(e).fs_context("reading artifact metadata", path),
    };

    if !metadata.is_file() {
        return Err(Error::ArtifactMissing(path.to_path_buf()));
    }
    if metadata.len() == 0 {
        return Err(Error::EmptyArtifact(path.to_path_buf()));
    }
    Ok(())
}

/// Whether the orchestrator checksums a packager's artifacts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChecksumPolicy {
    /// Write sidecars and `checksums.txt`.
    Generate,
    /// Leave artifacts as produced.
    Skip,
}

/// Packaging strategy for one host platform.
#[allow(async_fn_in_trait)]
pub trait Packager {
    /// Host this packager serves.
    fn host(&self) -> HostOs;

    /// Checksum behaviour for the produced artifacts.
    fn checksum_policy(&self) -> ChecksumPolicy {
        ChecksumPolicy::Skip
    }

    /// Produces installers for `dist`, in a fixed order.
    async fn package(
        &self,
        dist: &DistributionInfo,
        request: &PackagingRequest,
    ) -> Result<Vec<InstallerArtifact>>;
}

/// The packager for a host, backed by the real external tools.
#[derive(Debug)]
pub enum PlatformPackager {
    /// macOS archive packager
    MacOs(macos::MacOsPackager),
    /// Windows installer packager
    Windows(windows::WindowsPackager),
    /// Linux multi-format packager
    Linux(linux::LinuxPackager),
}

impl PlatformPackager {
    /// Selects the packager for `host`. Exactly one per host.
    pub fn select(host: HostOs) -> Self {
        match host {
            HostOs::MacOs => PlatformPackager::MacOs(macos::MacOsPackager::default()),
            HostOs::Windows => PlatformPackager::Windows(windows::WindowsPackager::default()),
            HostOs::Linux => PlatformPackager::Linux(linux::LinuxPackager::default()),
        }
    }
}

impl Packager for PlatformPackager {
    fn host(&self) -> HostOs {
        match self {
            PlatformPackager::MacOs(p) => p.host(),
            PlatformPackager::Windows(p) => p.host(),
            PlatformPackager::Linux(p) => p.host(),
        }
    }

    fn checksum_policy(&self) -> ChecksumPolicy {
        match self {
            PlatformPackager::MacOs(p) => p.checksum_policy(),
            PlatformPackager::Windows(p) => p.checksum_policy(),
            PlatformPackager::Linux(p) => p.checksum_policy(),
        }
    }

    async fn package(
        &self,
        dist: &DistributionInfo,
        request: &PackagingRequest,
    ) -> Result<Vec<InstallerArtifact>> {
        match self {
            PlatformPackager::MacOs(p) => p.package(dist, request).await,
            PlatformPackager::Windows(p) => p.package(dist, request).await,
            PlatformPackager::Linux(p) => p.package(dist, request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_host_selects_its_own_packager() {
        for host in HostOs::ALL {
            let packager = PlatformPackager::select(host);
            assert_eq!(packager.host(), host);
        }
    }

    #[test]
    fn only_linux_generates_checksums() {
        assert_eq!(
            PlatformPackager::select(HostOs::Linux).checksum_policy(),
            ChecksumPolicy::Generate
        );
        assert_eq!(
            PlatformPackager::select(HostOs::MacOs).checksum_policy(),
            ChecksumPolicy::Skip
        );
        assert_eq!(
            PlatformPackager::select(HostOs::Windows).checksum_policy(),
            ChecksumPolicy::Skip
        );
    }

    #[tokio::test]
    async fn confirm_rejects_missing_empty_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.deb");
        std::fs::write(&empty, b"").unwrap();

        assert!(matches!(
            InstallerArtifact::confirm(dir.path().join("none.deb"), ArtifactKind::Debian).await,
            Err(Error::ArtifactMissing(_))
        ));
        assert!(matches!(
            InstallerArtifact::confirm(empty, ArtifactKind::Debian).await,
            Err(Error::EmptyArtifact(_))
        ));
        assert!(matches!(
            InstallerArtifact::confirm(dir.path().to_path_buf(), ArtifactKind::Archive).await,
            Err(Error::ArtifactMissing(_))
        ));
    }
}
