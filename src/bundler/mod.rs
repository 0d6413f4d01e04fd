//! Installer packaging for pre-built application bundles.
//!
//! The host's [`Packager`] turns the bundle into installers with external
//! tools; the [`Orchestrator`] sequences it with checksum generation and the
//! bundle size report.
//!
//! - [`settings`] - distribution metadata and the per-run request
//! - [`platform`] - macOS, Windows and Linux packagers
//! - [`builder`] - orchestration, checksums, artifact location
//! - [`utils`] - filesystem helpers and external tool invocation

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

pub use builder::{Orchestrator, RunOutcome, RunSummary};
pub use error::{Error, ErrorCategory, Result};
pub use platform::{ArtifactKind, ChecksumPolicy, InstallerArtifact, Packager, PlatformPackager};
pub use settings::{
    DistributionInfo, DistributionInfoBuilder, HostOs, LinuxSettings, MacOsSettings,
    PackagingRequest, ProductSettings, SigningCredentials, TargetArch, WindowsSettings,
};
