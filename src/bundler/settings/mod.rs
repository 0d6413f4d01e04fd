//! Configuration structures for packaging operations.
//!
//! [`DistributionInfo`] carries everything read from project configuration
//! and is resolved once per run. [`PackagingRequest`] carries what the
//! environment decides for this invocation: architecture, host OS, CI
//! context and signing credentials.

mod arch;
mod builder;
mod core;
mod linux;
mod macos;
mod package;
mod request;
mod windows;

// Re-export all public types
pub use arch::{HostOs, TargetArch};
pub use builder::DistributionInfoBuilder;
pub use core::{DistributionInfo, SPLASH_SCREEN_FILE_NAME};
pub use linux::LinuxSettings;
pub use macos::MacOsSettings;
pub use package::ProductSettings;
pub use request::{PackagingRequest, SigningCredentials};
pub use windows::WindowsSettings;
