//! Release packager library for pre-built application bundles
//!
//! This library turns a pre-built, platform-native application bundle into
//! distributable installers for the host OS:
//! - macOS: zipped `.app` bundle
//! - Windows: Squirrel setup executable, MSI and NuGet packages
//! - Linux: AppImage, Debian and Redhat packages with SHA-256 checksums
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};
