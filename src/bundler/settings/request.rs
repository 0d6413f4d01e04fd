//! Per-invocation packaging request derived from the environment.

use super::{HostOs, TargetArch};
use std::{fmt, path::PathBuf};

/// Code-signing credentials passed through to the installer builder.
#[derive(Clone)]
pub struct SigningCredentials {
    /// Certificate (PKCS#12) path.
    pub certificate: PathBuf,
    /// Certificate passphrase.
    pub password: String,
}

impl fmt::Debug for SigningCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningCredentials")
            .field("certificate", &self.certificate)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What to package on this invocation.
///
/// Built from the `TARGET_ARCH`, `GITHUB_ACTIONS` and `WINDOWS_CERT_PASSWORD`
/// environment variables by the CLI.
#[derive(Clone, Debug)]
pub struct PackagingRequest {
    /// Architecture installers are produced for.
    pub target_arch: TargetArch,
    /// Host platform, decides which packager runs.
    pub host_os: HostOs,
    /// Running inside an automated build environment.
    pub ci: bool,
    /// Signing credentials, if a passphrase was supplied.
    pub signing: Option<SigningCredentials>,
    /// Overrides the configured update feed URL.
    pub updates_url: Option<String>,
}

impl PackagingRequest {
    /// Request for `host_os` with no signing and no overrides.
    pub fn new(host_os: HostOs, target_arch: TargetArch) -> Self {
        Self {
            target_arch,
            host_os,
            ci: false,
            signing: None,
            updates_url: None,
        }
    }
}
