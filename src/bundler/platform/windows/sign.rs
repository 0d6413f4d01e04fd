//! Authenticode signing parameters.
//!
//! Key material is never handled here; the certificate path and passphrase
//! are passed through to the installer builder's signtool invocation.

use crate::bundler::{
    error::{Error, Result},
    settings::{DistributionInfo, PackagingRequest},
};
use serde::{Serialize, Serializer};
use std::{fmt, path::PathBuf};

/// Timestamp authority used for every signature.
pub const TIMESTAMP_URL: &str = "http://timestamp.digicert.com";

/// Digest algorithm for both file and timestamp digests.
pub const DIGEST_ALGORITHM: &str = "sha256";

/// signtool parameters for the installer builder.
#[derive(Clone)]
pub struct SigningParams {
    certificate: PathBuf,
    password: String,
}

impl SigningParams {
    /// Parameters for `certificate` unlocked with `password`.
    pub fn new(certificate: PathBuf, password: String) -> Self {
        Self {
            certificate,
            password,
        }
    }

    /// Renders the signtool argument string.
    pub fn to_sign_with_params(&self) -> String {
        format!(
            "/f {} /p {} /tr {} /td {} /fd {}",
            self.certificate.display(),
            self.password,
            TIMESTAMP_URL,
            DIGEST_ALGORITHM,
            DIGEST_ALGORITHM
        )
    }
}

impl fmt::Debug for SigningParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningParams")
            .field("certificate", &self.certificate)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Serialize for SigningParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_sign_with_params())
    }
}

/// Returns signing parameters when this build should be signed.
///
/// Signing happens only for publishable builds running in CI.
///
/// # Errors
///
/// Configuration errors if signing is required but no passphrase was
/// supplied or the certificate file is absent.
pub fn signing_params(
    dist: &DistributionInfo,
    request: &PackagingRequest,
) -> Result<Option<SigningParams>> {
    if !(request.ci && dist.is_publishable()) {
        return Ok(None);
    }

    let credentials = request.signing.as_ref().ok_or_else(|| {
        Error::Configuration(
            "WINDOWS_CERT_PASSWORD must be set to sign publishable builds".into(),
        )
    })?;

    if !credentials.certificate.is_file() {
        return Err(Error::MissingResource {
            kind: "signing certificate".into(),
            path: credentials.certificate.clone(),
        });
    }

    Ok(Some(SigningParams::new(
        credentials.certificate.clone(),
        credentials.password.clone(),
    )))
}
