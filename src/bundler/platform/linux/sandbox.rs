//! Chromium sandbox helper permissions.

use crate::bundler::error::{ErrorExt, Result};
use std::path::Path;

/// Name of the setuid sandbox helper shipped inside the bundle.
pub const SANDBOX_HELPER: &str = "chrome-sandbox";

/// Mode the helper needs: setuid root, world executable.
pub const SANDBOX_HELPER_MODE: u32 = 0o4755;

/// Sets [`SANDBOX_HELPER_MODE`] on the bundle's sandbox helper.
///
/// A bundle without the helper is left alone.
pub async fn prepare_sandbox_helper(bundle: &Path) -> Result<()> {
    let helper = bundle.join(SANDBOX_HELPER);
    let present = tokio::fs::try_exists(&helper)
        .await
        .fs_context("checking sandbox helper", &helper)?;
    if !present {
        log::debug!("No sandbox helper at {}", helper.display());
        return Ok(());
    }

    set_mode(&helper).await?;
    log::info!("Updated permissions on {}", helper.display());
    Ok(())
}

#[cfg(unix)]
async fn set_mode(helper: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    tokio::fs::set_permissions(helper, std::fs::Permissions::from_mode(SANDBOX_HELPER_MODE))
        .await
        .fs_context("setting sandbox helper permissions", helper)
}

#[cfg(not(unix))]
async fn set_mode(helper: &Path) -> Result<()> {
    log::warn!(
        "Cannot set permissions on {} on this platform",
        helper.display()
    );
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[tokio::test]
    async fn helper_gets_setuid_mode() {
        let dir = tempfile::tempdir().unwrap();
        let helper = dir.path().join(SANDBOX_HELPER);
        std::fs::write(&helper, "elf").unwrap();

        prepare_sandbox_helper(dir.path()).await.unwrap();

        let mode = std::fs::metadata(&helper).unwrap().permissions().mode();
        assert_eq!(mode & 0o7777, SANDBOX_HELPER_MODE);
    }

    #[tokio::test]
    async fn missing_helper_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        prepare_sandbox_helper(dir.path()).await.unwrap();
    }

    #[tokio::test]
    async fn unreadable_helper_location_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("bundle");
        std::fs::write(&not_a_dir, "file").unwrap();

        let err = prepare_sandbox_helper(&not_a_dir).await.unwrap_err();
        match err {
            crate::bundler::Error::Fs { path, .. } => {
                assert_eq!(path, not_a_dir.join(SANDBOX_HELPER));
            }
            other => panic!("expected Fs error, got {other:?}"),
        }
    }
}
