//! Target architecture and host platform types.

use crate::bundler::error::{Error, Result};

/// CPU architecture the installers are produced for.
///
/// Selected from the `TARGET_ARCH` environment variable. Anything that is not
/// `arm64` or `arm`, including an absent selector, means x64.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_package::bundler::TargetArch;
///
/// assert_eq!(TargetArch::from_selector(Some("arm64")), TargetArch::Arm64);
/// assert_eq!(TargetArch::from_selector(None).appimage_flag(), "--x64");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TargetArch {
    /// x86_64 / AMD64
    #[default]
    X64,
    /// AArch64 / ARM64
    Arm64,
    /// 32-bit ARM with hard float
    Arm,
}

impl TargetArch {
    /// Maps an architecture selector to a target. Total over all inputs.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some("arm64") => TargetArch::Arm64,
            Some("arm") => TargetArch::Arm,
            _ => TargetArch::X64,
        }
    }

    /// Token embedded in distributable file names (`x64`, `arm64`, `arm`).
    pub fn as_str(self) -> &'static str {
        match self {
            TargetArch::X64 => "x64",
            TargetArch::Arm64 => "arm64",
            TargetArch::Arm => "arm",
        }
    }

    /// Architecture flag understood by the AppImage builder.
    pub fn appimage_flag(self) -> &'static str {
        match self {
            TargetArch::X64 => "--x64",
            TargetArch::Arm64 => "--arm64",
            TargetArch::Arm => "--armv7l",
        }
    }

    /// Debian architecture name.
    pub fn debian_arch(self) -> &'static str {
        match self {
            TargetArch::X64 => "amd64",
            TargetArch::Arm64 => "arm64",
            TargetArch::Arm => "armhf",
        }
    }

    /// RPM architecture name.
    pub fn redhat_arch(self) -> &'static str {
        match self {
            TargetArch::X64 => "x86_64",
            TargetArch::Arm64 => "aarch64",
            TargetArch::Arm => "armv7hl",
        }
    }
}

impl std::fmt::Display for TargetArch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operating system family the packager runs on.
///
/// Exactly one platform packager exists per variant.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HostOs {
    /// macOS: zip archive of the `.app` bundle
    MacOs,
    /// Windows: setup executable, MSI and NuGet packages
    Windows,
    /// Linux: AppImage, Debian and Redhat packages
    Linux,
}

impl HostOs {
    /// Every supported host.
    pub const ALL: [HostOs; 3] = [HostOs::MacOs, HostOs::Windows, HostOs::Linux];

    /// Maps an OS name as reported by `std::env::consts::OS`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`] for any other name.
    pub fn from_os_name(name: &str) -> Result<Self> {
        match name {
            "macos" => Ok(HostOs::MacOs),
            "windows" => Ok(HostOs::Windows),
            "linux" => Ok(HostOs::Linux),
            other => Err(Error::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Host the process is running on.
    pub fn current() -> Result<Self> {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Display name used in progress messages.
    pub fn display_name(self) -> &'static str {
        match self {
            HostOs::MacOs => "macOS",
            HostOs::Windows => "Windows",
            HostOs::Linux => "Linux",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_mapping_is_total() {
        assert_eq!(TargetArch::from_selector(Some("arm64")).appimage_flag(), "--arm64");
        assert_eq!(TargetArch::from_selector(Some("arm")).appimage_flag(), "--armv7l");
        assert_eq!(TargetArch::from_selector(Some("x64")).appimage_flag(), "--x64");
        assert_eq!(TargetArch::from_selector(Some("ia32")).appimage_flag(), "--x64");
        assert_eq!(TargetArch::from_selector(Some("")).appimage_flag(), "--x64");
        assert_eq!(TargetArch::from_selector(None).appimage_flag(), "--x64");
    }

    #[test]
    fn package_arch_names() {
        assert_eq!(TargetArch::Arm64.debian_arch(), "arm64");
        assert_eq!(TargetArch::Arm.redhat_arch(), "armv7hl");
        assert_eq!(TargetArch::X64.to_string(), "x64");
    }

    #[test]
    fn host_names() {
        assert_eq!(HostOs::from_os_name("macos").unwrap(), HostOs::MacOs);
        assert_eq!(HostOs::from_os_name("windows").unwrap(), HostOs::Windows);
        assert_eq!(HostOs::from_os_name("linux").unwrap(), HostOs::Linux);

        let err = HostOs::from_os_name("freebsd").unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "I don't know how to package for freebsd");
    }
}
