use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("Unsupported platform '{0}'. Must be Windows, Linux, or macOS")]
pub struct UnsupportedPlatformError(pub String);

/// The three OS families an environment file can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
}

impl Platform {
    /// Probe the host OS. Anything outside the three supported families
    /// means no sensible environment file can be produced.
    pub fn detect() -> Result<Self, UnsupportedPlatformError> {
        if cfg!(target_os = "macos") {
            Ok(Platform::MacOs)
        } else if cfg!(target_os = "linux") {
            Ok(Platform::Linux)
        } else if cfg!(target_os = "windows") {
            Ok(Platform::Windows)
        } else {
            Err(UnsupportedPlatformError(std::env::consts::OS.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
            Platform::Windows => "windows",
        }
    }
}

impl FromStr for Platform {
    type Err = UnsupportedPlatformError;

    /// Accepts both the family names and the raw platform identifiers
    /// other detection mechanisms report (`darwin`, `linux2`, `win32`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "macos" | "darwin" => Ok(Platform::MacOs),
            s if s.starts_with("linux") => Ok(Platform::Linux),
            "windows" | "win32" => Ok(Platform::Windows),
            other => Err(UnsupportedPlatformError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_platform_names() {
        assert_eq!("macos".parse::<Platform>().unwrap(), Platform::MacOs);
        assert_eq!("darwin".parse::<Platform>().unwrap(), Platform::MacOs);
        assert_eq!("linux".parse::<Platform>().unwrap(), Platform::Linux);
        assert_eq!("linux2".parse::<Platform>().unwrap(), Platform::Linux);
        assert_eq!("windows".parse::<Platform>().unwrap(), Platform::Windows);
        assert_eq!("win32".parse::<Platform>().unwrap(), Platform::Windows);
    }

    #[test]
    fn test_unsupported_platform() {
        let err = "freebsd".parse::<Platform>().unwrap_err();
        assert!(err.to_string().contains("Unsupported platform 'freebsd'"));
    }

    #[test]
    fn test_detect_host() {
        // The test hosts are always one of the supported families.
        assert!(Platform::detect().is_ok());
    }
}
