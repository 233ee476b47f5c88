use std::fmt;

use thiserror::Error;

/// Host operating systems Ballast knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// macOS with a `docker-machine` VM
    Mac,
    /// Linux with a native docker engine
    Linux,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported operating system '{0}'")]
pub struct UnsupportedPlatform(pub String);

impl Platform {
    /// Map an OS identifier (`std::env::consts::OS` or `uname -s`).
    pub fn detect(os: &str) -> Result<Self, UnsupportedPlatform> {
        match os.trim().to_ascii_lowercase().as_str() {
            "macos" | "darwin" => Ok(Platform::Mac),
            "linux" => Ok(Platform::Linux),
            _ => Err(UnsupportedPlatform(os.to_string())),
        }
    }

    pub fn current() -> Result<Self, UnsupportedPlatform> {
        Self::detect(std::env::consts::OS)
    }

    /// Prefix of the ahoy command file shipped for this platform.
    pub fn ahoy_name(self) -> &'static str {
        match self {
            Platform::Mac => "mac",
            Platform::Linux => "linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Mac => write!(f, "Mac"),
            Platform::Linux => write!(f, "Linux"),
        }
    }
}
