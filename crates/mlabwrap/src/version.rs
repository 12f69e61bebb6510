//! Version information for the mlabwrap CLI

use serde::{Deserialize, Serialize};

/// Version information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Package version
    pub version: String,

    /// Host operating system
    pub os: String,

    /// Host CPU architecture
    pub arch: String,
}

impl VersionInfo {
    /// Version info for the running binary
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

impl std::fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mlabwrap {} ({}-{})", self.version, self.os, self.arch)
    }
}
