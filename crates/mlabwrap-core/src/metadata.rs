//! Product metadata reported by a MATLAB installation

use serde::{Deserialize, Serialize};

use crate::version::ProductVersion;

/// Architecture code as reported by MATLAB's `computer` function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArchitectureTag {
    /// 32-bit Linux
    Glnx86,
    /// Linux on Itanium
    Glnxi64,
    /// 64-bit Linux
    Glnxa64,
    /// 32-bit Windows
    Pcwin,
    /// 64-bit Windows
    Pcwin64,
    /// PowerPC macOS
    Mac,
    /// 32-bit Intel macOS
    Maci,
    /// 64-bit Intel macOS
    Maci64,
}

impl ArchitectureTag {
    /// Every recognised code, in scan order. Codes that contain a shorter code
    /// as a prefix are listed before it so a substring scan cannot stop early.
    pub const SCAN_ORDER: [ArchitectureTag; 8] = [
        Self::Glnxa64,
        Self::Glnxi64,
        Self::Glnx86,
        Self::Pcwin64,
        Self::Pcwin,
        Self::Maci64,
        Self::Maci,
        Self::Mac,
    ];

    /// The code exactly as MATLAB prints it
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Glnx86 => "GLNX86",
            Self::Glnxi64 => "GLNXI64",
            Self::Glnxa64 => "GLNXA64",
            Self::Pcwin => "PCWIN",
            Self::Pcwin64 => "PCWIN64",
            Self::Mac => "MAC",
            Self::Maci => "MACI",
            Self::Maci64 => "MACI64",
        }
    }

    /// Find the first recognised code occurring anywhere in `line`
    pub fn scan(line: &str) -> Option<Self> {
        Self::SCAN_ORDER
            .into_iter()
            .find(|tag| line.contains(tag.as_str()))
    }
}

impl std::fmt::Display for ArchitectureTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fully resolved metadata for one MATLAB installation.
///
/// Only constructed once every field has been parsed; there is no partial form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMetadata {
    /// Numeric version, e.g. 8.1.0.604
    pub version: ProductVersion,
    /// Release label, e.g. R2013a
    pub release: String,
    /// Architecture code
    pub arch: ArchitectureTag,
}

impl ProductMetadata {
    pub fn new(version: ProductVersion, release: impl Into<String>, arch: ArchitectureTag) -> Self {
        Self {
            version,
            release: release.into(),
            arch,
        }
    }
}

impl std::fmt::Display for ProductMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MATLAB {} ({}) {}", self.version, self.release, self.arch)
    }
}
