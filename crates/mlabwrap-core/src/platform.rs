//! Platform profiles
//!
//! Every OS-dependent decision made while locating MATLAB, running it and
//! planning the extension build lives on [`PlatformProfile`]. A profile is
//! selected once at startup and passed to each stage explicitly.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metadata::ArchitectureTag;

/// Supported host operating systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostOs {
    /// Linux
    Linux,
    /// macOS (Darwin)
    MacOS,
    /// Windows
    Windows,
}

impl HostOs {
    /// Detect the current operating system
    pub fn detect() -> Result<Self> {
        Self::from_name(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` style name to a supported OS
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "linux" => Ok(Self::Linux),
            "macos" => Ok(Self::MacOS),
            "windows" => Ok(Self::Windows),
            other => Err(Error::unsupported_platform(other)),
        }
    }
}

impl std::fmt::Display for HostOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linux => write!(f, "Linux"),
            Self::MacOS => write!(f, "macOS"),
            Self::Windows => write!(f, "Windows"),
        }
    }
}

/// How output of the MATLAB query run is collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStrategy {
    /// Read the child's standard output
    Stdout,
    /// Ask MATLAB to write a log file and read it once the process exits.
    /// Used where MATLAB opens its own console window and stdout is lost.
    LogFile,
}

/// Windows variables holding the program files roots, in search order
const WINDOWS_PROGRAM_FILES_VARS: &[&str] = &["ProgramFiles", "ProgramFiles(x86)"];

/// Per-OS behaviour for discovery, invocation and build planning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    os: HostOs,
}

impl PlatformProfile {
    /// Select the profile for the running host
    pub fn detect() -> Result<Self> {
        Ok(Self::for_os(HostOs::detect()?))
    }

    /// Profile for a specific OS
    pub fn for_os(os: HostOs) -> Self {
        Self { os }
    }

    /// The operating system this profile describes
    pub fn os(&self) -> HostOs {
        self.os
    }

    /// Whether this is the Windows profile
    pub fn is_windows(&self) -> bool {
        self.os == HostOs::Windows
    }

    /// Separator between entries of PATH-like variables
    pub fn path_list_separator(&self) -> char {
        match self.os {
            HostOs::Windows => ';',
            HostOs::Linux | HostOs::MacOS => ':',
        }
    }

    /// Split a PATH-like value into its non-empty entries, order preserved
    pub fn split_path_list<'a>(&self, value: &'a str) -> Vec<&'a str> {
        value
            .split(self.path_list_separator())
            .filter(|entry| !entry.is_empty())
            .collect()
    }

    /// Suffix appended to executable names
    pub fn binary_suffix(&self) -> &'static str {
        match self.os {
            HostOs::Windows => ".exe",
            HostOs::Linux | HostOs::MacOS => "",
        }
    }

    /// Executable file name for a binary base name
    pub fn binary_file_name(&self, name: &str) -> String {
        format!("{}{}", name, self.binary_suffix())
    }

    /// How query output is collected on this OS
    pub fn capture_strategy(&self) -> CaptureStrategy {
        match self.os {
            HostOs::Windows => CaptureStrategy::LogFile,
            HostOs::Linux | HostOs::MacOS => CaptureStrategy::Stdout,
        }
    }

    /// Default base directories to scan for installations, in priority order.
    ///
    /// `env` looks up environment variables; Windows entries whose variable
    /// is unset are skipped.
    pub fn base_search_paths<F>(&self, env: F) -> Vec<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        match self.os {
            HostOs::MacOS => vec![PathBuf::from("/Applications/")],
            HostOs::Linux => vec![
                PathBuf::from("/usr/lib/matlab/"),
                PathBuf::from("/usr/local/MATLAB/"),
                PathBuf::from("/usr/local/"),
            ],
            HostOs::Windows => {
                let roots: Vec<PathBuf> = WINDOWS_PROGRAM_FILES_VARS
                    .iter()
                    .filter_map(|var| match env(var) {
                        Some(value) if !value.is_empty() => Some(PathBuf::from(value)),
                        _ => {
                            tracing::debug!("{} is not set, skipping", var);
                            None
                        }
                    })
                    .collect();

                // Versioned MATLAB folders first, then the bare roots
                roots
                    .iter()
                    .map(|root| root.join("MATLAB"))
                    .chain(roots.iter().cloned())
                    .collect()
            }
        }
    }

    /// Name of the per-architecture subdirectory MATLAB uses for its
    /// libraries. Windows drops the `PC` vendor prefix (`PCWIN64` -> `win64`).
    pub fn arch_subdir(&self, arch: ArchitectureTag) -> String {
        let lower = arch.as_str().to_lowercase();
        match self.os {
            HostOs::Windows => lower.get(2..).unwrap_or_default().to_string(),
            HostOs::Linux | HostOs::MacOS => lower,
        }
    }
}

impl std::fmt::Display for PlatformProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.os)
    }
}
