//! Filesystem and environment probing
//!
//! Discovery only ever looks at the host through [`FileSystemProber`], which
//! keeps the locator and resolver testable against a simulated filesystem.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

/// Read-only view of the host used during discovery
pub trait FileSystemProber {
    /// Whether anything exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Directories matching a glob `pattern`
    fn glob_dirs(&self, pattern: &str, case_sensitive: bool) -> Vec<PathBuf>;

    /// Look up an environment variable
    fn env_var(&self, name: &str) -> Option<String>;
}

/// Build a glob pattern for entries named `leaf` directly inside `base`.
/// Glob metacharacters in `base` are escaped so only `leaf` is a pattern.
pub fn child_pattern(base: &Path, leaf: &str) -> String {
    let escaped = Pattern::escape(&base.to_string_lossy());
    PathBuf::from(escaped).join(leaf).to_string_lossy().into_owned()
}

/// Match options shared by every glob issued during discovery
pub fn match_options(case_sensitive: bool) -> MatchOptions {
    MatchOptions {
        case_sensitive,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    }
}

/// The real host filesystem and process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFileSystem;

impl HostFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystemProber for HostFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn glob_dirs(&self, pattern: &str, case_sensitive: bool) -> Vec<PathBuf> {
        let paths = match glob::glob_with(pattern, match_options(case_sensitive)) {
            Ok(paths) => paths,
            Err(e) => {
                tracing::warn!("Invalid glob pattern {}: {}", pattern, e);
                return Vec::new();
            }
        };

        paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::debug!("Skipping unreadable glob entry: {}", e);
                    None
                }
            })
            .filter(|path| path.is_dir())
            .collect()
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}
