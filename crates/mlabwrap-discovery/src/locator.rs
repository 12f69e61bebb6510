//! MATLAB installation discovery
//!
//! The locator tries, in order:
//!
//! 1. **PATH** - entries mentioning the product folder name. The entry for
//!    `<root>/bin` is turned back into `<root>` by stripping `bin` segments.
//! 2. **Base directories** - the profile's default install locations. Flat
//!    installs (`/Applications/MATLAB_R2013a.app`) are found with a
//!    case-insensitive `matlab*` glob; a base that is itself a MATLAB folder
//!    (`/usr/lib/matlab/`, `/usr/local/MATLAB/`) has every subdirectory
//!    considered a release.
//!
//! Within a base directory the candidates are ranked reverse
//! lexicographically, which picks `R2013b` over `R2013a` but also `R9` over
//! `R10`. This is a naming heuristic, not a version comparison.

use std::path::{Path, PathBuf};

use mlabwrap_core::{Error, PlatformProfile, Result};

use crate::fs::{child_pattern, FileSystemProber};

/// Marker identifying binary directories in PATH entries
const BIN_MARKER: &str = "bin";

/// Outcome of a discovery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A directory believed to be an installation root. It has not been
    /// checked for a working binary yet.
    Found(PathBuf),
    /// Nothing looked like an installation
    NotFound,
}

impl Location {
    /// The candidate root, if one was found
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(path) => Some(path),
            Self::NotFound => None,
        }
    }

    /// Convert into an optional path
    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            Self::Found(path) => Some(path),
            Self::NotFound => None,
        }
    }
}

/// Finds a candidate MATLAB installation root
pub struct InstallationLocator<'a> {
    profile: PlatformProfile,
    prober: &'a dyn FileSystemProber,
    folder_name: String,
    extra_base_paths: Vec<PathBuf>,
    scan_search_path: bool,
}

impl<'a> InstallationLocator<'a> {
    /// Create a locator looking for the default `MATLAB` folder name
    pub fn new(profile: PlatformProfile, prober: &'a dyn FileSystemProber) -> Self {
        Self {
            profile,
            prober,
            folder_name: "MATLAB".to_string(),
            extra_base_paths: Vec::new(),
            scan_search_path: true,
        }
    }

    /// Look for a different product folder name
    pub fn with_folder_name(mut self, folder_name: impl Into<String>) -> Self {
        self.folder_name = folder_name.into();
        self
    }

    /// Scan these base directories before the platform defaults
    pub fn with_extra_base_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.extra_base_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable the PATH phase
    pub fn with_search_path_scan(mut self, enabled: bool) -> Self {
        self.scan_search_path = enabled;
        self
    }

    /// Find a candidate installation root
    pub fn locate(&self) -> Location {
        if self.scan_search_path {
            let matches = self.search_path_matches();
            if !matches.is_empty() {
                tracing::debug!("PATH entries mentioning {}: {:?}", self.folder_name, matches);
                if let Some(root) = self.root_from_search_path(&matches) {
                    tracing::info!("Found MATLAB root from PATH: {}", root.display());
                    return Location::Found(root);
                }
            }
        }

        match self.scan_base_paths() {
            Some(root) => {
                tracing::info!("Found MATLAB root: {}", root.display());
                Location::Found(root)
            }
            None => Location::NotFound,
        }
    }

    /// Like [`locate`](Self::locate), but absence is an
    /// [`Error::InstallationNotFound`]
    pub fn require(&self) -> Result<PathBuf> {
        self.locate().into_path().ok_or_else(|| {
            let searched: Vec<String> = self
                .base_paths()
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            Error::installation_not_found(searched)
        })
    }

    /// PATH entries whose lower-cased text contains the lower-cased folder
    /// name, in PATH order
    pub fn search_path_matches(&self) -> Vec<String> {
        let Some(path_var) = self.prober.env_var("PATH") else {
            tracing::debug!("PATH is not set");
            return Vec::new();
        };

        filter_search_path(
            &self.profile.split_path_list(&path_var),
            &self.folder_name,
        )
    }

    /// Derive the root from PATH matches. Failure is logged and reported as
    /// `None` so discovery can continue with the base directories.
    pub fn root_from_search_path(&self, matches: &[String]) -> Option<PathBuf> {
        let Some(bin_dir) = matches
            .iter()
            .map(Path::new)
            .find(|path| last_segment_is_bin(path))
        else {
            tracing::warn!(
                "Failed to parse PATH variable containing {}: no bin directory among {:?}",
                self.folder_name,
                matches
            );
            return None;
        };

        let root = strip_bin_segments(bin_dir);
        if root.is_none() {
            tracing::warn!(
                "Failed to parse PATH variable containing {}: {} has no parent outside bin",
                self.folder_name,
                bin_dir.display()
            );
        }
        root
    }

    /// Base directories in scan order: configured extras, then the
    /// platform defaults
    pub fn base_paths(&self) -> Vec<PathBuf> {
        let defaults = self
            .profile
            .base_search_paths(|name| self.prober.env_var(name));
        self.extra_base_paths
            .iter()
            .cloned()
            .chain(defaults)
            .collect()
    }

    /// Scan base directories, returning the preferred candidate of the first
    /// base that has any
    pub fn scan_base_paths(&self) -> Option<PathBuf> {
        self.base_paths()
            .iter()
            .find_map(|base| pick_newest(self.candidates_in(base)))
    }

    fn candidates_in(&self, base: &Path) -> Vec<PathBuf> {
        let folder = self.folder_name.to_lowercase();
        let is_product_dir = base
            .file_name()
            .is_some_and(|name| name.to_string_lossy().to_lowercase().contains(&folder));

        let candidates = if is_product_dir {
            self.prober.glob_dirs(&child_pattern(base, "*"), true)
        } else {
            self.prober
                .glob_dirs(&child_pattern(base, &format!("{}*", folder)), false)
        };

        tracing::debug!(
            "{} candidate(s) under {}",
            candidates.len(),
            base.display()
        );
        candidates
    }
}

/// Keep entries containing `folder_name`, ignoring case, preserving order
pub fn filter_search_path<S: AsRef<str>>(entries: &[S], folder_name: &str) -> Vec<String> {
    let needle = folder_name.to_lowercase();
    entries
        .iter()
        .map(AsRef::as_ref)
        .filter(|entry| entry.to_lowercase().contains(&needle))
        .map(str::to_string)
        .collect()
}

fn is_bin_segment(segment: &std::ffi::OsStr) -> bool {
    segment.to_string_lossy().to_lowercase().contains(BIN_MARKER)
}

fn last_segment_is_bin(path: &Path) -> bool {
    path.file_name().is_some_and(is_bin_segment)
}

/// Strip trailing `bin`-like segments: `/opt/MATLAB/R2013a/bin` becomes
/// `/opt/MATLAB/R2013a`. `None` when nothing but `bin` segments remain.
pub fn strip_bin_segments(path: &Path) -> Option<PathBuf> {
    let mut current = path;
    loop {
        match current.file_name() {
            Some(name) if is_bin_segment(name) => current = current.parent()?,
            Some(_) => return Some(current.to_path_buf()),
            None => return None,
        }
    }
}

/// Pick the reverse-lexicographically greatest candidate
pub fn pick_newest(mut candidates: Vec<PathBuf>) -> Option<PathBuf> {
    candidates.sort_by(|a, b| b.as_os_str().cmp(a.as_os_str()));
    candidates.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_search_path_case_insensitive() {
        let entries = [
            "/usr/bin",
            "/opt/MATLAB/R2013a/bin",
            "/home/user/matlab-tools",
            "/usr/local/sbin",
            "/Applications/Matlab_R2012b.app/bin",
        ];
        assert_eq!(
            filter_search_path(&entries, "MATLAB"),
            vec![
                "/opt/MATLAB/R2013a/bin",
                "/home/user/matlab-tools",
                "/Applications/Matlab_R2012b.app/bin",
            ]
        );
    }

    #[test]
    fn test_filter_search_path_no_matches() {
        let entries = ["/usr/bin", "/bin"];
        assert!(filter_search_path(&entries, "MATLAB").is_empty());
    }

    #[test]
    fn test_strip_bin_segments() {
        assert_eq!(
            strip_bin_segments(Path::new("/usr/local/MATLAB/R2013a/bin")),
            Some(PathBuf::from("/usr/local/MATLAB/R2013a"))
        );
        assert_eq!(
            strip_bin_segments(Path::new("/opt/MATLAB/R2013a/bin/")),
            Some(PathBuf::from("/opt/MATLAB/R2013a"))
        );
        assert_eq!(
            strip_bin_segments(Path::new("/opt/MATLAB/R2013a/BIN/bin")),
            Some(PathBuf::from("/opt/MATLAB/R2013a"))
        );
    }

    #[test]
    fn test_strip_bin_segments_never_terminates() {
        assert_eq!(strip_bin_segments(Path::new("/bin")), None);
        assert_eq!(strip_bin_segments(Path::new("bin/bin")), None);
    }

    #[test]
    fn test_pick_newest_is_lexicographic() {
        let picked = pick_newest(vec![
            PathBuf::from("/usr/local/MATLAB/R2012b"),
            PathBuf::from("/usr/local/MATLAB/R2013a"),
            PathBuf::from("/usr/local/MATLAB/R2009a"),
        ]);
        assert_eq!(picked, Some(PathBuf::from("/usr/local/MATLAB/R2013a")));
    }

    #[test]
    fn test_pick_newest_is_not_numeric() {
        // "matlab9" sorts after "matlab10" even though 10 is newer
        let picked = pick_newest(vec![
            PathBuf::from("/opt/matlab10"),
            PathBuf::from("/opt/matlab9"),
        ]);
        assert_eq!(picked, Some(PathBuf::from("/opt/matlab9")));
    }

    #[test]
    fn test_pick_newest_empty() {
        assert_eq!(pick_newest(Vec::new()), None);
    }

    #[test]
    fn test_location_accessors() {
        let found = Location::Found(PathBuf::from("/opt/MATLAB/R2013a"));
        assert_eq!(found.path(), Some(Path::new("/opt/MATLAB/R2013a")));
        assert_eq!(Location::NotFound.into_path(), None);
    }
}
