//! Configuration file types (mlabwrap.yaml)

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MlabwrapConfigFile {
    /// Installation root; skips discovery when set
    pub root: Option<Utf8PathBuf>,

    /// What the product looks like on disk
    pub product: ProductConfig,

    /// Discovery settings
    pub search: SearchConfig,

    /// Query invocation settings
    pub probe: ProbeConfig,

    /// Extension build settings
    pub build: BuildConfig,
}

/// Names used to recognise and run the product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductConfig {
    /// Folder name matched (case-insensitively) in PATH entries and
    /// installation directories
    pub folder_name: String,

    /// Executable name inside `<root>/bin`
    pub binary_name: String,

    /// Name of the query script passed to `-r`
    pub query_script: String,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            folder_name: "MATLAB".to_string(),
            binary_name: "matlab".to_string(),
            query_script: "get_version".to_string(),
        }
    }
}

/// Installation search settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Base directories scanned before the platform defaults
    pub extra_base_paths: Vec<Utf8PathBuf>,

    /// Skip the PATH scan and go straight to the base directories
    pub skip_search_path: bool,
}

/// Query invocation settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeConfig {
    /// Fixed log file for log-file capture. Defaults to a file in the
    /// per-run temporary directory.
    pub log_file: Option<Utf8PathBuf>,
}

/// Extension build settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Extension source files
    pub sources: Vec<String>,

    /// Include directories appended after MATLAB's own
    pub extra_include_dirs: Vec<Utf8PathBuf>,

    /// Python interpreter asked for the NumPy include directory
    pub python: String,

    /// NumPy include directory; skips asking the interpreter when set
    pub numpy_include_dir: Option<Utf8PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            sources: vec!["mlabraw.cpp".to_string()],
            extra_include_dirs: Vec::new(),
            python: "python".to_string(),
            numpy_include_dir: None,
        }
    }
}
