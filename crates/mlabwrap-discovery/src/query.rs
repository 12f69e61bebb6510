//! Embedded MATLAB query script
//!
//! MATLAB resolves `-r <name>` against its working directory, so each run
//! materialises the script into its own temporary directory and starts
//! MATLAB there. The directory (and any log file written into it) is removed
//! when the workspace is dropped.

use std::fs;
use std::path::{Path, PathBuf};

use mlabwrap_core::Result;
use tempfile::TempDir;

/// Prints the version line followed by the architecture line, then quits.
/// `version` yields e.g. `8.1.0.604 (R2013a)` and `computer` e.g. `GLNXA64`.
pub const QUERY_SCRIPT_SOURCE: &str = "\
fprintf('%s\\n', version);
fprintf('%s\\n', computer);
exit;
";

/// Default log file name for log-file capture
const LOG_FILE_NAME: &str = "out.txt";

/// Per-run scratch directory holding the query script
#[derive(Debug)]
pub struct QueryWorkspace {
    dir: TempDir,
    script_path: PathBuf,
}

impl QueryWorkspace {
    /// Create a fresh directory containing `<script_name>.m`
    pub fn create(script_name: &str) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("mlabwrap-").tempdir()?;
        let script_path = dir.path().join(format!("{}.m", script_name));
        fs::write(&script_path, QUERY_SCRIPT_SOURCE)?;

        tracing::debug!("Wrote query script to {}", script_path.display());
        Ok(Self { dir, script_path })
    }

    /// Directory MATLAB should run in
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Location of the materialised script
    pub fn script_path(&self) -> &Path {
        &self.script_path
    }

    /// Default log file location for this run
    pub fn log_file(&self) -> PathBuf {
        self.dir.path().join(LOG_FILE_NAME)
    }
}
