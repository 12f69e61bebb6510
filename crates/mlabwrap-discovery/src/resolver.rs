//! MATLAB metadata resolution
//!
//! Runs the MATLAB binary under an installation root with the embedded query
//! script and decodes version, release label and architecture from the tail
//! of its output. Startup banners differ between releases, so only the last
//! two non-blank lines are read:
//!
//! ```text
//! < M A T L A B (R) >                  <- banner, ignored
//! 8.1.0.604 (R2013a)                   <- version line
//! GLNXA64                              <- architecture line
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use mlabwrap_core::config::ProductConfig;
use mlabwrap_core::{
    ArchitectureTag, CaptureStrategy, Error, PlatformProfile, ProductMetadata, ProductVersion,
    Result,
};

use crate::fs::FileSystemProber;
use crate::process::{Invocation, ProcessInvoker};
use crate::query::QueryWorkspace;

/// Arguments that run the query script without the desktop or splash screen
const BASE_ARGS: &[&str] = &["-nosplash", "-nodesktop"];

/// Resolves product metadata for an installation root
pub struct MetadataResolver<'a> {
    profile: PlatformProfile,
    prober: &'a dyn FileSystemProber,
    invoker: &'a dyn ProcessInvoker,
    product: ProductConfig,
    log_file: Option<PathBuf>,
}

impl<'a> MetadataResolver<'a> {
    /// Create a resolver with the default product naming
    pub fn new(
        profile: PlatformProfile,
        prober: &'a dyn FileSystemProber,
        invoker: &'a dyn ProcessInvoker,
    ) -> Self {
        Self {
            profile,
            prober,
            invoker,
            product: ProductConfig::default(),
            log_file: None,
        }
    }

    /// Use custom product naming
    pub fn with_product(mut self, product: ProductConfig) -> Self {
        self.product = product;
        self
    }

    /// Use a fixed log file for log-file capture instead of a per-run one
    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        self.log_file = log_file;
        self
    }

    /// Expected location of the MATLAB binary under `root`
    pub fn binary_path(&self, root: &Path) -> PathBuf {
        root.join("bin")
            .join(self.profile.binary_file_name(&self.product.binary_name))
    }

    /// Run MATLAB under `root` and decode its metadata
    pub fn resolve(&self, root: &Path) -> Result<ProductMetadata> {
        let binary = self.binary_path(root);
        if !self.prober.exists(&binary) {
            return Err(Error::binary_not_found(binary));
        }

        tracing::info!("Querying MATLAB at {}", binary.display());
        let output = self.run_query(&binary)?;
        let metadata = parse_query_output(&output)?;

        tracing::info!("Resolved {}", metadata);
        Ok(metadata)
    }

    fn run_query(&self, binary: &Path) -> Result<String> {
        let workspace = QueryWorkspace::create(&self.product.query_script)?;

        let invocation = Invocation::new(binary)
            .args(["-r", self.product.query_script.as_str()])
            .args(BASE_ARGS.iter().copied())
            .current_dir(workspace.path());

        match self.profile.capture_strategy() {
            CaptureStrategy::Stdout => self.invoker.output(&invocation),
            CaptureStrategy::LogFile => {
                let log_file = self
                    .log_file
                    .clone()
                    .unwrap_or_else(|| workspace.log_file());
                remove_stale_log(&log_file)?;

                let invocation = invocation
                    .args(["-wait", "-logfile"])
                    .arg(log_file.to_string_lossy());
                self.invoker.wait(&invocation)?;

                read_log(&log_file)
            }
        }
    }
}

fn remove_stale_log(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("Removed stale log file {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Io(e)),
    }
}

fn read_log(path: &Path) -> Result<String> {
    match fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::MissingLogFile {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(Error::Io(e)),
    }
}

/// Decode captured query output into product metadata.
///
/// The last non-blank line must contain an architecture code and the line
/// before it must read `<version> (<release>)`. Every failure carries the
/// raw output.
pub fn parse_query_output(output: &str) -> Result<ProductMetadata> {
    let mut lines: Vec<&str> = output.lines().collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    let (version_line, arch_line) = match lines.as_slice() {
        [.., version, arch] => (*version, *arch),
        _ => {
            return Err(Error::parse(
                "expected a version line followed by an architecture line",
                output,
            ))
        }
    };

    let arch = ArchitectureTag::scan(arch_line).ok_or_else(|| {
        Error::parse(
            format!("no recognised architecture code in '{}'", arch_line.trim()),
            output,
        )
    })?;

    let mut tokens = version_line.split_whitespace();

    let version_token = tokens
        .next()
        .ok_or_else(|| Error::parse("version line is empty", output))?;
    let version = ProductVersion::parse(version_token).map_err(|_| {
        Error::parse(format!("invalid version '{}'", version_token), output)
    })?;

    let release_token = tokens.next().ok_or_else(|| {
        Error::parse(
            format!("no release label after version '{}'", version_token),
            output,
        )
    })?;
    let release = strip_delimiters(release_token).ok_or_else(|| {
        Error::parse(format!("invalid release label '{}'", release_token), output)
    })?;

    Ok(ProductMetadata::new(version, release, arch))
}

/// `(R2013a)` -> `R2013a`. Tokens too short to hold a label are rejected.
fn strip_delimiters(token: &str) -> Option<&str> {
    let mut chars = token.char_indices();
    let (_, first) = chars.next()?;
    let (last_index, _) = chars.next_back()?;
    let inner = &token[first.len_utf8()..last_index];
    (!inner.is_empty()).then_some(inner)
}
