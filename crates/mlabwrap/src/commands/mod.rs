//! Command implementations

pub mod info;
pub mod locate;
pub mod plan;
pub mod version;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use camino::{Utf8Path, Utf8PathBuf};
use mlabwrap_core::{MlabwrapConfig, PlatformProfile, ProductMetadata};
use mlabwrap_discovery::{
    FileSystemProber, HostFileSystem, InstallationLocator, MetadataResolver, ProcessInvoker,
    SystemInvoker,
};

use crate::output;

/// Where the installation root came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    CommandLine,
    ConfigFile,
    Discovered,
}

impl std::fmt::Display for RootSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommandLine => write!(f, "--matlab-root"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Discovered => write!(f, "discovery"),
        }
    }
}

/// Shared state for commands that touch a MATLAB installation
pub struct Context {
    pub config: MlabwrapConfig,
    pub profile: PlatformProfile,
    root_override: Option<Utf8PathBuf>,
    prober: HostFileSystem,
    invoker: SystemInvoker,
}

impl Context {
    /// Select the host profile and load configuration
    pub fn load(config_path: Option<&Utf8Path>, root_override: Option<Utf8PathBuf>) -> Result<Self> {
        let profile = PlatformProfile::detect()?;
        let config = MlabwrapConfig::load(config_path).context("Failed to load configuration")?;

        if let Some(path) = &config.config_path {
            tracing::debug!("Loaded configuration from {}", path);
        }

        Ok(Self {
            config,
            profile,
            root_override,
            prober: HostFileSystem::new(),
            invoker: SystemInvoker::new(),
        })
    }

    /// Installation root: `--matlab-root`/`MATLAB_ROOT`, then the config
    /// file's `root`, then discovery
    pub fn installation_root(&self) -> Result<(PathBuf, RootSource)> {
        let (root, source) = if let Some(root) = &self.root_override {
            (root.as_std_path().to_path_buf(), RootSource::CommandLine)
        } else if let Some(root) = self.config.root() {
            (root.as_std_path().to_path_buf(), RootSource::ConfigFile)
        } else {
            let root = self.locator().require()?;
            (root, RootSource::Discovered)
        };

        if source != RootSource::Discovered && !self.prober.is_dir(&root) {
            output::warning(&format!(
                "MATLAB root from {} is not a directory: {}",
                source,
                root.display()
            ));
        }

        tracing::debug!("Using MATLAB root {} (from {})", root.display(), source);
        Ok((root, source))
    }

    /// Locate the installation and query it
    pub fn resolve(&self) -> Result<(PathBuf, ProductMetadata)> {
        let (root, _) = self.installation_root()?;
        let metadata = self
            .resolver()
            .resolve(&root)
            .with_context(|| format!("Failed to query MATLAB at {}", root.display()))?;
        Ok((root, metadata))
    }

    /// Environment lookup used by the build planner
    pub fn env_var(&self, name: &str) -> Option<String> {
        self.prober.env_var(name)
    }

    /// Runs external programs (MATLAB, the Python interpreter)
    pub fn invoker(&self) -> &dyn ProcessInvoker {
        &self.invoker
    }

    fn locator(&self) -> InstallationLocator<'_> {
        let search = self.config.search();
        InstallationLocator::new(self.profile, &self.prober)
            .with_folder_name(self.config.product().folder_name.as_str())
            .with_extra_base_paths(search.extra_base_paths.iter().map(|p| p.as_std_path()))
            .with_search_path_scan(!search.skip_search_path)
    }

    fn resolver(&self) -> MetadataResolver<'_> {
        MetadataResolver::new(self.profile, &self.prober, &self.invoker)
            .with_product(self.config.product().clone())
            .with_log_file(
                self.config
                    .probe()
                    .log_file
                    .as_ref()
                    .map(|p| p.as_std_path().to_path_buf()),
            )
    }
}
