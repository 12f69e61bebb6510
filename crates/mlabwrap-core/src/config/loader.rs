//! Configuration file loading and parsing

use crate::config::types::{
    BuildConfig, MlabwrapConfigFile, ProbeConfig, ProductConfig, SearchConfig,
};
use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Configuration file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["mlabwrap.yaml", "mlabwrap.yml"];

/// Loaded and validated mlabwrap configuration
#[derive(Debug, Clone, Default)]
pub struct MlabwrapConfig {
    /// The parsed configuration
    pub config: MlabwrapConfigFile,

    /// Path to the configuration file, if one was found
    pub config_path: Option<Utf8PathBuf>,
}

impl MlabwrapConfig {
    /// Load configuration from the specified path, or search for it starting
    /// in the current directory. No file found while searching yields the
    /// defaults; an explicit path that does not exist is an error.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        if let Some(p) = path {
            let content = fs::read_to_string(p).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::config_not_found(p.as_str())
                } else {
                    Error::Io(e)
                }
            })?;
            return Self::from_content(&content, Some(p.to_owned()));
        }

        let cwd = std::env::current_dir().map_err(Error::Io)?;
        let cwd = Utf8PathBuf::try_from(cwd)
            .map_err(|_| Error::invalid_config("Current directory path is not valid UTF-8"))?;
        Self::discover(&cwd)
    }

    /// Search `start` and its parents for a configuration file
    pub fn discover(start: &Utf8Path) -> Result<Self> {
        match Self::find_config(start)? {
            Some((path, content)) => {
                tracing::debug!("Using configuration file {}", path);
                Self::from_content(&content, Some(path))
            }
            None => {
                tracing::debug!("No mlabwrap.yaml found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn from_content(content: &str, config_path: Option<Utf8PathBuf>) -> Result<Self> {
        let config: MlabwrapConfigFile = if content.trim().is_empty() {
            MlabwrapConfigFile::default()
        } else {
            serde_yaml_ng::from_str(content)?
        };

        let loaded = Self {
            config,
            config_path,
        };
        loaded.validate()?;
        Ok(loaded)
    }

    fn find_config(start: &Utf8Path) -> Result<Option<(Utf8PathBuf, String)>> {
        let mut current = start;

        loop {
            for name in CONFIG_FILE_NAMES {
                let path = current.join(name);
                if path.is_file() {
                    let content = fs::read_to_string(&path)?;
                    return Ok(Some((path, content)));
                }
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => return Ok(None),
            }
        }
    }

    fn validate(&self) -> Result<()> {
        let product = &self.config.product;

        for (field, value) in [
            ("product.folder_name", &product.folder_name),
            ("product.binary_name", &product.binary_name),
            ("product.query_script", &product.query_script),
            ("build.python", &self.config.build.python),
        ] {
            if value.trim().is_empty() {
                return Err(Error::invalid_config(format!("{} must not be empty", field)));
            }
        }

        // MATLAB's -r takes a statement, so the script is referenced by bare name
        if !product
            .query_script
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(Error::invalid_config(format!(
                "product.query_script must be a bare MATLAB identifier, got '{}'",
                product.query_script
            )));
        }

        if self.config.build.sources.is_empty() {
            return Err(Error::invalid_config("build.sources must list at least one file"));
        }

        Ok(())
    }

    /// Get the inner configuration file
    pub fn inner(&self) -> &MlabwrapConfigFile {
        &self.config
    }

    /// Installation root override
    pub fn root(&self) -> Option<&Utf8Path> {
        self.config.root.as_deref()
    }

    /// Product naming
    pub fn product(&self) -> &ProductConfig {
        &self.config.product
    }

    /// Discovery settings
    pub fn search(&self) -> &SearchConfig {
        &self.config.search
    }

    /// Query invocation settings
    pub fn probe(&self) -> &ProbeConfig {
        &self.config.probe
    }

    /// Extension build settings
    pub fn build(&self) -> &BuildConfig {
        &self.config.build
    }
}
