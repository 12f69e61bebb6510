//! Error types for mlabwrap-core

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using mlabwrap-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while locating, probing and planning a MATLAB build
#[derive(Error, Debug)]
pub enum Error {
    /// Host operating system has no platform profile
    #[error("Unsupported operating system: {os}. Supported: linux, macos, windows")]
    UnsupportedPlatform { os: String },

    /// No installation root could be found
    #[error(
        "Unable to find a MATLAB installation (searched PATH and: {searched}). \
         Pass --matlab-root or set MATLAB_ROOT"
    )]
    InstallationNotFound { searched: String },

    /// The MATLAB binary does not exist under the installation root
    #[error("Unable to find MATLAB binary at {}", path.display())]
    BinaryNotFound { path: PathBuf },

    /// The MATLAB process could not be started
    #[error("Failed to run {}: {source}", program.display())]
    ProcessLaunch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The process exited without producing its log file
    #[error("MATLAB exited without writing its log file at {}", path.display())]
    MissingLogFile { path: PathBuf },

    /// Query output could not be decoded into product metadata
    #[error("Unable to correctly parse MATLAB information: {reason}\nRaw output:\n{output}")]
    Parse { reason: String, output: String },

    /// A required environment variable is missing
    #[error("Environment variable {variable} is not set. {hint}")]
    EnvironmentMisconfiguration { variable: String, hint: String },

    /// The Python interpreter could not report NumPy's include directory
    #[error(
        "Unable to determine the NumPy include directory with '{python}': {reason}. \
         Install NumPy for that interpreter, or set build.python or \
         build.numpy_include_dir in mlabwrap.yaml"
    )]
    NumpyInclude { python: String, reason: String },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an unsupported platform error
    pub fn unsupported_platform(os: impl Into<String>) -> Self {
        Self::UnsupportedPlatform { os: os.into() }
    }

    /// Create an installation not found error from the searched base paths
    pub fn installation_not_found<I, S>(searched: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let searched: Vec<String> = searched
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        Self::InstallationNotFound {
            searched: searched.join(", "),
        }
    }

    /// Create a binary not found error
    pub fn binary_not_found(path: impl Into<PathBuf>) -> Self {
        Self::BinaryNotFound { path: path.into() }
    }

    /// Create a process launch error
    pub fn process_launch(program: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ProcessLaunch {
            program: program.into(),
            source,
        }
    }

    /// Create a parse error carrying the raw query output
    pub fn parse(reason: impl Into<String>, output: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
            output: output.into(),
        }
    }

    /// Create an environment misconfiguration error
    pub fn environment(variable: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::EnvironmentMisconfiguration {
            variable: variable.into(),
            hint: hint.into(),
        }
    }

    /// Create a NumPy include lookup error
    pub fn numpy_include(python: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NumpyInclude {
            python: python.into(),
            reason: reason.into(),
        }
    }

    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this error belongs to the execution class (binary missing,
    /// launch failure, no output produced)
    pub fn is_execution(&self) -> bool {
        matches!(
            self,
            Self::BinaryNotFound { .. } | Self::ProcessLaunch { .. } | Self::MissingLogFile { .. }
        )
    }

    /// Whether this error is a query-output parse failure
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_includes_raw_output() {
        let err = Error::parse("no architecture found", "Banner\n8.1 (R2013a)\nSOL64");
        let message = err.to_string();
        assert!(message.contains("no architecture found"));
        assert!(message.contains("SOL64"));
        assert!(err.is_parse());
        assert!(!err.is_execution());
    }

    #[test]
    fn test_execution_classification() {
        assert!(Error::binary_not_found("/opt/MATLAB/bin/matlab").is_execution());
        assert!(Error::process_launch(
            "/opt/MATLAB/bin/matlab",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied)
        )
        .is_execution());
        assert!(!Error::unsupported_platform("freebsd").is_execution());
    }

    #[test]
    fn test_installation_not_found_lists_paths() {
        let err = Error::installation_not_found(["/usr/local/MATLAB/", "/usr/local/"]);
        assert!(err
            .to_string()
            .contains("/usr/local/MATLAB/, /usr/local/"));
    }

    #[test]
    fn test_numpy_include_error_names_interpreter() {
        let err = Error::numpy_include("python3", "No module named 'numpy'");
        let message = err.to_string();
        assert!(message.contains("'python3'"));
        assert!(message.contains("No module named 'numpy'"));
        assert!(message.contains("build.numpy_include_dir"));
        assert!(!err.is_execution());
    }

    #[test]
    fn test_environment_error_message() {
        let err = Error::environment("LIB", "Run from a Visual Studio command prompt.");
        assert_eq!(
            err.to_string(),
            "Environment variable LIB is not set. Run from a Visual Studio command prompt."
        );
    }
}
