//! Build plan selection
//!
//! Chooses libraries, search paths and defines for the extension module from
//! the resolved metadata. Three release boundaries matter:
//!
//! - **6.5**: `libmi` merged into the other libraries, `_V6_5_OR_LATER`
//! - **7.0**: shared libraries moved from `extern/lib/<arch>` to `bin/<arch>`
//! - **7.3**: `_V7_3_OR_LATER` (64-bit array sizes)
//!
//! On Windows the MSVC toolchain must be initialised so that `INCLUDE` and
//! `LIB` point at its headers and libraries. On every platform NumPy's
//! include directory comes last.

use std::path::{Path, PathBuf};

use mlabwrap_core::config::BuildConfig;
use mlabwrap_core::{Error, PlatformProfile, ProductMetadata, ProductVersion, Result};
use mlabwrap_discovery::ProcessInvoker;

use crate::numpy::numpy_include_dir;
use crate::plan::{BuildPlan, DefineMacro};

const V6_5: &[u32] = &[6, 5];
const V7_0: &[u32] = &[7, 0];
const V7_3: &[u32] = &[7, 3];

const WINDOWS_EXTENSION: &str = "mlabraw";
const UNIX_EXTENSION: &str = "mlabrawmodule";

const WINDOWS_LIBRARIES: &[&str] = &["libeng", "libmx"];
const UNIX_LIBRARIES: &[&str] = &["eng", "mx", "mat", "ut"];
const UNIX_LIBRARIES_PRE_6_5: &[&str] = &["eng", "mx", "mat", "mi", "ut"];
const UNIX_CPP_LIBRARIES: &[&str] = &["stdc++"];

const MSVC_HINT: &str = "Run from a Microsoft Visual Studio command prompt so the MSVC \
                         include and library directories are set";

/// Derives a [`BuildPlan`] from an installation root and its metadata
pub struct BuildPlanBuilder<'a> {
    profile: PlatformProfile,
    config: BuildConfig,
    invoker: &'a dyn ProcessInvoker,
}

impl<'a> BuildPlanBuilder<'a> {
    /// Create a builder with the default build settings. `invoker` runs the
    /// Python interpreter that reports NumPy's include directory.
    pub fn new(profile: PlatformProfile, invoker: &'a dyn ProcessInvoker) -> Self {
        Self {
            profile,
            config: BuildConfig::default(),
            invoker,
        }
    }

    /// Use configured sources and extra include directories
    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the plan. `env` looks up environment variables (only consulted
    /// on Windows).
    pub fn build<F>(&self, root: &Path, metadata: &ProductMetadata, env: F) -> Result<BuildPlan>
    where
        F: Fn(&str) -> Option<String>,
    {
        let version = &metadata.version;
        let subdir = self.profile.arch_subdir(metadata.arch);
        let mut include_dirs = vec![root.join("extern").join("include")];

        let mut plan = if self.profile.is_windows() {
            let msvc_includes = self.msvc_dirs(&env, "INCLUDE")?;
            let msvc_libs = self.msvc_dirs(&env, "LIB")?;

            let mut library_dirs = vec![root
                .join("extern")
                .join("lib")
                .join(&subdir)
                .join("microsoft")];
            library_dirs.extend(msvc_libs);
            include_dirs.extend(msvc_includes);
            include_dirs.extend(self.extra_include_dirs());

            BuildPlan {
                extension_name: WINDOWS_EXTENSION.to_string(),
                sources: self.config.sources.clone(),
                include_dirs,
                library_dirs,
                runtime_library_dirs: Vec::new(),
                libraries: to_strings(WINDOWS_LIBRARIES),
                define_macros: define_macros(version),
            }
        } else {
            let matlab_libraries = if at_least(version, V6_5) {
                UNIX_LIBRARIES
            } else {
                UNIX_LIBRARIES_PRE_6_5
            };
            let mut libraries = to_strings(matlab_libraries);
            libraries.extend(to_strings(UNIX_CPP_LIBRARIES));

            let library_dir = if at_least(version, V7_0) {
                root.join("bin").join(&subdir)
            } else {
                root.join("extern").join("lib").join(&subdir)
            };
            include_dirs.extend(self.extra_include_dirs());

            BuildPlan {
                extension_name: UNIX_EXTENSION.to_string(),
                sources: self.config.sources.clone(),
                include_dirs,
                library_dirs: vec![library_dir.clone()],
                runtime_library_dirs: vec![library_dir],
                libraries,
                define_macros: define_macros(version),
            }
        };
        plan.include_dirs.push(self.numpy_include_dir()?);

        tracing::debug!(
            "Build plan for {} on {}: {} libraries, {} defines",
            metadata,
            self.profile,
            plan.libraries.len(),
            plan.define_macros.len()
        );
        Ok(plan)
    }

    fn msvc_dirs<F>(&self, env: &F, variable: &str) -> Result<Vec<PathBuf>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = env(variable).ok_or_else(|| Error::environment(variable, MSVC_HINT))?;
        Ok(self
            .profile
            .split_path_list(&value)
            .into_iter()
            .map(PathBuf::from)
            .collect())
    }

    fn numpy_include_dir(&self) -> Result<PathBuf> {
        match &self.config.numpy_include_dir {
            Some(dir) => Ok(dir.as_std_path().to_path_buf()),
            None => numpy_include_dir(self.invoker, &self.config.python),
        }
    }

    fn extra_include_dirs(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.config
            .extra_include_dirs
            .iter()
            .map(|dir| dir.as_std_path().to_path_buf())
    }
}

fn at_least(version: &ProductVersion, threshold: &[u32]) -> bool {
    version.at_least(&ProductVersion::new(threshold))
}

fn define_macros(version: &ProductVersion) -> Vec<DefineMacro> {
    let mut defines = Vec::new();
    if at_least(version, V6_5) {
        defines.push(DefineMacro::new("_V6_5_OR_LATER", "1"));
    }
    if at_least(version, V7_3) {
        defines.push(DefineMacro::new("_V7_3_OR_LATER", "1"));
    }
    defines
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
