//! Build plan types

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A `name=value` preprocessor define
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DefineMacro {
    pub name: String,
    pub value: String,
}

impl DefineMacro {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for DefineMacro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Everything needed to compile and link the extension module.
///
/// Produced once by [`BuildPlanBuilder`](crate::BuildPlanBuilder). All
/// sequences keep the order the linker should see them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    /// Name of the extension module
    pub extension_name: String,
    /// Source files
    pub sources: Vec<String>,
    /// Header search paths
    pub include_dirs: Vec<PathBuf>,
    /// Link-time library search paths
    pub library_dirs: Vec<PathBuf>,
    /// Run-time library search paths (empty on Windows)
    pub runtime_library_dirs: Vec<PathBuf>,
    /// Libraries to link, without prefix or suffix
    pub libraries: Vec<String>,
    /// Preprocessor defines, free of duplicates
    pub define_macros: Vec<DefineMacro>,
}

impl BuildPlan {
    /// Whether `name` is defined
    pub fn defines(&self, name: &str) -> bool {
        self.define_macros.iter().any(|m| m.name == name)
    }

    /// Whether `library` is linked
    pub fn links(&self, library: &str) -> bool {
        self.libraries.iter().any(|l| l == library)
    }
}
