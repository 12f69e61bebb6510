//! Configuration loading and management

mod loader;
mod types;

pub use loader::MlabwrapConfig;
pub use types::{BuildConfig, MlabwrapConfigFile, ProbeConfig, ProductConfig, SearchConfig};
