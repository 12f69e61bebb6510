//! # mlabwrap-core
//!
//! Core library for the mlabwrap toolchain resolver providing:
//! - The error taxonomy shared by every stage
//! - MATLAB version tuples and the metadata record produced by the resolver
//! - Platform profiles that capture all per-OS behaviour in one value
//! - Configuration file parsing (mlabwrap.yaml)

pub mod config;
pub mod error;
pub mod metadata;
pub mod platform;
pub mod version;

pub use config::{MlabwrapConfig, MlabwrapConfigFile};
pub use error::{Error, Result};
pub use metadata::{ArchitectureTag, ProductMetadata};
pub use platform::{CaptureStrategy, HostOs, PlatformProfile};
pub use version::ProductVersion;
