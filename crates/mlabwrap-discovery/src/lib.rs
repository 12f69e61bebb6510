//! # mlabwrap-discovery
//!
//! Finds a MATLAB installation on the host and asks it what it is.
//!
//! - [`InstallationLocator`] searches PATH and the platform's default
//!   install directories for a candidate root
//! - [`MetadataResolver`] runs the MATLAB binary with an embedded query
//!   script and decodes version, release and architecture
//!
//! Both go through the [`FileSystemProber`] and [`ProcessInvoker`] seams so
//! the whole pipeline can run against a simulated host.

pub mod fs;
pub mod locator;
pub mod process;
pub mod query;
pub mod resolver;
#[cfg(feature = "test-util")]
pub mod testing;

pub use fs::{FileSystemProber, HostFileSystem};
pub use locator::{InstallationLocator, Location};
pub use process::{Invocation, ProcessInvoker, SystemInvoker};
pub use query::{QueryWorkspace, QUERY_SCRIPT_SOURCE};
pub use resolver::{parse_query_output, MetadataResolver};
