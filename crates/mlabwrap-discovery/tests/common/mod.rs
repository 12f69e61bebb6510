//! Common test utilities for mlabwrap-discovery
//!
//! - Canned query output in the shapes MATLAB releases produce
//! - The simulated host and recording invoker from the `test-util` feature

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;

pub use fixtures::*;
pub use mlabwrap_discovery::testing::*;
