//! # mlabwrap-build
//!
//! Turns resolved MATLAB metadata into a native extension build plan and
//! renders that plan for build tooling. NumPy's headers are located by
//! asking the target Python interpreter.

pub mod builder;
pub mod emit;
pub mod numpy;
pub mod plan;

pub use builder::BuildPlanBuilder;
pub use emit::{PlanEmitter, PlanFormat};
pub use numpy::{numpy_include_dir, NUMPY_INCLUDE_STATEMENT};
pub use plan::{BuildPlan, DefineMacro};
