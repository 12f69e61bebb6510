//! External process invocation
//!
//! Runs the MATLAB binary to completion. Calls block until the child exits;
//! no timeout is applied and exit codes are only logged.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use mlabwrap_core::{Error, Result};

/// A fully described command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable to run
    pub program: PathBuf,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Working directory for the child
    pub working_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the child in `dir`
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Value following `flag` in the argument list, if any
    pub fn arg_after(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Render as a shell-like command line for logging
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).stdin(Stdio::null());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

/// Runs external executables
pub trait ProcessInvoker {
    /// Run to completion and return what the child wrote to stdout
    fn output(&self, invocation: &Invocation) -> Result<String>;

    /// Run to completion without capturing anything
    fn wait(&self, invocation: &Invocation) -> Result<()>;
}

/// Invoker backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInvoker;

impl SystemInvoker {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessInvoker for SystemInvoker {
    fn output(&self, invocation: &Invocation) -> Result<String> {
        tracing::debug!("Running {}", invocation.command_line());

        let output = invocation
            .command()
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| Error::process_launch(&invocation.program, e))?;

        tracing::debug!("{} exited with {}", invocation.program.display(), output.status);
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn wait(&self, invocation: &Invocation) -> Result<()> {
        tracing::debug!("Running {}", invocation.command_line());

        let status = invocation
            .command()
            .status()
            .map_err(|e| Error::process_launch(&invocation.program, e))?;

        tracing::debug!("{} exited with {}", invocation.program.display(), status);
        Ok(())
    }
}
