//! In-memory stand-ins for the host filesystem and external processes
//!
//! Enabled by the `test-util` feature so downstream crates can drive the
//! locate/resolve/plan pipeline without a MATLAB installation.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use glob::Pattern;
use mlabwrap_core::{Error, Result};

use crate::fs::{match_options, FileSystemProber};
use crate::process::{Invocation, ProcessInvoker};

/// In-memory filesystem and environment
#[derive(Debug, Default, Clone)]
pub struct FakeFileSystem {
    dirs: BTreeSet<PathBuf>,
    files: BTreeSet<PathBuf>,
    env: HashMap<String, String>,
    glob_calls: Arc<Mutex<Vec<(String, bool)>>>,
}

impl FakeFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.dirs.insert(path.into());
        self
    }

    /// Add several directories
    pub fn with_dirs<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.dirs.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Add a regular file
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into());
        self
    }

    /// Add `root` and a Unix `bin/matlab` beneath it
    pub fn with_installation(self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        self.with_dir(root).with_file(root.join("bin").join("matlab"))
    }

    /// Set an environment variable
    pub fn with_env(mut self, name: &str, value: &str) -> Self {
        self.env.insert(name.to_string(), value.to_string());
        self
    }

    /// Set PATH from entries joined with `separator`
    pub fn with_path_entries(self, entries: &[&str], separator: char) -> Self {
        let value = entries.join(&separator.to_string());
        self.with_env("PATH", &value)
    }

    /// Glob patterns issued so far, with their case sensitivity
    pub fn glob_calls(&self) -> Vec<(String, bool)> {
        self.glob_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl FileSystemProber for FakeFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.dirs.contains(path) || self.files.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn glob_dirs(&self, pattern: &str, case_sensitive: bool) -> Vec<PathBuf> {
        self.glob_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((pattern.to_string(), case_sensitive));

        let Ok(pattern) = Pattern::new(pattern) else {
            return Vec::new();
        };
        self.dirs
            .iter()
            .filter(|dir| pattern.matches_path_with(dir, match_options(case_sensitive)))
            .cloned()
            .collect()
    }

    fn env_var(&self, name: &str) -> Option<String> {
        self.env.get(name).cloned()
    }
}

/// What the mock observed when a call was made
#[derive(Debug, Clone)]
pub struct MockCall {
    pub invocation: Invocation,
    /// Whether the `-r` script existed in the working directory
    pub script_present: bool,
    /// Whether the `-logfile` target already existed before the run
    pub log_present_before: bool,
}

/// How the mock behaves for `wait`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogBehavior {
    /// Write the canned output to the `-logfile` path
    Write,
    /// Exit without writing anything
    Skip,
}

/// Recording process invoker returning canned output
#[derive(Debug)]
pub struct MockInvoker {
    output: String,
    log_behavior: LogBehavior,
    fail_launch: bool,
    calls: Mutex<Vec<MockCall>>,
}

impl MockInvoker {
    /// Invoker that prints (or logs) `output`
    pub fn new(output: &str) -> Self {
        Self {
            output: output.to_string(),
            log_behavior: LogBehavior::Write,
            fail_launch: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Control whether `wait` writes the log file
    pub fn with_log_behavior(mut self, behavior: LogBehavior) -> Self {
        self.log_behavior = behavior;
        self
    }

    /// Fail every call as if the program could not be started
    pub fn failing_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }

    /// Calls made so far
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Invocations made so far
    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls().into_iter().map(|call| call.invocation).collect()
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn record(&self, invocation: &Invocation) -> Result<()> {
        let script_present = match (&invocation.working_dir, invocation.arg_after("-r")) {
            (Some(dir), Some(script)) => dir.join(format!("{}.m", script)).is_file(),
            _ => false,
        };
        let log_present_before = invocation
            .arg_after("-logfile")
            .is_some_and(|path| Path::new(path).exists());

        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(MockCall {
                invocation: invocation.clone(),
                script_present,
                log_present_before,
            });

        if self.fail_launch {
            return Err(Error::process_launch(
                &invocation.program,
                std::io::Error::new(std::io::ErrorKind::NotFound, "mock launch failure"),
            ));
        }
        Ok(())
    }
}

impl ProcessInvoker for MockInvoker {
    fn output(&self, invocation: &Invocation) -> Result<String> {
        self.record(invocation)?;
        Ok(self.output.clone())
    }

    fn wait(&self, invocation: &Invocation) -> Result<()> {
        self.record(invocation)?;
        if self.log_behavior == LogBehavior::Write {
            if let Some(path) = invocation.arg_after("-logfile") {
                fs::write(path, &self.output)?;
            }
        }
        Ok(())
    }
}
