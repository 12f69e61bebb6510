//! Runs the mlabwrap binary against stand-in MATLAB and Python executables

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const QUERY_OUTPUT: &str = "Banner line\n8.1 (R2013a)\nGLNXA64\n";
const NUMPY_INCLUDE: &str = "/usr/lib/python3/dist-packages/numpy/core/include";

/// Write an executable shell script at `path` that prints `output`
fn fake_executable(path: &Path, output: &str) {
    fs::write(path, format!("#!/bin/sh\nprintf '{}'\n", output.replace('\n', "\\n"))).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// A fake installation whose `bin/matlab` prints `output`
fn fake_installation(output: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("R2013a");
    let bin = root.join("bin");
    fs::create_dir_all(&bin).unwrap();
    fake_executable(&bin.join("matlab"), output);

    (dir, root)
}

/// Point `build.python` at a stand-in interpreter printing `output`
fn fake_python(dir: &Path, output: &str) {
    let python = dir.join("python");
    fake_executable(&python, output);
    fs::write(
        dir.join("mlabwrap.yaml"),
        format!("build:\n  python: {}\n", python.display()),
    )
    .unwrap();
}

fn mlabwrap(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mlabwrap"))
        .args(args)
        .current_dir(cwd)
        .env_remove("MATLAB_ROOT")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_version_json() {
    let cwd = TempDir::new().unwrap();
    let output = mlabwrap(cwd.path(), &["version", "--json"]);

    assert!(output.status.success());
    let info: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(info["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_locate_with_root_override() {
    let (dir, root) = fake_installation(QUERY_OUTPUT);
    let root_arg = root.to_str().unwrap();
    let output = mlabwrap(dir.path(), &["--matlab-root", root_arg, "locate"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), format!("{}\n", root_arg));
}

#[test]
fn test_info_json() {
    let (dir, root) = fake_installation(QUERY_OUTPUT);
    let output = mlabwrap(
        dir.path(),
        &["-q", "--matlab-root", root.to_str().unwrap(), "info", "--format", "json"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let info: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(info["version"], "8.1");
    assert_eq!(info["release"], "R2013a");
    assert_eq!(info["arch"], "GLNXA64");
}

#[test]
fn test_plan_flags() {
    let (dir, root) = fake_installation(QUERY_OUTPUT);
    fake_python(dir.path(), &format!("{}\n", NUMPY_INCLUDE));
    let output = mlabwrap(
        dir.path(),
        &["-q", "--matlab-root", root.to_str().unwrap(), "plan", "--format", "flags"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let flags = stdout(&output);
    assert!(flags.contains(&format!("-L{}\n", root.join("bin").join("glnxa64").display())));
    assert!(flags.contains(&format!("-I{}\n", NUMPY_INCLUDE)));
    assert!(flags.contains("-leng\n"));
    assert!(flags.contains("-D_V6_5_OR_LATER=1\n"));
    assert!(flags.contains("-D_V7_3_OR_LATER=1\n"));
}

#[test]
fn test_plan_written_to_file() {
    let (dir, root) = fake_installation(QUERY_OUTPUT);
    fake_python(dir.path(), &format!("{}\n", NUMPY_INCLUDE));
    let plan_path = dir.path().join("plan.yaml");
    let output = mlabwrap(
        dir.path(),
        &[
            "--matlab-root",
            root.to_str().unwrap(),
            "plan",
            "--format",
            "yaml",
            "-o",
            plan_path.to_str().unwrap(),
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let yaml = fs::read_to_string(&plan_path).unwrap();
    assert!(yaml.contains("extension_name: mlabrawmodule"));
    assert!(yaml.contains(NUMPY_INCLUDE));
}

#[test]
fn test_plan_without_numpy_fails() {
    let (dir, root) = fake_installation(QUERY_OUTPUT);
    fake_python(dir.path(), "");
    let output = mlabwrap(dir.path(), &["--matlab-root", root.to_str().unwrap(), "plan"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unable to determine the NumPy include directory"));
}

#[test]
fn test_unknown_plan_format_fails() {
    let cwd = TempDir::new().unwrap();
    let output = mlabwrap(cwd.path(), &["plan", "--format", "xml"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid value 'xml'"));
}

#[test]
fn test_root_from_config_file() {
    let (dir, root) = fake_installation(QUERY_OUTPUT);
    fs::write(
        dir.path().join("mlabwrap.yaml"),
        format!("root: {}\n", root.display()),
    )
    .unwrap();

    let output = mlabwrap(dir.path(), &["locate"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim_end(), root.to_str().unwrap());
}

#[test]
fn test_missing_binary_fails() {
    let dir = TempDir::new().unwrap();
    let output = mlabwrap(
        dir.path(),
        &["--matlab-root", dir.path().to_str().unwrap(), "info"],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unable to find MATLAB binary"));
}

#[test]
fn test_unparseable_output_fails() {
    let (dir, root) = fake_installation("no architecture here\n");
    let output = mlabwrap(dir.path(), &["--matlab-root", root.to_str().unwrap(), "info"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unable to correctly parse MATLAB information"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    let output = mlabwrap(dir.path(), &["-c", "missing.yaml", "locate"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Configuration file not found"));
}
