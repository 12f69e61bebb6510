//! NumPy header discovery
//!
//! `mlabraw.cpp` converts between MATLAB and NumPy arrays, so the build needs
//! NumPy's C headers. Their location is whatever `numpy.get_include()`
//! reports in the interpreter the extension is built for.

use std::path::PathBuf;

use mlabwrap_core::{Error, Result};
use mlabwrap_discovery::{Invocation, ProcessInvoker};

/// Statement run with `python -c`
pub const NUMPY_INCLUDE_STATEMENT: &str = "import numpy; print(numpy.get_include())";

/// Ask `python` where NumPy's headers live
///
/// The last non-blank line of stdout is taken as the directory; anything
/// printed before it (import warnings) is ignored. A failed import prints
/// nothing to stdout, which is reported as a lookup failure.
pub fn numpy_include_dir(invoker: &dyn ProcessInvoker, python: &str) -> Result<PathBuf> {
    let invocation = Invocation::new(python).args(["-c", NUMPY_INCLUDE_STATEMENT]);

    let output = invoker
        .output(&invocation)
        .map_err(|e| Error::numpy_include(python, e.to_string()))?;

    let dir = output
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| Error::numpy_include(python, "interpreter printed no include directory"))?;

    tracing::debug!("NumPy include directory from {}: {}", python, dir);
    Ok(PathBuf::from(dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlabwrap_discovery::testing::MockInvoker;

    #[test]
    fn test_runs_get_include() {
        let invoker = MockInvoker::new("/usr/lib/python3/dist-packages/numpy/core/include\n");
        let dir = numpy_include_dir(&invoker, "python3").unwrap();

        assert_eq!(
            dir,
            PathBuf::from("/usr/lib/python3/dist-packages/numpy/core/include")
        );
        let invocations = invoker.invocations();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].program, PathBuf::from("python3"));
        assert_eq!(
            invocations[0].args,
            vec!["-c", "import numpy; print(numpy.get_include())"]
        );
    }

    #[test]
    fn test_takes_last_line() {
        let invoker = MockInvoker::new("RuntimeWarning: old BLAS\r\n/opt/numpy/include\r\n\r\n");
        assert_eq!(
            numpy_include_dir(&invoker, "python").unwrap(),
            PathBuf::from("/opt/numpy/include")
        );
    }

    #[test]
    fn test_no_output_is_an_error() {
        let invoker = MockInvoker::new("");
        let err = numpy_include_dir(&invoker, "python").unwrap_err();

        assert!(matches!(err, Error::NumpyInclude { .. }));
        assert!(err.to_string().contains("printed no include directory"));
    }

    #[test]
    fn test_missing_interpreter_is_an_error() {
        let invoker = MockInvoker::new("").failing_launch();
        let err = numpy_include_dir(&invoker, "/opt/python/bin/python").unwrap_err();

        match err {
            Error::NumpyInclude { python, reason } => {
                assert_eq!(python, "/opt/python/bin/python");
                assert!(reason.contains("Failed to run"));
            }
            other => panic!("expected NumpyInclude, got {other:?}"),
        }
    }
}
