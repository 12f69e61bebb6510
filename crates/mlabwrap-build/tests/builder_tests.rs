//! Build plan selection across platforms and release generations

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use mlabwrap_build::{BuildPlan, BuildPlanBuilder, DefineMacro, PlanEmitter, PlanFormat};
use mlabwrap_core::config::BuildConfig;
use mlabwrap_core::{
    ArchitectureTag, Error, HostOs, PlatformProfile, ProductMetadata, ProductVersion,
};
use mlabwrap_discovery::testing::MockInvoker;

const NUMPY_INCLUDE: &str = "/usr/lib/python3/dist-packages/numpy/core/include";

fn metadata(version: &str, release: &str, arch: ArchitectureTag) -> ProductMetadata {
    ProductMetadata::new(ProductVersion::parse(version).unwrap(), release, arch)
}

fn msvc_env() -> HashMap<&'static str, String> {
    HashMap::from([
        ("INCLUDE", r"C:\VC\include;C:\SDK\include;".to_string()),
        ("LIB", r"C:\VC\lib\amd64;C:\SDK\lib\x64".to_string()),
    ])
}

fn python() -> MockInvoker {
    MockInvoker::new(&format!("{}\n", NUMPY_INCLUDE))
}

mod windows {
    use super::*;

    #[test]
    fn test_full_plan() {
        let python = python();
        let root = Path::new(r"C:\Program Files\MATLAB\R2012a");
        let env = msvc_env();
        let plan = BuildPlanBuilder::new(PlatformProfile::for_os(HostOs::Windows), &python)
            .build(
                root,
                &metadata("7.14.0.739", "R2012a", ArchitectureTag::Pcwin64),
                |name| env.get(name).cloned(),
            )
            .unwrap();

        assert_eq!(plan.extension_name, "mlabraw");
        assert_eq!(plan.libraries, vec!["libeng", "libmx"]);
        assert_eq!(
            plan.library_dirs,
            vec![
                root.join("extern").join("lib").join("win64").join("microsoft"),
                PathBuf::from(r"C:\VC\lib\amd64"),
                PathBuf::from(r"C:\SDK\lib\x64"),
            ]
        );
        assert_eq!(
            plan.include_dirs,
            vec![
                root.join("extern").join("include"),
                PathBuf::from(r"C:\VC\include"),
                PathBuf::from(r"C:\SDK\include"),
                PathBuf::from(NUMPY_INCLUDE),
            ]
        );
        assert!(plan.runtime_library_dirs.is_empty());
        assert_eq!(
            plan.define_macros,
            vec![
                DefineMacro::new("_V6_5_OR_LATER", "1"),
                DefineMacro::new("_V7_3_OR_LATER", "1"),
            ]
        );
    }

    #[test]
    fn test_32_bit_subdir() {
        let python = python();
        let env = msvc_env();
        let plan = BuildPlanBuilder::new(PlatformProfile::for_os(HostOs::Windows), &python)
            .build(
                Path::new("M"),
                &metadata("7.5", "R2007b", ArchitectureTag::Pcwin),
                |name| env.get(name).cloned(),
            )
            .unwrap();

        assert_eq!(plan.library_dirs[0], PathBuf::from("M/extern/lib/win/microsoft"));
    }

    #[test]
    fn test_flags_have_no_rpath() {
        let python = python();
        let env = msvc_env();
        let plan = BuildPlanBuilder::new(PlatformProfile::for_os(HostOs::Windows), &python)
            .build(
                Path::new("M"),
                &metadata("8.1", "R2013a", ArchitectureTag::Pcwin64),
                |name| env.get(name).cloned(),
            )
            .unwrap();

        let flags = PlanEmitter::default()
            .render(&plan, PlanFormat::Flags)
            .unwrap();
        assert!(flags.contains("-llibeng\n"));
        assert!(!flags.contains("-Wl,-rpath"));
    }
}

mod unix {
    use super::*;

    #[test]
    fn test_macos_plan() {
        let python = python();
        let root = Path::new("/Applications/MATLAB_R2013a.app");
        let plan = BuildPlanBuilder::new(PlatformProfile::for_os(HostOs::MacOS), &python)
            .build(root, &metadata("8.1.0.604", "R2013a", ArchitectureTag::Maci64), |_| None)
            .unwrap();

        assert_eq!(plan.extension_name, "mlabrawmodule");
        assert_eq!(plan.library_dirs, vec![root.join("bin").join("maci64")]);
        assert_eq!(plan.runtime_library_dirs, plan.library_dirs);
    }

    #[test]
    fn test_pre_7_layout() {
        let python = python();
        let root = Path::new("/usr/local/matlab65");
        let plan = BuildPlanBuilder::new(PlatformProfile::for_os(HostOs::Linux), &python)
            .build(root, &metadata("6.5.1", "R13SP1", ArchitectureTag::Glnx86), |_| None)
            .unwrap();

        assert_eq!(
            plan.library_dirs,
            vec![PathBuf::from("/usr/local/matlab65/extern/lib/glnx86")]
        );
        assert_eq!(plan.libraries, vec!["eng", "mx", "mat", "ut", "stdc++"]);
        assert_eq!(plan.define_macros, vec![DefineMacro::new("_V6_5_OR_LATER", "1")]);
    }

    #[test]
    fn test_environment_ignored_off_windows() {
        let python = python();
        let plan = BuildPlanBuilder::new(PlatformProfile::for_os(HostOs::Linux), &python)
            .build(
                Path::new("/opt/matlab"),
                &metadata("8.1", "R2013a", ArchitectureTag::Glnxa64),
                |_| panic!("environment must not be read"),
            )
            .unwrap();

        assert_eq!(plan.include_dirs.len(), 1);
    }

    #[test]
    fn test_configured_sources_and_includes() {
        let python = python();
        let config = BuildConfig {
            sources: vec!["src/mlabraw.cpp".to_string(), "src/util.cpp".to_string()],
            extra_include_dirs: vec!["/usr/include/python3.11".into()],
            ..BuildConfig::default()
        };
        let plan = BuildPlanBuilder::new(PlatformProfile::for_os(HostOs::Linux), &python)
            .with_config(config)
            .build(
                Path::new("/opt/matlab"),
                &metadata("8.1", "R2013a", ArchitectureTag::Glnxa64),
                |_| None,
            )
            .unwrap();

        assert_eq!(plan.sources, vec!["src/mlabraw.cpp", "src/util.cpp"]);
        assert_eq!(
            plan.include_dirs,
            vec![
                PathBuf::from("/opt/matlab/extern/include"),
                PathBuf::from("/usr/include/python3.11"),
                PathBuf::from(NUMPY_INCLUDE),
            ]
        );
    }
}

mod numpy {
    use super::*;

    fn linux_build(python: &MockInvoker, config: BuildConfig) -> mlabwrap_core::Result<BuildPlan> {
        BuildPlanBuilder::new(PlatformProfile::for_os(HostOs::Linux), python)
            .with_config(config)
            .build(
                Path::new("/opt/matlab"),
                &metadata("8.1", "R2013a", ArchitectureTag::Glnxa64),
                |_| None,
            )
    }

    #[test]
    fn test_include_dir_comes_last() {
        let python = python();
        let plan = linux_build(&python, BuildConfig::default()).unwrap();

        assert_eq!(plan.include_dirs.last(), Some(&PathBuf::from(NUMPY_INCLUDE)));
        let invocations = python.invocations();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].program, PathBuf::from("python"));
        assert_eq!(
            invocations[0].args,
            vec!["-c", "import numpy; print(numpy.get_include())"]
        );
    }

    #[test]
    fn test_configured_interpreter() {
        let python = python();
        let config = BuildConfig {
            python: "/opt/venv/bin/python3".to_string(),
            ..BuildConfig::default()
        };
        linux_build(&python, config).unwrap();

        assert_eq!(
            python.invocations()[0].program,
            PathBuf::from("/opt/venv/bin/python3")
        );
    }

    #[test]
    fn test_missing_numpy_fails_the_plan() {
        // `import numpy` failing leaves stdout empty
        let python = MockInvoker::new("");
        let err = linux_build(&python, BuildConfig::default()).unwrap_err();

        assert!(matches!(err, Error::NumpyInclude { ref python, .. } if python == "python"));
        assert!(err.to_string().contains("Install NumPy"));
    }

    #[test]
    fn test_missing_interpreter_fails_the_plan() {
        let python = MockInvoker::new("").failing_launch();
        let err = linux_build(&python, BuildConfig::default()).unwrap_err();

        assert!(matches!(err, Error::NumpyInclude { .. }));
    }

    #[test]
    fn test_windows_plan_includes_numpy() {
        let python = MockInvoker::new(r"C:\Python27\lib\site-packages\numpy\core\include");
        let env = msvc_env();
        let plan = BuildPlanBuilder::new(PlatformProfile::for_os(HostOs::Windows), &python)
            .build(
                Path::new("M"),
                &metadata("7.14", "R2012a", ArchitectureTag::Pcwin64),
                |name| env.get(name).cloned(),
            )
            .unwrap();

        assert_eq!(
            plan.include_dirs.last(),
            Some(&PathBuf::from(r"C:\Python27\lib\site-packages\numpy\core\include"))
        );
    }
}
