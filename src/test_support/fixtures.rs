//! Test fixtures for common test scenarios.
//!
//! The in-memory projects mirror the layout used throughout the builder
//! tests: a build directory two levels below the project root, each target
//! keeping its sources in `<name>/src` and its headers in `<name>/include`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::project::{CompilerFrontend, Project};
use crate::core::target::{BuildKind, Target};

/// Project-wide defaults shared by the in-memory fixtures.
fn base_project(frontend: CompilerFrontend) -> Project {
    let mut project = Project::new("../..", frontend, "g++", "ar");
    project.flags = vec!["-std=c++17".to_string(), "-Wall".to_string()];
    project.defines = vec!["EnableFeature".to_string()];
    project
}

/// `a` (executable) requiring `b` (static library).
pub fn two_target_project() -> Project {
    two_target_project_for(CompilerFrontend::Gcc)
}

/// The two-target project for a given frontend.
pub fn two_target_project_for(frontend: CompilerFrontend) -> Project {
    base_project(frontend)
        .with_target(
            Target::new("b", BuildKind::StaticLibrary)
                .with_output("b")
                .with_includes(["b/include"])
                .with_sources(["b/src"]),
        )
        .with_target(
            Target::new("a", BuildKind::Executable)
                .with_output("a")
                .with_requires(["b"])
                .with_includes(["a/include"])
                .with_sources(["a/src"]),
        )
}

/// Every build kind at once.
///
/// - `a`: executable requiring `b`, `c`, `i` and `r`, with its own external
///   library `pthread` in `/opt/lib`
/// - `b`: static library overriding every toolchain field, requiring `i`
/// - `c`: dynamic library
/// - `i`: header-only, with a system include path
/// - `r`: library reference to `SDL2` in `r/lib`
pub fn full_project() -> Project {
    full_project_for(CompilerFrontend::Gcc)
}

/// The full project for a given frontend.
pub fn full_project_for(frontend: CompilerFrontend) -> Project {
    let mut b = Target::new("b", BuildKind::StaticLibrary)
        .with_output("b")
        .with_requires(["i"])
        .with_includes(["b/include"])
        .with_sources(["b/src"]);
    b.local_include_paths = vec!["b/local/include".to_string()];
    b.compiler = Some("gcc".to_string());
    b.archiver = Some("gcc-ar".to_string());
    b.flags = Some(vec!["-std=c99".to_string()]);
    b.defines = Some(vec!["EnableOtherFeature".to_string()]);

    let c = Target::new("c", BuildKind::DynamicLibrary)
        .with_output("c")
        .with_includes(["c/include"])
        .with_sources(["c/src"]);

    let mut i = Target::new("i", BuildKind::HeaderOnly).with_includes(["i/include"]);
    i.system_include_paths = vec!["/usr/include".to_string()];

    let mut r = Target::new("r", BuildKind::LibraryReference).with_includes(["r/include"]);
    r.libraries = vec!["SDL2".to_string()];
    r.library_paths = vec!["r/lib".to_string()];

    let mut a = Target::new("a", BuildKind::Executable)
        .with_output("a")
        .with_requires(["b", "c", "i", "r"])
        .with_includes(["a/include"])
        .with_sources(["a/src"]);
    a.libraries = vec!["pthread".to_string()];
    a.library_paths = vec!["/opt/lib".to_string()];

    base_project(frontend)
        .with_target(a)
        .with_target(b)
        .with_target(c)
        .with_target(i)
        .with_target(r)
}

/// Fixture for a project on disk: a target file in `builds/<config>` and
/// source files relative to the project root.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    /// Build directory name under `builds/`
    pub config: String,
    /// target.toml content
    pub target_file: String,
    /// Files relative to the project root -> content
    pub files: BTreeMap<PathBuf, String>,
}

impl ProjectFixture {
    /// Create a fixture with the given target file content.
    pub fn new(target_file: impl Into<String>) -> Self {
        ProjectFixture {
            config: "debug".to_string(),
            target_file: target_file.into(),
            files: BTreeMap::new(),
        }
    }

    /// The two-target project with one source file per target.
    pub fn two_target() -> Self {
        ProjectFixture::new(target_files::TWO_TARGET)
            .with_file("a/src/main.cpp", sources::MAIN)
            .with_file("b/src/b.cpp", sources::LIB)
            .with_file("b/include/b.h", sources::HEADER)
    }

    /// Add a file relative to the project root.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Write this fixture under `base_path`, returning the build directory.
    pub fn write_to(&self, base_path: &Path) -> std::io::Result<PathBuf> {
        for (rel_path, content) in &self.files {
            let full_path = base_path.join(rel_path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&full_path, content)?;
        }

        let build_dir = base_path.join("builds").join(&self.config);
        std::fs::create_dir_all(&build_dir)?;
        std::fs::write(build_dir.join("target.toml"), &self.target_file)?;

        Ok(build_dir)
    }
}

/// Target file templates.
pub mod target_files {
    /// `a` (executable) requiring `b` (static library), GCC-like.
    pub const TWO_TARGET: &str = r#"
projectRoot = "../.."
compilerFrontend = "gcc"
compiler = "g++"
archiver = "ar"
flags = ["-std=c++17", "-Wall"]
defines = ["EnableFeature"]

[[builds]]
name = "b"
buildRule = "staticLibrary"
outputName = "b"
sourceFiles = ["b/src"]
includePaths = ["b/include"]

[[builds]]
name = "a"
buildRule = "executable"
outputName = "a"
requires = ["b"]
sourceFiles = ["a/src"]
includePaths = ["a/include"]
"#;
}

/// Source file templates.
pub mod sources {
    pub const MAIN: &str = "#include \"b.h\"\nint main() { return b(); }\n";
    pub const LIB: &str = "#include \"b.h\"\nint b() { return 0; }\n";
    pub const HEADER: &str = "#pragma once\nint b();\n";
}
