//! target.toml parsing and the project-wide model.
//!
//! A target file lives in a build directory and describes every build of a
//! project together with the project-wide toolchain defaults.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::error::BuildError;
use crate::core::target::{BuildKind, Target};

/// The canonical target file name inside a build directory.
pub const TARGET_FILE_NAME: &str = "target.toml";

/// Toolchain family that determines flag syntax and naming conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerFrontend {
    /// GCC-like drivers (gcc, clang, avr-gcc, ...)
    Gcc,
    /// MSVC-like drivers (cl, clang-cl)
    Msvc,
}

impl CompilerFrontend {
    /// Parse a `compilerFrontend` value.
    ///
    /// `osx` is a recognised frontend without an implementation.
    pub fn parse(value: &str) -> Result<CompilerFrontend, BuildError> {
        match value {
            "gcc" => Ok(CompilerFrontend::Gcc),
            "msvc" => Ok(CompilerFrontend::Msvc),
            "osx" => Err(BuildError::UnsupportedFrontend {
                value: value.to_string(),
            }),
            _ => Err(BuildError::UnknownFrontend {
                value: value.to_string(),
            }),
        }
    }

    /// Get the frontend name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerFrontend::Gcc => "gcc",
            CompilerFrontend::Msvc => "msvc",
        }
    }
}

impl fmt::Display for CompilerFrontend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The whole build description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Project root, relative to the build directory (or absolute)
    pub project_root: String,

    /// Toolchain family
    pub frontend: CompilerFrontend,

    /// Default compiler
    pub compiler: String,

    /// Default archiver
    pub archiver: String,

    /// Default compiler flags
    pub flags: Vec<String>,

    /// Default preprocessor defines (bare names)
    pub defines: Vec<String>,

    /// All targets, in declared order
    pub builds: Vec<Target>,
}

/// Raw target file as deserialized from TOML.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    project_root: String,
    compiler_frontend: String,
    compiler: String,
    archiver: String,
    #[serde(default)]
    flags: Vec<String>,
    #[serde(default)]
    defines: Vec<String>,
    #[serde(default)]
    builds: Vec<RawTarget>,
}

/// Raw build entry (before kind conversion).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTarget {
    name: String,
    build_rule: String,
    #[serde(default)]
    output_name: Option<String>,
    #[serde(default)]
    requires: Vec<String>,
    #[serde(default)]
    include_paths: Vec<String>,
    #[serde(default)]
    system_include_paths: Vec<String>,
    #[serde(default)]
    local_include_paths: Vec<String>,
    #[serde(default, alias = "srcDirs")]
    source_files: Vec<String>,
    #[serde(default)]
    compiler: Option<String>,
    #[serde(default)]
    archiver: Option<String>,
    #[serde(default)]
    flags: Option<Vec<String>>,
    #[serde(default)]
    defines: Option<Vec<String>>,
    #[serde(default)]
    libraries: Vec<String>,
    #[serde(default)]
    library_paths: Vec<String>,
}

impl RawTarget {
    fn into_target(self) -> Result<Target, BuildError> {
        let kind = BuildKind::parse(&self.name, &self.build_rule)?;
        Ok(Target {
            name: self.name,
            kind,
            output_name: self.output_name,
            requires: self.requires,
            include_paths: self.include_paths,
            system_include_paths: self.system_include_paths,
            local_include_paths: self.local_include_paths,
            source_files: self.source_files,
            compiler: self.compiler,
            archiver: self.archiver,
            flags: self.flags,
            defines: self.defines,
            libraries: self.libraries,
            library_paths: self.library_paths,
        })
    }
}

impl Project {
    /// Create a project with the given frontend and toolchain defaults.
    pub fn new(
        project_root: impl Into<String>,
        frontend: CompilerFrontend,
        compiler: impl Into<String>,
        archiver: impl Into<String>,
    ) -> Self {
        Project {
            project_root: project_root.into(),
            frontend,
            compiler: compiler.into(),
            archiver: archiver.into(),
            flags: Vec::new(),
            defines: Vec::new(),
            builds: Vec::new(),
        }
    }

    /// Add a target.
    pub fn with_target(mut self, target: Target) -> Self {
        self.builds.push(target);
        self
    }

    /// Load the target file from a build directory.
    pub fn load(build_dir: &Path) -> Result<Self> {
        let path = target_file_path(build_dir);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read target file: {}", path.display()))?;

        Self::parse(&content, &path)
    }

    /// Parse target file content.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let raw: RawProject = toml::from_str(content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let frontend = CompilerFrontend::parse(&raw.compiler_frontend)?;

        let builds = raw
            .builds
            .into_iter()
            .map(RawTarget::into_target)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Project {
            project_root: raw.project_root,
            frontend,
            compiler: raw.compiler,
            archiver: raw.archiver,
            flags: raw.flags,
            defines: raw.defines,
            builds,
        })
    }

    /// Look up a target by name.
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.builds.iter().find(|t| t.name == name)
    }
}

/// Path of the target file inside a build directory.
pub fn target_file_path(build_dir: &Path) -> PathBuf {
    build_dir.join(TARGET_FILE_NAME)
}
