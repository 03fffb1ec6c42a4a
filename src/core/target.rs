//! Target definitions - what gets built or referenced.
//!
//! A Target is one entry of the `builds` list: a library, an executable, a
//! header-only bundle, or a reference to a prebuilt external library.

use std::fmt;

use serde::Serialize;

use crate::core::error::BuildError;

/// The role a target plays in the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BuildKind {
    /// Static library (`lib{name}.a` / `{name}.lib`)
    StaticLibrary,
    /// Shared/dynamic library (`lib{name}.so` / `{name}.dll`)
    DynamicLibrary,
    /// Executable binary
    Executable,
    /// Headers only; contributes include paths to dependents
    HeaderOnly,
    /// Prebuilt external library; contributes include and link information
    LibraryReference,
}

impl BuildKind {
    /// Parse a `buildRule` value.
    ///
    /// Both the long names and the short forms (`staticLib`, `dynamicLib`,
    /// `exe`) are accepted.
    pub fn parse(target: &str, value: &str) -> Result<BuildKind, BuildError> {
        match value {
            "staticLibrary" | "staticLib" => Ok(BuildKind::StaticLibrary),
            "dynamicLibrary" | "dynamicLib" => Ok(BuildKind::DynamicLibrary),
            "executable" | "exe" => Ok(BuildKind::Executable),
            "headerOnly" => Ok(BuildKind::HeaderOnly),
            "libraryReference" => Ok(BuildKind::LibraryReference),
            _ => Err(BuildError::UnknownBuildKind {
                target: target.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Get the canonical `buildRule` spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildKind::StaticLibrary => "staticLibrary",
            BuildKind::DynamicLibrary => "dynamicLibrary",
            BuildKind::Executable => "executable",
            BuildKind::HeaderOnly => "headerOnly",
            BuildKind::LibraryReference => "libraryReference",
        }
    }

    /// Check if this kind compiles sources and produces an artifact.
    pub fn produces_artifact(&self) -> bool {
        matches!(
            self,
            BuildKind::StaticLibrary | BuildKind::DynamicLibrary | BuildKind::Executable
        )
    }

    /// Check if dependents link against this kind's artifact.
    pub fn is_linkable(&self) -> bool {
        matches!(self, BuildKind::StaticLibrary | BuildKind::DynamicLibrary)
    }

    /// Check if this kind runs a link step (and so consumes link information).
    pub fn links(&self) -> bool {
        matches!(self, BuildKind::DynamicLibrary | BuildKind::Executable)
    }
}

impl fmt::Display for BuildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A build target with its configuration.
///
/// Paths are kept as declared (strings, forward or back slashes) because
/// they are rewritten per toolchain frontend at emission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// Unique name within the project
    pub name: String,

    /// What this target builds or references
    pub kind: BuildKind,

    /// Logical artifact name, before platform decoration
    pub output_name: Option<String>,

    /// Names of targets this one depends on, in declared order
    pub requires: Vec<String>,

    /// Include directories, relative to the project root unless absolute
    pub include_paths: Vec<String>,

    /// System include directories, passed through verbatim
    pub system_include_paths: Vec<String>,

    /// Quote-style include directories, relative to the project root
    pub local_include_paths: Vec<String>,

    /// Source directories, files or glob patterns
    pub source_files: Vec<String>,

    /// Compiler override
    pub compiler: Option<String>,

    /// Archiver override
    pub archiver: Option<String>,

    /// Compiler flag override
    pub flags: Option<Vec<String>>,

    /// Preprocessor define override (bare names, unprefixed)
    pub defines: Option<Vec<String>>,

    /// External libraries to link
    pub libraries: Vec<String>,

    /// External library search paths
    pub library_paths: Vec<String>,
}

impl Target {
    /// Create a new target with the given name and kind.
    pub fn new(name: impl Into<String>, kind: BuildKind) -> Self {
        Target {
            name: name.into(),
            kind,
            output_name: None,
            requires: Vec::new(),
            include_paths: Vec::new(),
            system_include_paths: Vec::new(),
            local_include_paths: Vec::new(),
            source_files: Vec::new(),
            compiler: None,
            archiver: None,
            flags: None,
            defines: None,
            libraries: Vec::new(),
            library_paths: Vec::new(),
        }
    }

    /// Set the logical output name.
    pub fn with_output(mut self, output_name: impl Into<String>) -> Self {
        self.output_name = Some(output_name.into());
        self
    }

    /// Set the required targets.
    pub fn with_requires(mut self, requires: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.requires = requires.into_iter().map(Into::into).collect();
        self
    }

    /// Set the include paths.
    pub fn with_includes(mut self, paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Set the source entries.
    pub fn with_sources(mut self, sources: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.source_files = sources.into_iter().map(Into::into).collect();
        self
    }

    /// The logical output name, falling back to the target name.
    pub fn logical_name(&self) -> &str {
        self.output_name.as_deref().unwrap_or(&self.name)
    }
}
