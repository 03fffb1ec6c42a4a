//! Implementation of `aim target <dir> generate`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::compile_commands::{compile_commands, to_json};
use crate::builder::{for_frontend, BuildPlan, FsSourceDiscovery};
use crate::core::{validate, Project};
use crate::util::fs::write_atomic;

/// Name of the generated build file.
pub const BUILD_FILE_NAME: &str = "build.ninja";

/// Name of the generated compilation database.
pub const COMPILE_COMMANDS_FILE_NAME: &str = "compile_commands.json";

/// Options for the generate command.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Also write compile_commands.json
    pub emit_compile_commands: bool,
}

/// What a successful generation wrote.
#[derive(Debug, Clone)]
pub struct GenerateSummary {
    /// Path of build.ninja
    pub build_file: PathBuf,

    /// Path of compile_commands.json, if written
    pub compile_commands: Option<PathBuf>,

    /// Number of targets in the target file
    pub targets: usize,

    /// Number of compile steps
    pub compile_steps: usize,

    /// Number of archive and link steps
    pub artifacts: usize,
}

/// Generate the ninja build file for a build directory.
///
/// Everything is resolved and rendered before the first write, so an error
/// in any target leaves the previous build.ninja (or none) untouched.
pub fn generate(build_dir: &Path, opts: &GenerateOptions) -> Result<GenerateSummary> {
    let project = Project::load(build_dir)?;
    validate(&project)?;

    let toolchain = for_frontend(project.frontend);
    let discovery = FsSourceDiscovery::new(build_dir);
    let plan = BuildPlan::new(&project, toolchain.as_ref(), &discovery)?;

    let ninja = plan.to_ninja(toolchain.as_ref());
    let compdb = if opts.emit_compile_commands {
        let directory = std::fs::canonicalize(build_dir).unwrap_or_else(|_| build_dir.to_path_buf());
        Some(to_json(&compile_commands(&plan, toolchain.as_ref(), &directory))?)
    } else {
        None
    };

    let build_file = build_dir.join(BUILD_FILE_NAME);
    write_atomic(&build_file, &ninja)?;
    tracing::info!("wrote {}", build_file.display());

    let compdb_path = match compdb {
        Some(json) => {
            let path = build_dir.join(COMPILE_COMMANDS_FILE_NAME);
            write_atomic(&path, &json)?;
            tracing::info!("wrote {}", path.display());
            Some(path)
        }
        None => None,
    };

    Ok(GenerateSummary {
        build_file,
        compile_commands: compdb_path,
        targets: project.builds.len(),
        compile_steps: plan.compile_count(),
        artifacts: plan.artifact_count(),
    })
}
