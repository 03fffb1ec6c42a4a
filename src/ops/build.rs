//! Implementation of `aim target <dir> build`.
//!
//! aim does not compile anything itself; it regenerates build.ninja and
//! hands over to ninja, whose output is streamed straight to the terminal.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};

use crate::ops::generate::{generate, GenerateOptions, BUILD_FILE_NAME};

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Use the existing build.ninja instead of regenerating it
    pub skip_regen: bool,

    /// Number of parallel jobs (None = ninja's default)
    pub jobs: Option<usize>,

    /// ninja executable (None = search PATH)
    pub ninja: Option<PathBuf>,

    /// Emit compile_commands.json while regenerating
    pub emit_compile_commands: bool,
}

/// A ninja invocation for one build directory and target.
#[derive(Debug, Clone)]
pub struct NinjaInvocation {
    program: PathBuf,
    args: Vec<String>,
}

impl NinjaInvocation {
    /// `ninja -C <build_dir> -v [-j N] <target>`
    pub fn new(program: impl Into<PathBuf>, build_dir: &Path, target: &str, jobs: Option<usize>) -> Self {
        let mut args = vec![
            "-C".to_string(),
            build_dir.display().to_string(),
            "-v".to_string(),
        ];
        if let Some(jobs) = jobs {
            args.push("-j".to_string());
            args.push(jobs.to_string());
        }
        args.push(target.to_string());

        NinjaInvocation {
            program: program.into(),
            args,
        }
    }

    /// Get the arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Display the command for logs and error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    /// Run ninja with inherited stdio, returning its exit code.
    pub fn run(&self) -> Result<i32> {
        tracing::debug!("running `{}`", self.display_command());
        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .with_context(|| format!("failed to execute `{}`", self.display_command()))?;

        // Killed by a signal: report failure like a shell would.
        Ok(status.code().unwrap_or(1))
    }
}

/// Locate the ninja executable.
pub fn find_ninja(configured: Option<&Path>) -> Result<PathBuf> {
    match configured {
        Some(path) => Ok(path.to_path_buf()),
        None => which::which("ninja").context(
            "ninja not found in PATH\n\
             hint: install ninja or set `build.ninja` in aim.toml",
        ),
    }
}

/// Build a target of a build directory, returning ninja's exit code.
pub fn build(build_dir: &Path, target: &str, opts: &BuildOptions) -> Result<i32> {
    if opts.skip_regen {
        if !build_dir.join(BUILD_FILE_NAME).is_file() {
            bail!(
                "no {} in {}\n\
                 hint: run without --skip-regen to generate it",
                BUILD_FILE_NAME,
                build_dir.display()
            );
        }
    } else {
        generate(
            build_dir,
            &GenerateOptions {
                emit_compile_commands: opts.emit_compile_commands,
            },
        )?;
    }

    let ninja = find_ninja(opts.ninja.as_deref())?;
    let invocation = NinjaInvocation::new(ninja, build_dir, target, opts.jobs);
    let code = invocation.run()?;
    if code != 0 {
        tracing::warn!("ninja exited with code {}", code);
    }

    Ok(code)
}
