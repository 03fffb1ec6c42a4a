//! `aim target <dir> generate` command

use std::path::Path;

use anyhow::Result;

use crate::cli::GenerateArgs;
use aim::ops::generate::{generate, GenerateOptions};
use aim::util::Config;

pub fn execute(build_dir: &Path, args: GenerateArgs) -> Result<()> {
    let config = Config::for_build_dir(build_dir);

    // Emit compile commands: CLI flag OR config setting
    let opts = GenerateOptions {
        emit_compile_commands: args.compile_commands || config.build.emit_compile_commands,
    };

    let summary = generate(build_dir, &opts)?;

    eprintln!(
        "   Generated {} ({} targets, {} compile steps, {} artifacts)",
        summary.build_file.display(),
        summary.targets,
        summary.compile_steps,
        summary.artifacts
    );
    if let Some(path) = summary.compile_commands {
        eprintln!("   Generated {}", path.display());
    }

    Ok(())
}
