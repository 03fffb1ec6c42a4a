//! `aim target <dir> build` command

use std::path::Path;

use anyhow::Result;

use crate::cli::BuildArgs;
use aim::ops::build::{build, BuildOptions};
use aim::util::Config;

pub fn execute(build_dir: &Path, args: BuildArgs) -> Result<i32> {
    let config = Config::for_build_dir(build_dir);

    let opts = BuildOptions {
        skip_regen: args.skip_regen,
        // Jobs: CLI > config > None (ninja default)
        jobs: args.jobs.or(config.build.jobs),
        ninja: config.build.ninja,
        emit_compile_commands: args.compile_commands || config.build.emit_compile_commands,
    };

    build(build_dir, &args.name, &opts)
}
