//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// aim - compiles declarative C/C++ target files into ninja build graphs
#[derive(Parser)]
#[command(name = "aim")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Operate on a build directory containing a target.toml
    Target(TargetArgs),
}

#[derive(Args)]
pub struct TargetArgs {
    /// Build directory (contains target.toml)
    pub path: PathBuf,

    #[command(subcommand)]
    pub command: TargetCommand,
}

#[derive(Subcommand)]
pub enum TargetCommand {
    /// Write build.ninja for the build directory
    Generate(GenerateArgs),

    /// Regenerate build.ninja and build a target with ninja
    Build(BuildArgs),

    /// List the targets with their build rule and output name
    List,

    /// Delete everything in the build directory except target.toml and aim.toml
    Clobber,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Also write compile_commands.json
    #[arg(long)]
    pub compile_commands: bool,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Target to build (target name, output name or artifact name)
    pub name: String,

    /// Use the existing build.ninja as is
    #[arg(long)]
    pub skip_regen: bool,

    /// Number of parallel jobs
    #[arg(short, long, env = "AIM_JOBS")]
    pub jobs: Option<usize>,

    /// Also write compile_commands.json
    #[arg(long)]
    pub compile_commands: bool,
}
