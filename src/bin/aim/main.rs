//! aim CLI - compiles target files into ninja build graphs

use anyhow::Result;
use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use aim::BuildError;
use cli::{Cli, Commands, TargetCommand};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            if let Some(help) = e.downcast_ref::<BuildError>().and_then(|d| d.help()) {
                eprintln!("help: {}", help);
            }
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging; AIM_LOG takes precedence over --verbose
    let filter = EnvFilter::try_from_env("AIM_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("aim=debug")
        } else {
            EnvFilter::new("aim=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Target(args) => {
            let path = args.path;
            match args.command {
                TargetCommand::Generate(cmd) => commands::generate::execute(&path, cmd).map(|_| 0),
                TargetCommand::Build(cmd) => commands::build::execute(&path, cmd),
                TargetCommand::List => commands::list::execute(&path).map(|_| 0),
                TargetCommand::Clobber => commands::clobber::execute(&path).map(|_| 0),
            }
        }
    }
}
