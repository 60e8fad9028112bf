//! torchenv CLI - PyTorch-aware dependency installation for Python environments

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.global.verbose {
        EnvFilter::new("torchenv=debug")
    } else {
        EnvFilter::new("torchenv=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let shell = cli.global.shell();

    match cli.command {
        Commands::InstallDeps(args) => commands::install_deps::execute(args, &cli.global, shell),
        Commands::HelpIni => commands::help_ini::execute(),
        Commands::List => commands::list::execute(&shell),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
