//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell as CompletionShell;

use torchenv::util::shell::{ColorChoice, Shell};

/// torchenv - install PyTorch distributions with the right backend and channel
#[derive(Parser)]
#[command(name = "torchenv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output format for messages
    #[arg(long, global = true, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,

    /// light-the-torch executable
    #[arg(long, global = true, env = "TORCHENV_LTT")]
    pub ltt: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn shell(&self) -> Shell {
        Shell::from_flags(
            self.quiet,
            self.verbose,
            self.color,
            self.message_format == MessageFormat::Json,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    Human,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install the PyTorch distributions required by an environment
    InstallDeps(InstallDepsArgs),

    /// Show the environment settings torchenv understands
    HelpIni,

    /// List the environments declared in torchenv.toml
    List,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct InstallDepsArgs {
    /// Environment name
    pub env: String,

    /// Built package artifact to scan, relative to the current directory
    /// (defaults to the project directory)
    #[arg(long, value_name = "PATH")]
    pub package: Option<PathBuf>,

    /// Resolve the install sources without installing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}
