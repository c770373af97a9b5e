//! CLI argument parsing with clap. Defines the `Cli` struct and `Command` enum.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kiln",
    version,
    about = "Run a project's build from the directory the launcher lives in",
    after_help = "Examples:\n  kiln\n  kiln init\n  kiln --dry-run\n  kiln scripts\n  kiln doctor"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to config file (default: kiln.toml next to the binary)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print what would run without spawning the build
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Detailed output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the package-manager build in the launcher's directory (the default)
    Build,

    /// Interactive wizard to configure the build command
    Init,

    /// Diagnose problems with the project, package manager, or config
    Doctor,

    /// List the scripts defined in the project's package.json
    #[command(alias = "ls")]
    Scripts,

    /// Show or print config information
    Config {
        /// Print config file path only
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
