//! The launch sequence — anchor the working directory, run the package manager, forward its exit code.

use anyhow::{Context, Result};
use console::style;
use std::path::Path;
use std::process::{Command, ExitCode};

use crate::config::Config;

/// Run the configured build and map its outcome to the launcher's exit code.
///
/// The child inherits stdout/stderr, so build output streams straight through.
/// A non-zero child exit code is forwarded verbatim; a child that never
/// produces an exit code (spawn failure, signal death) surfaces as an error.
pub fn run(
    config: &Config,
    project_dir: &Path,
    dry_run: bool,
    verbose: bool,
    quiet: bool,
) -> Result<ExitCode> {
    // The launcher itself moves into the project directory for the rest of its
    // lifetime; the child gets the same directory explicitly.
    std::env::set_current_dir(project_dir)
        .with_context(|| format!("failed to change directory to {}", project_dir.display()))?;

    if !quiet {
        println!(
            "Building project in: {}",
            style(project_dir.display()).cyan()
        );
    }
    if verbose {
        eprintln!(
            "{}",
            style(format!("  command: {}", config.command_line())).dim()
        );
    }

    if dry_run {
        if !quiet {
            println!(
                "{}",
                style(format!("[dry-run] Would run: {}", config.command_line())).yellow()
            );
        }
        return Ok(ExitCode::SUCCESS);
    }

    if !quiet {
        println!("Running {}...", config.command_line());
    }

    let status = Command::new(&config.package_manager)
        .arg("run")
        .arg(&config.script)
        .args(&config.args)
        .current_dir(project_dir)
        .status()
        .with_context(|| format!("failed to run {}", config.package_manager))?;

    match status.code() {
        Some(0) => {
            if !quiet {
                println!("{}", style("Build completed successfully!").green().bold());
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(code) => {
            eprintln!(
                "{}",
                style(format!("Build failed with exit code {code}")).red().bold()
            );
            Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
        }
        None => anyhow::bail!(
            "{} was terminated by a signal before reporting an exit code",
            config.package_manager
        ),
    }
}
