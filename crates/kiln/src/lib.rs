//! Kiln — run a project's package-manager build from the directory the launcher lives in.
//! Re-exports all modules and dispatches parsed CLI arguments to the command handlers.

pub(crate) mod build;
pub mod cli;
pub mod config;
pub(crate) mod doctor;
pub(crate) mod paths;
pub(crate) mod scripts;
pub(crate) mod wizard;

use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::CommandFactory;
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};

use cli::{Cli, Command};
use config::Config;

/// Create a spinner with a consistent style.
pub(crate) fn spinner(msg: &str) -> ProgressBar {
    let sp = ProgressBar::new_spinner();
    sp.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    sp.set_message(msg.to_string());
    sp.enable_steady_tick(std::time::Duration::from_millis(80));
    sp
}

/// Run the CLI with parsed arguments. The returned code becomes the process exit status.
pub fn run(cli: Cli) -> Result<ExitCode> {
    if let Some(Command::Completions { shell }) = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "kiln", &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let launcher_dir = paths::launcher_dir()?;

    if matches!(cli.command, Some(Command::Init)) {
        if let Err(e) = Config::load_or_default(cli.config.as_deref(), &launcher_dir) {
            eprintln!(
                "warning: existing config is malformed ({}), the wizard will create a new one",
                e
            );
        }
        let config = wizard::run(&launcher_dir, cli.dry_run)?;
        config.validate()?;
        if !cli.dry_run
            && Confirm::new()
                .with_prompt("Run the build now?")
                .default(true)
                .interact()?
        {
            let project_dir = paths::resolve_project_dir(&config, &launcher_dir);
            return build::run(&config, &project_dir, false, cli.verbose, cli.quiet);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config_path = config::resolved_config_path(cli.config.as_deref(), &launcher_dir)?;
    let config = Config::load(&config_path)?;
    config.validate()?;
    let project_dir = paths::resolve_project_dir(&config, &launcher_dir);

    if cli.verbose {
        eprintln!("{}", style(format!("config: {}", config_path.display())).dim());
    }

    match cli.command.unwrap_or(Command::Build) {
        Command::Init | Command::Completions { .. } => unreachable!(),
        Command::Build => build::run(&config, &project_dir, cli.dry_run, cli.verbose, cli.quiet),
        Command::Doctor => {
            doctor::diagnose(&config, &config_path, &project_dir)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Scripts => {
            scripts::list(&config, &project_dir, cli.quiet)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Config { path } => {
            show_config(&config, &config_path, path)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Show or print config information.
fn show_config(config: &Config, config_path: &Path, path_only: bool) -> Result<()> {
    if path_only {
        println!("{}", config_path.display());
    } else {
        let toml_str = toml::to_string_pretty(config)?;
        println!("{}", toml_str);
    }
    Ok(())
}
