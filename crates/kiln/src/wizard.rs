//! Interactive `kiln init` setup wizard using dialoguer. Detects the package manager from lockfiles.

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};

use crate::config::{Config, LOCAL_CONFIG_NAME, expand_tilde};
use crate::scripts;

/// Package managers offered by the wizard, in display order.
const MANAGERS: &[&str] = &["npm", "pnpm", "yarn", "bun"];

/// Lockfile names and the package manager each one implies.
const LOCKFILES: &[(&str, &str)] = &[
    ("package-lock.json", "npm"),
    ("npm-shrinkwrap.json", "npm"),
    ("pnpm-lock.yaml", "pnpm"),
    ("yarn.lock", "yarn"),
    ("bun.lockb", "bun"),
    ("bun.lock", "bun"),
];

/// Run the interactive setup wizard.
pub fn run(launcher_dir: &Path, dry_run: bool) -> Result<Config> {
    println!();
    println!("{}", style("Welcome to kiln setup!").bold().cyan());
    println!("This wizard will configure which build command kiln runs and where.");
    println!();

    // Step 1: project directory
    let project_dir = configure_project_dir(launcher_dir)?;

    // Step 2: package manager (lockfile detection proposes a default)
    let package_manager = configure_package_manager(&project_dir)?;

    // Step 3: build script
    let script = configure_script(&project_dir)?;

    let config = Config {
        package_manager,
        script,
        args: Vec::new(),
        project_dir: (project_dir != launcher_dir).then(|| project_dir.clone()),
    };

    // Step 4: save config
    let config_path = launcher_dir.join(LOCAL_CONFIG_NAME);
    println!();
    println!(
        "Config will be saved to: {}",
        style(config_path.display()).cyan()
    );

    if dry_run {
        println!("  (dry run — not saving)");
        let toml_str = toml::to_string_pretty(&config)?;
        println!();
        println!("{}", style("Generated config:").bold());
        println!("{}", toml_str);
    } else if Confirm::new()
        .with_prompt("Save configuration?")
        .default(true)
        .interact()?
    {
        config.save(&config_path)?;
        println!("{} Config saved!", style("done").green());
    }

    Ok(config)
}

fn configure_project_dir(launcher_dir: &Path) -> Result<PathBuf> {
    println!("{}", style("Step 1: Project directory").bold());

    let options = vec![
        format!("{} (launcher directory)", launcher_dir.display()),
        "Custom path...".to_string(),
    ];

    let selection = Select::new()
        .with_prompt("Where does the build run?")
        .items(&options)
        .default(0)
        .interact()?;

    let path = if selection == 0 {
        launcher_dir.to_path_buf()
    } else {
        let custom: String = Input::new().with_prompt("Project path").interact_text()?;
        expand_tilde(&PathBuf::from(custom))?
    };

    println!();
    Ok(path)
}

fn configure_package_manager(project_dir: &Path) -> Result<String> {
    println!("{}", style("Step 2: Package manager").bold());

    let detected = detect_package_manager(project_dir);
    if let Some(found) = detected {
        println!("  {} {} lockfile found", style("✓").green(), found);
    }

    let mut options: Vec<String> = MANAGERS.iter().map(|m| (*m).to_string()).collect();
    options.push("Custom...".to_string());
    let default_idx = detected
        .and_then(|d| MANAGERS.iter().position(|m| *m == d))
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Which package manager runs the build?")
        .items(&options)
        .default(default_idx)
        .interact()?;

    let manager = if selection < MANAGERS.len() {
        MANAGERS[selection].to_string()
    } else {
        Input::new()
            .with_prompt("Package manager executable")
            .interact_text()?
    };

    println!();
    Ok(manager)
}

fn configure_script(project_dir: &Path) -> Result<String> {
    println!("{}", style("Step 3: Build script").bold());

    let manifest = project_dir.join("package.json");
    let known: Vec<String> = scripts::read_scripts(&manifest)
        .unwrap_or_default()
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    let script = if known.is_empty() {
        Input::new()
            .with_prompt("Script to run")
            .default("build".to_string())
            .interact_text()?
    } else {
        let mut options = known.clone();
        options.push("Custom...".to_string());
        let default_idx = known.iter().position(|name| name == "build").unwrap_or(0);

        let selection = Select::new()
            .with_prompt("Which package.json script is the build?")
            .items(&options)
            .default(default_idx)
            .interact()?;

        if selection < known.len() {
            known[selection].clone()
        } else {
            Input::new()
                .with_prompt("Script to run")
                .default("build".to_string())
                .interact_text()?
        }
    };

    println!();
    Ok(script)
}

/// Infer the package manager from lockfiles in `project_dir`.
///
/// Uses `std::fs::metadata()` instead of `path.is_file()` so that permission
/// errors surface as warnings rather than being silently swallowed.
fn detect_package_manager(project_dir: &Path) -> Option<&'static str> {
    for (lockfile, manager) in LOCKFILES {
        let path = project_dir.join(lockfile);
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => return Some(manager),
            Ok(_) => {} // exists but not a file — skip
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {} // expected — skip
            Err(e) => {
                eprintln!("warning: could not check {}: {}", path.display(), e);
            }
        }
    }

    None
}
