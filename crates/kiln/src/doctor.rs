//! Read-only diagnosis of the launcher environment: project, package manager, and config.

use anyhow::Result;
use console::style;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::Config;
use crate::scripts;

/// Diagnose common launcher problems. Never modifies anything.
pub fn diagnose(config: &Config, config_path: &Path, project_dir: &Path) -> Result<()> {
    let mut total_issues = 0;

    println!("{}", style("Checking project...").bold());
    total_issues += check_project(config, project_dir);

    println!("{}", style("Checking package manager...").bold());
    total_issues += check_package_manager(&config.package_manager);

    println!("{}", style("Checking config...").bold());
    total_issues += check_config(config, config_path);

    println!();
    if total_issues == 0 {
        println!("{}", style("No issues found.").green().bold());
    } else {
        println!(
            "{}",
            style(format!("Found {} issue(s).", total_issues))
                .yellow()
                .bold()
        );
    }

    Ok(())
}

fn check_project(config: &Config, project_dir: &Path) -> usize {
    if !project_dir.is_dir() {
        println!(
            "  {} project directory does not exist: {}",
            style("!").yellow(),
            project_dir.display()
        );
        return 1;
    }

    let manifest = project_dir.join("package.json");
    if !manifest.exists() {
        println!(
            "  {} no package.json in {}",
            style("!").yellow(),
            project_dir.display()
        );
        return 1;
    }

    match scripts::read_scripts(&manifest) {
        Ok(found) => {
            if found.iter().any(|(name, _)| name == &config.script) {
                println!(
                    "  {} package.json defines \"{}\"",
                    style("ok").green(),
                    config.script
                );
                0
            } else {
                println!(
                    "  {} script \"{}\" is not defined in {}",
                    style("x").red(),
                    config.script,
                    manifest.display()
                );
                1
            }
        }
        Err(e) => {
            println!(
                "  {} could not read {}: {:#}",
                style("x").red(),
                manifest.display(),
                e
            );
            1
        }
    }
}

/// Probe `<package_manager> --version` to confirm the executable is runnable.
fn check_package_manager(package_manager: &str) -> usize {
    let sp = crate::spinner(&format!("Probing {package_manager} --version..."));
    let probe = Command::new(package_manager)
        .arg("--version")
        .stdin(Stdio::null())
        .output();
    sp.finish_and_clear();

    match probe {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            println!("  {} {} {}", style("ok").green(), package_manager, version);
            0
        }
        Ok(output) => {
            println!(
                "  {} {} --version exited with {}",
                style("x").red(),
                package_manager,
                output.status
            );
            1
        }
        Err(e) => {
            println!(
                "  {} {} not runnable: {}",
                style("x").red(),
                package_manager,
                e
            );
            1
        }
    }
}

fn check_config(config: &Config, config_path: &Path) -> usize {
    let mut issues = 0;

    if config_path.exists() {
        println!("  {} {}", style("ok").green(), config_path.display());
    } else {
        println!(
            "  {} no config file — using built-in defaults",
            style("ok").green()
        );
    }

    if config.script.contains(char::is_whitespace) {
        println!(
            "  {} script name contains whitespace: \"{}\"",
            style("!").yellow(),
            config.script
        );
        issues += 1;
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manifest_with_build(dir: &Path) {
        std::fs::write(
            dir.join("package.json"),
            r#"{ "scripts": { "build": "vite build" } }"#,
        )
        .unwrap();
    }

    // -- check_project --

    #[test]
    fn check_project_missing_dir() {
        let config = Config::default();
        let result = check_project(&config, Path::new("/nonexistent/project"));
        assert_eq!(result, 1);
    }

    #[test]
    fn check_project_missing_manifest() {
        let tmp = TempDir::new().unwrap();
        let config = Config::default();
        assert_eq!(check_project(&config, tmp.path()), 1);
    }

    #[test]
    fn check_project_script_not_defined() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("package.json"),
            r#"{ "scripts": { "test": "vitest" } }"#,
        )
        .unwrap();

        let config = Config::default();
        assert_eq!(check_project(&config, tmp.path()), 1);
    }

    #[test]
    fn check_project_malformed_manifest() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("package.json"), "{ broken").unwrap();

        let config = Config::default();
        assert_eq!(check_project(&config, tmp.path()), 1);
    }

    #[test]
    fn check_project_no_issues() {
        let tmp = TempDir::new().unwrap();
        manifest_with_build(tmp.path());

        let config = Config::default();
        assert_eq!(check_project(&config, tmp.path()), 0);
    }

    // -- check_package_manager --

    #[test]
    fn check_package_manager_found() {
        // `true` ignores its arguments and exits 0 on every platform we test on
        assert_eq!(check_package_manager("true"), 0);
    }

    #[test]
    fn check_package_manager_missing() {
        assert_eq!(check_package_manager("kiln-test-no-such-pm"), 1);
    }

    // -- check_config --

    #[test]
    fn check_config_clean() {
        let config = Config::default();
        assert_eq!(check_config(&config, Path::new("/nonexistent/kiln.toml")), 0);
    }

    #[test]
    fn check_config_flags_whitespace_script() {
        let config = Config {
            script: "build prod".into(),
            ..Default::default()
        };
        assert_eq!(check_config(&config, Path::new("/nonexistent/kiln.toml")), 1);
    }
}
