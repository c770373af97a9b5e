//! Listing of the scripts defined in the project's package.json.

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::config::Config;

/// Print the scripts table for the project's package.json.
pub fn list(config: &Config, project_dir: &Path, quiet: bool) -> Result<()> {
    let manifest = project_dir.join("package.json");
    let scripts = read_scripts(&manifest)?;

    if quiet {
        return Ok(());
    }

    if scripts.is_empty() {
        println!("No scripts found in {}.", manifest.display());
        return Ok(());
    }

    use tabled::settings::{Modify, Style, object::Rows};

    let mut rows: Vec<[String; 2]> = Vec::with_capacity(scripts.len() + 1);
    rows.push(["SCRIPT".to_string(), "COMMAND".to_string()]);
    for (name, command) in &scripts {
        rows.push([name.clone(), command.clone()]);
    }

    let table = tabled::Table::from_iter(rows)
        .with(Style::blank())
        .with(
            Modify::new(Rows::first()).with(tabled::settings::Format::content(|s| {
                style(s).bold().to_string()
            })),
        )
        .to_string();

    println!("{table}");
    println!();
    println!("{} script(s) total", scripts.len());
    if scripts.iter().any(|(name, _)| name == &config.script) {
        println!(
            "`kiln` runs {}",
            style(format!("\"{}\"", config.script)).cyan()
        );
    } else {
        println!(
            "{} configured script \"{}\" is not defined here",
            style("warning:").yellow().bold(),
            config.script
        );
    }

    Ok(())
}

/// Read the `scripts` map from a package.json, sorted by name.
pub(crate) fn read_scripts(manifest: &Path) -> Result<Vec<(String, String)>> {
    let content = std::fs::read_to_string(manifest)
        .with_context(|| format!("failed to read {}", manifest.display()))?;
    let json: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", manifest.display()))?;

    let mut scripts = Vec::new();
    if let Some(map) = json.get("scripts").and_then(|v| v.as_object()) {
        for (name, value) in map {
            match value.as_str() {
                Some(command) => scripts.push((name.clone(), command.to_string())),
                None => eprintln!(
                    "warning: script '{}' in {} is not a string",
                    name,
                    manifest.display()
                ),
            }
        }
    }
    Ok(scripts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join("package.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn read_scripts_missing_file_errors() {
        let err = read_scripts(Path::new("/nonexistent/package.json")).unwrap_err();
        assert!(
            err.to_string().contains("failed to read"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn read_scripts_malformed_json_errors() {
        let tmp = TempDir::new().unwrap();
        let manifest = write_manifest(tmp.path(), "{ not json");
        let err = read_scripts(&manifest).unwrap_err();
        assert!(
            err.to_string().contains("failed to parse"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn read_scripts_without_scripts_key_is_empty() {
        let tmp = TempDir::new().unwrap();
        let manifest = write_manifest(tmp.path(), r#"{ "name": "fixture" }"#);
        assert!(read_scripts(&manifest).unwrap().is_empty());
    }

    #[test]
    fn read_scripts_returns_sorted_pairs() {
        let tmp = TempDir::new().unwrap();
        let manifest = write_manifest(
            tmp.path(),
            r#"{ "scripts": { "test": "vitest", "build": "vite build" } }"#,
        );
        let scripts = read_scripts(&manifest).unwrap();
        assert_eq!(
            scripts,
            vec![
                ("build".to_string(), "vite build".to_string()),
                ("test".to_string(), "vitest".to_string()),
            ]
        );
    }

    #[test]
    fn read_scripts_skips_non_string_values() {
        let tmp = TempDir::new().unwrap();
        let manifest = write_manifest(
            tmp.path(),
            r#"{ "scripts": { "build": "vite build", "weird": 42 } }"#,
        );
        let scripts = read_scripts(&manifest).unwrap();
        assert_eq!(
            scripts,
            vec![("build".to_string(), "vite build".to_string())]
        );
    }
}
