//! TOML configuration loading, saving, and validation. Handles tilde expansion and default paths.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the launcher-local config, looked up next to the binary.
pub const LOCAL_CONFIG_NAME: &str = "kiln.toml";

/// Top-level configuration for kiln.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Executable invoked as `<package_manager> run <script>`
    #[serde(default = "defaults::package_manager")]
    pub package_manager: String,

    /// Script name passed to the package manager's `run` subcommand
    #[serde(default = "defaults::script")]
    pub script: String,

    /// Extra arguments appended verbatim after the script name
    #[serde(default)]
    pub args: Vec<String>,

    /// Where the build runs — defaults to the directory containing the launcher.
    /// Relative values resolve against the launcher directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_dir: Option<PathBuf>,
}

impl Config {
    /// Load config from file, or return defaults if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let mut config: Config = toml::from_str(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            config.expand_tildes()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Load from CLI-provided path, the launcher-local file, or the default location.
    pub fn load_or_default(cli_path: Option<&Path>, launcher_dir: &Path) -> Result<Self> {
        let path = resolved_config_path(cli_path, launcher_dir)?;
        Self::load(&path)
    }

    /// Save config to file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("failed to serialize config")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(path, &content)
            .with_context(|| format!("failed to write {}", path.display()))
    }

    /// Validate config for common misconfigurations.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.package_manager.trim().is_empty(),
            "package_manager cannot be empty"
        );
        anyhow::ensure!(!self.script.trim().is_empty(), "script cannot be empty");

        for arg in &self.args {
            anyhow::ensure!(!arg.trim().is_empty(), "args entries cannot be empty");
        }

        // project_dir exists but is a file, not a directory
        if let Some(dir) = &self.project_dir {
            if dir.exists() && !dir.is_dir() {
                anyhow::bail!("project_dir exists but is not a directory: {}", dir.display());
            }
        }

        Ok(())
    }

    /// The full command line this config launches, for display.
    pub fn command_line(&self) -> String {
        let mut parts = vec![
            self.package_manager.clone(),
            "run".to_string(),
            self.script.clone(),
        ];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    /// Expand `~` in all path fields.
    fn expand_tildes(&mut self) -> Result<()> {
        if let Some(ref mut dir) = self.project_dir {
            *dir = expand_tilde(dir)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package_manager: defaults::package_manager(),
            script: defaults::script(),
            args: Vec::new(),
            project_dir: None,
        }
    }
}

/// Resolve which config file is in effect: explicit flag, launcher-local file, or user default.
pub fn resolved_config_path(cli_path: Option<&Path>, launcher_dir: &Path) -> Result<PathBuf> {
    if let Some(p) = cli_path {
        return Ok(p.to_path_buf());
    }

    let local = launcher_dir.join(LOCAL_CONFIG_NAME);
    if local.exists() {
        return Ok(local);
    }

    default_config_path()
}

/// Expand `~` prefix to the user's home directory.
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    if let Ok(stripped) = path.strip_prefix("~") {
        Ok(dirs::home_dir()
            .context("could not determine home directory")?
            .join(stripped))
    } else {
        Ok(path.to_path_buf())
    }
}

/// Default config file path: ~/.config/kiln/config.toml
pub fn default_config_path() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .context("could not determine home directory")?
        .join(".config")
        .join("kiln")
        .join("config.toml"))
}

mod defaults {
    pub fn package_manager() -> String {
        "npm".to_string()
    }

    pub fn script() -> String {
        "build".to_string()
    }
}
