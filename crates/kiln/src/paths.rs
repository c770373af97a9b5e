//! Launcher path resolution — the directory containing the running binary anchors everything.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Absolute directory containing the running executable.
///
/// The executable path is canonicalized first, so a symlinked install
/// (e.g. `~/bin/kiln -> /opt/kiln/kiln`) anchors to the real location.
pub fn launcher_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("could not determine the running executable")?;
    let exe = exe
        .canonicalize()
        .with_context(|| format!("could not resolve {}", exe.display()))?;
    let dir = exe
        .parent()
        .with_context(|| format!("{} has no parent directory", exe.display()))?;
    Ok(dir.to_path_buf())
}

/// The directory the build runs in: the configured override, or the launcher directory.
pub fn resolve_project_dir(config: &Config, launcher_dir: &Path) -> PathBuf {
    match &config.project_dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => launcher_dir.join(dir),
        None => launcher_dir.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launcher_dir_is_absolute_and_exists() {
        let dir = launcher_dir().unwrap();
        assert!(dir.is_absolute());
        assert!(dir.is_dir());
    }

    #[test]
    fn launcher_dir_contains_current_exe() {
        let dir = launcher_dir().unwrap();
        let exe = std::env::current_exe().unwrap().canonicalize().unwrap();
        assert_eq!(exe.parent().unwrap(), dir);
    }

    #[test]
    fn resolve_defaults_to_launcher_dir() {
        let config = Config::default();
        let resolved = resolve_project_dir(&config, Path::new("/opt/kiln"));
        assert_eq!(resolved, PathBuf::from("/opt/kiln"));
    }

    #[test]
    fn resolve_keeps_absolute_override() {
        let config = Config {
            project_dir: Some(PathBuf::from("/srv/web")),
            ..Default::default()
        };
        let resolved = resolve_project_dir(&config, Path::new("/opt/kiln"));
        assert_eq!(resolved, PathBuf::from("/srv/web"));
    }

    #[test]
    fn resolve_joins_relative_override_to_launcher_dir() {
        let config = Config {
            project_dir: Some(PathBuf::from("../web")),
            ..Default::default()
        };
        let resolved = resolve_project_dir(&config, Path::new("/opt/kiln"));
        assert_eq!(resolved, PathBuf::from("/opt/kiln/../web"));
    }
}
