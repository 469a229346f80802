//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Application directory name under the XDG config root.
const APP_DIR: &str = "tmdbkit";

/// Resolves the config file path.
///
/// Lookup order:
/// 1. `{dir}/config.toml` when `dir` is given.
/// 2. `$XDG_CONFIG_HOME/tmdbkit/config.toml` when set and non-empty.
/// 3. `$HOME/.config/tmdbkit/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is usable
/// (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    resolve_with(
        dir.map(PathBuf::as_path),
        std::env::var("XDG_CONFIG_HOME").ok().as_deref(),
        std::env::var("HOME").ok().as_deref(),
    )
}

/// Environment-free core of [`resolve_config_path`].
fn resolve_with(
    dir: Option<&Path>,
    xdg_config_home: Option<&str>,
    home: Option<&str>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }
    if let Some(xdg) = xdg_config_home.filter(|v| !v.is_empty()) {
        return Ok(Path::new(xdg).join(APP_DIR).join(CONFIG_FILE));
    }
    match home.filter(|v| !v.is_empty()) {
        Some(h) => Ok(Path::new(h).join(".config").join(APP_DIR).join(CONFIG_FILE)),
        None => bail!("neither XDG_CONFIG_HOME nor HOME is set; pass --dir"),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_dir_takes_precedence() {
        // Arrange
        let dir = Path::new("/tmp/tmdbkit-project");

        // Act
        let path = resolve_with(Some(dir), Some("/xdg"), Some("/home/u")).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/tmdbkit-project/config.toml"));
    }

    #[test]
    fn test_xdg_config_home() {
        // Arrange & Act
        let path = resolve_with(None, Some("/xdg"), Some("/home/u")).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/xdg/tmdbkit/config.toml"));
    }

    #[test]
    fn test_empty_xdg_falls_back_to_home() {
        // Arrange & Act
        let path = resolve_with(None, Some(""), Some("/home/u")).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/home/u/.config/tmdbkit/config.toml"));
    }

    #[test]
    fn test_no_home_is_error() {
        // Arrange & Act
        let result = resolve_with(None, None, None);

        // Assert
        assert!(result.unwrap_err().to_string().contains("--dir"));
    }
}
