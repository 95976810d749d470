//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;

use chordal::config::LayoutConfig;

use crate::error::{CliError, ConfigError};

/// Top-level CLI configuration.
///
/// ```toml
/// [layout]
/// padding = 0.05
/// sort_groups = "descending"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (chordal/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CliError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("chordal/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(system_config) = system_config_path() {
        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }
        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn system_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "chordal", "chordal")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

/// Load configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, CliError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use chordal::order::SortOrder;

    use super::*;

    #[test]
    fn test_load_explicit_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[layout]\npadding = 0.25\nsort_groups = \"ascending\"").unwrap();

        let config = load_config(Some(file.path())).unwrap();

        assert_eq!(config.layout().padding(), 0.25);
        assert_eq!(config.layout().sort_groups(), Some(SortOrder::Ascending));
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = load_config(Some(&path)).unwrap_err();

        assert!(matches!(
            err,
            CliError::Config(ConfigError::MissingFile(_))
        ));
    }

    #[test]
    fn test_malformed_config_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[layout]\npadding = \"wide\"").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();

        assert!(matches!(err, CliError::Config(ConfigError::Parse(_))));
    }
}
