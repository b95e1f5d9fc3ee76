//! Configuration module for Backdrop.
//!
//! This module provides configuration types, loading, and template generation.
//! The configuration file supports JSONC format (JSON with comments).

pub mod template;
pub mod types;

use std::path::{Path, PathBuf};

pub use types::{
    BackdropConfig, ConfigError, DesktopConfig, SourceFilter, config_paths, load_config,
    load_config_from_path,
};

/// A configuration together with the file it came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: BackdropConfig,
    pub path: Option<PathBuf>,
}

/// Loads the configuration.
///
/// With a custom path, that file must exist and parse. Without one, the
/// default locations are searched; a missing file yields defaults and an
/// unreadable one logs a warning and yields defaults.
///
/// # Errors
///
/// Returns an error only for problems with an explicitly requested file.
pub fn load(custom_path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    if let Some(path) = custom_path {
        if !path.exists() {
            return Err(ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }
        let config = load_config_from_path(path)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        return Ok(LoadedConfig { config, path: Some(path.to_path_buf()) });
    }

    match load_config() {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "loaded configuration");
            Ok(LoadedConfig { config, path: Some(path) })
        }
        Err(ConfigError::NotFound) => {
            tracing::debug!("no configuration file found, using defaults");
            Ok(LoadedConfig::default())
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load configuration, using defaults");
            Ok(LoadedConfig::default())
        }
    }
}

/// Returns the preferred location for a new configuration file.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> { config_paths().into_iter().next() }

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_load_custom_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.json");
        fs::write(&path, r#"{ "interval": 15 }"#).unwrap();

        let loaded = load(Some(&path)).unwrap();
        assert_eq!(loaded.config.interval, 15);
        assert_eq!(loaded.path, Some(path));
    }

    #[test]
    fn test_load_missing_custom_path_is_error() {
        let err = load(Some(Path::new("/nonexistent/backdrop.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_load_invalid_custom_path_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(load(Some(&path)), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_default_config_path_is_jsonc() {
        if let Some(path) = default_config_path() {
            assert!(path.to_string_lossy().ends_with("config.jsonc"));
        }
    }
}
