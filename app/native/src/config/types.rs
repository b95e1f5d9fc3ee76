//! Configuration types for Backdrop.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.
//! Every field is optional; missing fields take the defaults below.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constants::{
    APP_NAME, DEFAULT_GEOMETRY_COMMAND, DEFAULT_INTERVAL_SECS, DEFAULT_OUTPUT_PATH,
};
use crate::platform::path::{expand, expand_and_resolve};

/// Which directory entries count as candidate images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SourceFilter {
    /// Every entry is a candidate. A non-image entry fails the cycle that picks it.
    #[default]
    All,
    /// Only regular files with a known image extension are candidates.
    Images,
}

impl std::str::FromStr for SourceFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "images" => Ok(Self::Images),
            _ => Err(format!("Invalid filter '{s}'. Expected 'all' or 'images'.")),
        }
    }
}

/// Desktop background settings applied before the first cycle.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DesktopConfig {
    /// Whether to point the desktop background at the output file.
    /// Disable on desktops without GSettings.
    /// Default: true
    pub enabled: bool,

    /// GSettings schema holding the background keys.
    /// Default: "org.gnome.desktop.background"
    pub schema: String,

    /// Keys that receive the `file://` URI of the output file.
    /// Default: ["picture-uri", "picture-uri-dark"]
    pub uri_keys: Vec<String>,

    /// Value written to `picture-options`.
    /// Default: "spanned"
    pub picture_options: String,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            schema: "org.gnome.desktop.background".to_string(),
            uri_keys: vec!["picture-uri".to_string(), "picture-uri-dark".to_string()],
            picture_options: "spanned".to_string(),
        }
    }
}

/// Root configuration structure for Backdrop.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct BackdropConfig {
    /// Directory containing source images. Not searched recursively.
    /// Relative paths are resolved against the configuration file directory.
    pub source: String,

    /// Seconds between two backdrops.
    /// If set to 0, a single backdrop is built and the program exits.
    /// Default: 60
    pub interval: u64,

    /// Where the composed backdrop is written.
    /// The image format follows the file extension.
    /// Default: "/tmp/wallpaper.png"
    pub output: String,

    /// Which directory entries are candidates: "all" or "images".
    /// Default: "all"
    pub filter: SourceFilter,

    /// Seed for image selection. Unset picks a fresh seed per run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Command printing the screen layout in xrandr format.
    /// Default: "xrandr"
    pub geometry_command: String,

    /// Desktop background integration.
    pub desktop: DesktopConfig,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            source: String::new(),
            interval: DEFAULT_INTERVAL_SECS,
            output: DEFAULT_OUTPUT_PATH.to_string(),
            filter: SourceFilter::default(),
            seed: None,
            geometry_command: DEFAULT_GEOMETRY_COMMAND.to_string(),
            desktop: DesktopConfig::default(),
        }
    }
}

impl BackdropConfig {
    /// Returns the expanded source directory, if one is configured.
    #[must_use]
    pub fn source_dir(&self) -> Option<PathBuf> {
        let path = expand(&self.source);
        if path.as_os_str().is_empty() { None } else { Some(path) }
    }

    /// Returns the expanded output path, falling back to the default.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        let path = expand(&self.output);
        if path.as_os_str().is_empty() { PathBuf::from(DEFAULT_OUTPUT_PATH) } else { path }
    }

    /// Returns the wait between two cycles.
    #[must_use]
    pub const fn interval_duration(&self) -> Duration { Duration::from_secs(self.interval) }

    /// Resolves relative `source` and `output` paths against `base_dir`.
    fn resolve_relative_paths(&mut self, base_dir: &Path) {
        if !self.source.trim().is_empty() {
            self.source = expand_and_resolve(&self.source, base_dir).display().to_string();
        }
        if !self.output.trim().is_empty() {
            self.output = expand_and_resolve(&self.output, base_dir).display().to_string();
        }
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    NotFound,
    /// The configuration file exists but could not be read.
    IoError(std::io::Error),
    /// The configuration file contains invalid JSON.
    ParseError(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(
                f,
                "No configuration file found. Expected at ~/.config/{APP_NAME}/config.jsonc \
                or ~/.{APP_NAME}.json"
            ),
            Self::IoError(err) => write!(f, "Failed to read configuration file: {err}"),
            Self::ParseError(err) => write!(f, "Failed to parse configuration file: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            Self::ParseError(err) => Some(err),
            Self::NotFound => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err) }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self { Self::ParseError(err) }
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Single-file configuration names in the home directory.
const HOME_CONFIG_FILE_NAMES: &[&str] = &[".backdrop.jsonc", ".backdrop.json"];

/// Returns the possible configuration file paths in priority order.
///
/// 1. `$XDG_CONFIG_HOME/backdrop/config.jsonc` or `config.json`, if set
/// 2. `~/.config/backdrop/config.jsonc` or `config.json`
/// 3. the platform config directory (`dirs::config_dir()`), if different
/// 4. `~/.backdrop.jsonc` or `~/.backdrop.json`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let push_dir = |dir: PathBuf, paths: &mut Vec<PathBuf>| {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    };

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        push_dir(PathBuf::from(xdg_config).join(APP_NAME), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        push_dir(home.join(".config").join(APP_NAME), &mut paths);
    }

    if let Some(config_dir) = dirs::config_dir() {
        push_dir(config_dir.join(APP_NAME), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        for filename in HOME_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Loads and parses a configuration file.
///
/// Comments are stripped before parsing. Relative paths inside the file are
/// resolved against the file's directory.
///
/// # Errors
///
/// Returns `ConfigError::IoError` if the file cannot be read and
/// `ConfigError::ParseError` if it is not valid JSONC.
pub fn load_config_from_path(path: &Path) -> Result<BackdropConfig, ConfigError> {
    let file = fs::File::open(path)?;
    let reader = json_comments::StripComments::new(file);
    let mut config: BackdropConfig = serde_json::from_reader(reader)?;

    if let Some(base_dir) = path.parent() {
        config.resolve_relative_paths(base_dir);
    }

    Ok(config)
}

/// Loads the configuration from the first available config file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of
/// the expected locations, or the errors of [`load_config_from_path`].
pub fn load_config() -> Result<(BackdropConfig, PathBuf), ConfigError> {
    for path in config_paths() {
        if path.exists() {
            let config = load_config_from_path(&path)?;
            return Ok((config, path));
        }
    }

    Err(ConfigError::NotFound)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = BackdropConfig::default();
        assert!(config.source.is_empty());
        assert_eq!(config.interval, 60);
        assert_eq!(config.output, "/tmp/wallpaper.png");
        assert_eq!(config.filter, SourceFilter::All);
        assert!(config.seed.is_none());
        assert_eq!(config.geometry_command, "xrandr");
        assert!(config.desktop.enabled);
        assert_eq!(config.desktop.picture_options, "spanned");
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: BackdropConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.interval, 60);
        assert_eq!(config.desktop.uri_keys, vec!["picture-uri", "picture-uri-dark"]);
    }

    #[test]
    fn test_config_deserializes_camel_case() {
        let json = r#"{
            "source": "/srv/walls",
            "interval": 300,
            "filter": "images",
            "seed": 7,
            "geometryCommand": "xrandr --current",
            "desktop": { "enabled": false, "uriKeys": ["picture-uri"] }
        }"#;
        let config: BackdropConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.source, "/srv/walls");
        assert_eq!(config.interval, 300);
        assert_eq!(config.filter, SourceFilter::Images);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.geometry_command, "xrandr --current");
        assert!(!config.desktop.enabled);
        assert_eq!(config.desktop.uri_keys, vec!["picture-uri"]);
        assert_eq!(config.desktop.schema, "org.gnome.desktop.background");
    }

    #[test]
    fn test_source_filter_from_str() {
        assert_eq!("all".parse::<SourceFilter>().unwrap(), SourceFilter::All);
        assert_eq!("IMAGES".parse::<SourceFilter>().unwrap(), SourceFilter::Images);
        assert!("png".parse::<SourceFilter>().is_err());
    }

    #[test]
    fn test_source_dir_empty_is_none() {
        assert!(BackdropConfig::default().source_dir().is_none());

        let config = BackdropConfig {
            source: "/srv/walls".to_string(),
            ..Default::default()
        };
        assert_eq!(config.source_dir(), Some(PathBuf::from("/srv/walls")));
    }

    #[test]
    fn test_output_path_falls_back_to_default() {
        let config = BackdropConfig {
            output: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.output_path(), PathBuf::from("/tmp/wallpaper.png"));
    }

    #[test]
    fn test_interval_duration() {
        let config = BackdropConfig {
            interval: 5,
            ..Default::default()
        };
        assert_eq!(config.interval_duration(), Duration::from_secs(5));
    }

    #[test]
    fn test_load_config_from_path_with_comments() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.jsonc");

        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "// backdrop settings").unwrap();
        writeln!(file, "{{").unwrap();
        writeln!(file, "  /* every two minutes */").unwrap();
        writeln!(file, "  \"interval\": 120,").unwrap();
        writeln!(file, "  \"source\": \"/srv/walls\"").unwrap();
        writeln!(file, "}}").unwrap();

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.interval, 120);
        assert_eq!(config.source, "/srv/walls");
    }

    #[test]
    fn test_load_config_resolves_relative_paths() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "source": "walls", "output": "out/backdrop.png" }"#).unwrap();

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(PathBuf::from(&config.source), temp_dir.path().join("walls"));
        assert_eq!(config.output_path(), temp_dir.path().join("out/backdrop.png"));
    }

    #[test]
    fn test_load_config_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ \"interval\": \"soon\" }").unwrap();

        let err = load_config_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err =
            load_config_from_path(Path::new("/nonexistent/backdrop/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_config_paths_end_with_home_files() {
        let paths = config_paths();
        if dirs::home_dir().is_some() {
            let last = paths.last().unwrap();
            assert!(last.to_string_lossy().ends_with(".backdrop.json"));
        }
        assert!(paths.iter().all(|p| p.to_string_lossy().contains("backdrop")));
    }

    #[test]
    fn test_config_error_not_found_message() {
        let msg = ConfigError::NotFound.to_string();
        assert!(msg.contains("No configuration file found"));
    }
}
