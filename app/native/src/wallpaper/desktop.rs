//! Points the desktop background at the output file through GSettings.

use std::path::Path;
use std::process::Command;

use crate::config::DesktopConfig;
use crate::error::BackdropError;

/// The GSettings command line tool.
const GSETTINGS: &str = "gsettings";

/// Key receiving [`DesktopConfig::picture_options`].
const PICTURE_OPTIONS_KEY: &str = "picture-options";

/// Returns the `file://` URI of `path`, made absolute first.
///
/// # Errors
///
/// Returns [`BackdropError::Desktop`] if the path is not valid UTF-8 or cannot
/// be made absolute.
pub fn file_uri(path: &Path) -> Result<String, BackdropError> {
    let absolute = std::path::absolute(path)
        .map_err(|err| BackdropError::Desktop(format!("{}: {err}", path.display())))?;
    let path = absolute.to_str().ok_or_else(|| {
        BackdropError::Desktop(format!("{} is not valid UTF-8", absolute.display()))
    })?;
    Ok(format!("file://{path}"))
}

/// Returns the `(key, value)` pairs written to the configured schema.
///
/// # Errors
///
/// Returns the errors of [`file_uri`].
pub fn settings(
    config: &DesktopConfig,
    output: &Path,
) -> Result<Vec<(String, String)>, BackdropError> {
    let uri = file_uri(output)?;
    let mut pairs: Vec<_> = config.uri_keys.iter().map(|key| (key.clone(), uri.clone())).collect();
    if !config.picture_options.is_empty() {
        pairs.push((PICTURE_OPTIONS_KEY.to_string(), config.picture_options.clone()));
    }
    Ok(pairs)
}

/// Writes the background settings with `gsettings set`.
///
/// # Errors
///
/// Returns [`BackdropError::Desktop`] if a setting cannot be written.
pub fn apply(config: &DesktopConfig, output: &Path) -> Result<(), BackdropError> {
    apply_with(GSETTINGS, config, output)
}

/// Same as [`apply`] with a different settings program.
fn apply_with(program: &str, config: &DesktopConfig, output: &Path) -> Result<(), BackdropError> {
    for (key, value) in settings(config, output)? {
        let status = Command::new(program)
            .args(["set", &config.schema, &key, &value])
            .status()
            .map_err(|err| BackdropError::Desktop(format!("failed to run {program}: {err}")))?;

        if !status.success() {
            return Err(BackdropError::Desktop(format!(
                "{program} set {} {key} exited with {status}",
                config.schema
            )));
        }
        tracing::debug!(
            schema = %config.schema,
            key = %key,
            value = %value,
            "desktop setting applied"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_uri_absolute() {
        assert_eq!(file_uri(Path::new("/tmp/wallpaper.png")).unwrap(), "file:///tmp/wallpaper.png");
    }

    #[test]
    fn test_file_uri_relative_is_made_absolute() {
        let uri = file_uri(Path::new("wallpaper.png")).unwrap();
        assert!(uri.starts_with("file:///"));
        assert!(uri.ends_with("/wallpaper.png"));
    }

    #[test]
    fn test_settings_default_keys() {
        let pairs = settings(&DesktopConfig::default(), Path::new("/tmp/wallpaper.png")).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("picture-uri".to_string(), "file:///tmp/wallpaper.png".to_string()),
                ("picture-uri-dark".to_string(), "file:///tmp/wallpaper.png".to_string()),
                ("picture-options".to_string(), "spanned".to_string()),
            ]
        );
    }

    #[test]
    fn test_settings_without_picture_options() {
        let config = DesktopConfig {
            uri_keys: vec!["picture-uri".to_string()],
            picture_options: String::new(),
            ..Default::default()
        };
        let pairs = settings(&config, Path::new("/tmp/wallpaper.png")).unwrap();
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_apply_with_succeeding_program() {
        apply_with("true", &DesktopConfig::default(), Path::new("/tmp/wallpaper.png")).unwrap();
    }

    #[test]
    fn test_apply_with_failing_program() {
        let err = apply_with("false", &DesktopConfig::default(), Path::new("/tmp/wallpaper.png"))
            .unwrap_err();
        assert!(matches!(err, BackdropError::Desktop(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_apply_with_missing_program() {
        let err = apply_with(
            "backdrop-no-such-program",
            &DesktopConfig::default(),
            Path::new("/tmp/wallpaper.png"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to run"));
    }
}
