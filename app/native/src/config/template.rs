//! Configuration template generation.
//!
//! Generates a commented configuration template with all available options.

use std::fs;
use std::path::Path;

/// Generates a configuration template with all options commented out.
#[must_use]
pub fn generate_config_template() -> String {
    r#"// Backdrop Configuration File
// ===========================
// This file uses JSONC format (JSON with comments).
// All options below are commented out and show their default values.
// Uncomment and modify the options you want to configure.

{
  // Directory containing the source images (not searched recursively).
  // Relative paths are resolved against this file's directory.
  // "source": "~/Pictures/Wallpapers",

  // Seconds between two backdrops (0 = build once and exit)
  // "interval": 60,

  // Where the composed backdrop is written (format follows the extension)
  // "output": "/tmp/wallpaper.png",

  // Which directory entries are candidates:
  //   "all"    - every entry (a non-image file fails the cycle that picks it)
  //   "images" - only files with a known image extension
  // "filter": "all",

  // Fixed seed for reproducible image picks (omit for a fresh seed per run)
  // "seed": 42,

  // Command printing the screen layout in xrandr format
  // "geometryCommand": "xrandr",

  // Desktop background integration (GSettings)
  // "desktop": {
  //   "enabled": true,
  //   "schema": "org.gnome.desktop.background",
  //   "uriKeys": ["picture-uri", "picture-uri-dark"],
  //   "pictureOptions": "spanned"
  // }
}
"#
    .to_string()
}

/// Creates a configuration file with the template at the specified path.
///
/// Creates parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, generate_config_template())
}
