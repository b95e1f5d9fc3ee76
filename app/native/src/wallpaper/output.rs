//! Writing the composed canvas to disk.

use std::fs::{self, Permissions};
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, RgbImage};
use tempfile::NamedTempFile;

use crate::error::BackdropError;

/// Picks the encoder from the file extension, defaulting to PNG.
#[must_use]
pub fn output_format(path: &Path) -> ImageFormat {
    ImageFormat::from_path(path)
        .ok()
        .filter(|format| format.writing_enabled())
        .unwrap_or(ImageFormat::Png)
}

/// Saves `canvas` at `path`, replacing any previous file atomically.
///
/// The image is encoded into a temporary file next to `path` and renamed over
/// it, so readers never observe a half-written backdrop.
///
/// # Errors
///
/// Returns [`BackdropError::ImageSave`] if the directory cannot be created or
/// the image cannot be encoded or moved into place.
pub fn save_canvas(canvas: &RgbImage, path: &Path) -> Result<(), BackdropError> {
    let save_error = |reason: String| BackdropError::ImageSave {
        path: path.to_path_buf(),
        reason,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|err| save_error(err.to_string()))?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|err| save_error(err.to_string()))?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        canvas
            .write_to(&mut writer, output_format(path))
            .map_err(|err| save_error(err.to_string()))?;
        writer.flush().map_err(|err| save_error(err.to_string()))?;
    }

    if let Some(permissions) = target_permissions(path) {
        temp.as_file().set_permissions(permissions).map_err(|err| save_error(err.to_string()))?;
    }

    temp.persist(path).map_err(|err| save_error(err.error.to_string()))?;
    tracing::debug!(path = %path.display(), "backdrop written");
    Ok(())
}

/// Mode for the written file: the existing file's, or world-readable for a
/// new one. Temporary files start out owner-only.
fn target_permissions(path: &Path) -> Option<Permissions> {
    if let Ok(metadata) = fs::metadata(path) {
        return Some(metadata.permissions());
    }
    default_permissions()
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
const fn default_permissions() -> Option<Permissions> { None }
