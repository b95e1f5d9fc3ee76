//! Error types for Backdrop.
//!
//! A single error enum covers the whole build pipeline. Variants are split into
//! errors that only abort the current cycle and errors that end the run, see
//! [`BackdropError::is_fatal`].

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while building or applying a backdrop.
#[derive(Debug, Error)]
pub enum BackdropError {
    /// The source directory has no candidate images.
    #[error("No candidate images in {}", .0.display())]
    EmptySourceDirectory(PathBuf),

    /// The source path does not exist or is not a directory.
    #[error("Invalid source directory: {}", .0.display())]
    InvalidPath(PathBuf),

    /// A selected file could not be opened or decoded as an image.
    #[error("Failed to load image {}: {reason}", .path.display())]
    ImageLoad {
        /// The file that failed to load.
        path: PathBuf,
        /// Decoder or I/O error message.
        reason: String,
    },

    /// The composed canvas could not be written.
    #[error("Failed to save backdrop to {}: {reason}", .path.display())]
    ImageSave {
        /// The output path.
        path: PathBuf,
        /// Encoder or I/O error message.
        reason: String,
    },

    /// The geometry source reported no connected screens.
    #[error("No screens detected")]
    NoScreensDetected,

    /// A screen has an unusable size.
    #[error("Invalid screen geometry: {0}")]
    InvalidGeometry(String),

    /// The display query command could not be run.
    #[error("Screen query failed: {0}")]
    GeometryQuery(String),

    /// Updating the desktop background setting failed.
    #[error("Desktop setting error: {0}")]
    Desktop(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackdropError {
    /// Returns whether this error should end the run instead of just the cycle.
    ///
    /// Geometry errors only end a run when they happen at startup; once the
    /// loop is running a failed layout query keeps the previous layout.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NoScreensDetected
                | Self::InvalidGeometry(_)
                | Self::GeometryQuery(_)
                | Self::Desktop(_)
                | Self::Config(_)
                | Self::InvalidArguments(_)
        )
    }
}
