//! Screen layout: geometry types and detection.

pub mod geometry;
pub mod xrandr;

pub use geometry::{CanvasBounds, GeometryRecord, ScreenSet};
pub use xrandr::{DetectedScreen, detect, parse_screens, query_screens, screen_set};

use crate::error::BackdropError;

/// Anything that can report the current screen layout.
pub trait ScreenSource {
    /// Returns the screens connected right now.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError::NoScreensDetected`] when nothing is connected,
    /// or a source-specific error when the layout cannot be read.
    fn screens(&self) -> Result<ScreenSet, BackdropError>;
}

/// Reads the layout by running an xrandr-compatible command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XrandrCommand {
    command: String,
}

impl XrandrCommand {
    /// Wraps a command line such as `xrandr --current`.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self { Self { command: command.into() } }
}

impl ScreenSource for XrandrCommand {
    fn screens(&self) -> Result<ScreenSet, BackdropError> { detect(&self.command) }
}

/// A fixed layout, as used when the screens are known up front.
impl ScreenSource for ScreenSet {
    fn screens(&self) -> Result<ScreenSet, BackdropError> { Ok(self.clone()) }
}

impl<F> ScreenSource for F
where
    F: Fn() -> Result<ScreenSet, BackdropError>,
{
    fn screens(&self) -> Result<ScreenSet, BackdropError> { self() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_layout_source() {
        let set = ScreenSet::new(vec![GeometryRecord::new(0, 0, 800, 600).unwrap()]).unwrap();
        assert_eq!(set.screens().unwrap(), set);
    }

    #[test]
    fn test_closure_source() {
        let source =
            || -> Result<ScreenSet, BackdropError> { Err(BackdropError::NoScreensDetected) };
        assert!(matches!(source.screens(), Err(BackdropError::NoScreensDetected)));
    }

    #[test]
    fn test_xrandr_command_source_without_screens() {
        // `true` prints nothing, so no screen line matches.
        let err = XrandrCommand::new("true").screens().unwrap_err();
        assert!(matches!(err, BackdropError::NoScreensDetected));
    }

    #[test]
    fn test_xrandr_command_source_with_echo() {
        let set = XrandrCommand::new("echo DP-1 connected 1280x1024+0+0").screens().unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.bounds(), CanvasBounds { width: 1280, height: 1024 });
    }
}
