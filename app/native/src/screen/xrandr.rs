//! Screen layout detection through `xrandr`.
//!
//! Only connected outputs with an active mode carry a geometry, e.g.
//! `DP-1 connected primary 2560x1440+1920+0 (normal left inverted ...) ...`.
//! Disconnected outputs and connected outputs without a mode are skipped.

use std::process::Command;

use regex::Regex;
use serde::Serialize;

use super::geometry::{GeometryRecord, ScreenSet};
use crate::error::BackdropError;

/// Matches `<name> connected [primary ]WxH+X+Y` at the start of a line.
const SCREEN_PATTERN: &str =
    r"(?m)^([^ \t\r\n]+) connected (primary )?([0-9]+)x([0-9]+)\+([0-9]+)\+([0-9]+)";

/// A connected output reported by the display query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedScreen {
    /// Output name, e.g. `HDMI-1`.
    pub name: String,
    /// Whether the output is flagged as primary.
    pub primary: bool,
    /// Placement in the virtual screen space.
    pub geometry: GeometryRecord,
}

/// Parses the text output of `xrandr` into detected screens.
///
/// Screens are returned in the order they appear in the output.
///
/// # Errors
///
/// Returns [`BackdropError::InvalidGeometry`] if a matched line carries a
/// number that does not fit in `u32` or an empty dimension.
pub fn parse_screens(output: &str) -> Result<Vec<DetectedScreen>, BackdropError> {
    let pattern = Regex::new(SCREEN_PATTERN)
        .map_err(|err| BackdropError::GeometryQuery(format!("invalid screen pattern: {err}")))?;

    pattern
        .captures_iter(output)
        .map(|caps| {
            let number = |index: usize| -> Result<u32, BackdropError> {
                let raw = &caps[index];
                raw.parse::<u32>().map_err(|_| {
                    BackdropError::InvalidGeometry(format!("value out of range: {raw}"))
                })
            };

            let geometry = GeometryRecord::new(number(5)?, number(6)?, number(3)?, number(4)?)?;

            Ok(DetectedScreen {
                name: caps[1].to_string(),
                primary: caps.get(2).is_some(),
                geometry,
            })
        })
        .collect()
}

/// Runs the geometry command and parses its output.
///
/// `command` is split on whitespace; the first word is the program.
///
/// # Errors
///
/// Returns [`BackdropError::GeometryQuery`] if the command is empty, cannot
/// be spawned, or exits unsuccessfully.
pub fn query_screens(command: &str) -> Result<Vec<DetectedScreen>, BackdropError> {
    let mut words = command.split_whitespace();
    let program = words
        .next()
        .ok_or_else(|| BackdropError::GeometryQuery("geometry command is empty".to_string()))?;

    let output = Command::new(program)
        .args(words)
        .output()
        .map_err(|err| BackdropError::GeometryQuery(format!("failed to run {program}: {err}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BackdropError::GeometryQuery(format!(
            "{program} exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let screens = parse_screens(&stdout)?;
    tracing::debug!(command, count = screens.len(), "queried screen layout");
    Ok(screens)
}

/// Builds the screen set for one cycle from detected screens.
///
/// # Errors
///
/// Returns [`BackdropError::NoScreensDetected`] if `detected` is empty.
pub fn screen_set(detected: &[DetectedScreen]) -> Result<ScreenSet, BackdropError> {
    ScreenSet::new(detected.iter().map(|s| s.geometry).collect())
}

/// Queries the layout and builds the screen set in one step.
///
/// # Errors
///
/// Propagates [`query_screens`] errors and fails with
/// [`BackdropError::NoScreensDetected`] when nothing is connected.
pub fn detect(command: &str) -> Result<ScreenSet, BackdropError> {
    screen_set(&query_screens(command)?)
}
