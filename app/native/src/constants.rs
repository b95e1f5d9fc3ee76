//! Application-wide constants.

/// Name used for the binary, config directory and log prefix.
pub const APP_NAME: &str = "backdrop";

/// Where the composed backdrop is written unless configured otherwise.
///
/// The desktop background setting points at this file, so it must stay stable
/// across cycles.
pub const DEFAULT_OUTPUT_PATH: &str = "/tmp/wallpaper.png";

/// Seconds between two build cycles.
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Command queried for the current screen layout.
pub const DEFAULT_GEOMETRY_COMMAND: &str = "xrandr";

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV_VAR: &str = "BACKDROP_LOG";
