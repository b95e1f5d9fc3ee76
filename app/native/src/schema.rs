//! JSON Schema for the configuration file.

use crate::config::BackdropConfig;

/// Returns the configuration schema as pretty-printed JSON.
#[must_use]
pub fn print_schema() -> String {
    let schema = schemars::schema_for!(BackdropConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
}
