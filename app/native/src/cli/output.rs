//! CLI output formatting utilities.
//!
//! Colored JSON for machine-readable output and small helpers for tables.

use std::fmt::Write;

use colored::Colorize;
use serde_json::Value;

/// Indentation per nesting level.
const INDENT: &str = "  ";

/// Prints JSON with syntax highlighting.
///
/// Keys are cyan, strings green, numbers yellow, booleans and null magenta.
pub fn print_highlighted_json(value: &Value) { println!("{}", highlight_json(value)); }

/// Renders `value` as indented, colored JSON.
#[must_use]
pub fn highlight_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => {
            let _ = write!(out, "{}", "null".magenta());
        }
        Value::Bool(flag) => {
            let _ = write!(out, "{}", flag.to_string().magenta());
        }
        Value::Number(number) => {
            let _ = write!(out, "{}", number.to_string().yellow());
        }
        Value::String(text) => {
            let _ = write!(out, "{}", quoted(text).green());
        }
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push_str("[\n");
            for (index, item) in items.iter().enumerate() {
                out.push_str(&INDENT.repeat(depth + 1));
                write_value(out, item, depth + 1);
                close_entry(out, index + 1 == items.len());
            }
            out.push_str(&INDENT.repeat(depth));
            out.push(']');
        }
        Value::Object(map) => {
            if map.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push_str("{\n");
            for (index, (key, item)) in map.iter().enumerate() {
                out.push_str(&INDENT.repeat(depth + 1));
                let _ = write!(out, "{}: ", quoted(key).cyan());
                write_value(out, item, depth + 1);
                close_entry(out, index + 1 == map.len());
            }
            out.push_str(&INDENT.repeat(depth));
            out.push('}');
        }
    }
}

fn close_entry(out: &mut String, last: bool) {
    if !last {
        out.push(',');
    }
    out.push('\n');
}

/// JSON-escapes and quotes a string.
fn quoted(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}

/// Formats a boolean as a colored string.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}
