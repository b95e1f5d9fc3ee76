//! Config CLI commands.
//!
//! Commands for managing the Backdrop configuration file.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use colored::Colorize;

use crate::cli::output;
use crate::config::template::{create_config_file, generate_config_template};
use crate::config::{self, config_paths, default_config_path};
use crate::error::BackdropError;

/// Config management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Initialize a new configuration file with all options documented.
    ///
    /// Creates a new configuration file at the default location with all
    /// available options commented out.
    #[command(
        name = "init",
        after_long_help = r#"Examples:
  backdrop config init              # Create config at default location
  backdrop config init --force      # Overwrite existing config
  backdrop config init --path ~/my-config.jsonc  # Create at custom path
  backdrop config init --stdout     # Print template to stdout"#
    )]
    Init {
        /// Overwrite existing configuration file if it exists.
        #[arg(long, short)]
        force: bool,

        /// Custom path for the configuration file.
        /// If not specified, uses ~/.config/backdrop/config.jsonc
        #[arg(long, short, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Print the configuration template to stdout instead of writing to a file.
        #[arg(long)]
        stdout: bool,
    },

    /// Show the path to the configuration file.
    ///
    /// Displays the paths where Backdrop looks for configuration files,
    /// and indicates which one is currently in use (if any).
    Path,

    /// Show the effective configuration as JSON.
    Show,
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cmd: &ConfigCommands, custom_path: Option<&Path>) -> Result<(), BackdropError> {
    match cmd {
        ConfigCommands::Init { force, path, stdout } => {
            if *stdout {
                println!("{}", generate_config_template());
                Ok(())
            } else {
                let target = path.clone().or_else(|| custom_path.map(Path::to_path_buf));
                let created = init_config(*force, target)?;
                println!("Configuration file created at: {}", created.display());
                println!("\nAll options are commented out by default.");
                println!("Edit the file and uncomment the options you want to configure.");
                Ok(())
            }
        }
        ConfigCommands::Path => {
            show_config_path();
            Ok(())
        }
        ConfigCommands::Show => show_config(custom_path),
    }
}

/// Writes the template and returns where it went.
fn init_config(force: bool, custom_path: Option<PathBuf>) -> Result<PathBuf, BackdropError> {
    let config_path = custom_path
        .or_else(default_config_path)
        .unwrap_or_else(|| PathBuf::from("config.jsonc"));

    if config_path.exists() && !force {
        return Err(BackdropError::InvalidArguments(format!(
            "Configuration file already exists at: {}\nUse --force to overwrite.",
            config_path.display()
        )));
    }

    create_config_file(&config_path)?;
    Ok(config_path)
}

/// Show the configuration file search paths.
fn show_config_path() {
    println!("Configuration file search paths (in priority order):\n");

    let mut found_config = false;
    for (i, path) in config_paths().iter().enumerate() {
        let exists = path.exists();
        let marker = if exists && !found_config {
            found_config = true;
            " (active)".green().to_string()
        } else if exists {
            " (exists)".dimmed().to_string()
        } else {
            String::new()
        };

        println!("  {}. {}{marker}", i + 1, path.display());
    }

    if !found_config {
        println!("\nNo configuration file found.");
        println!("Run 'backdrop config init' to create one.");
    }
}

/// Print the configuration after defaults and path resolution.
fn show_config(custom_path: Option<&Path>) -> Result<(), BackdropError> {
    let loaded = config::load(custom_path)?;
    match &loaded.path {
        Some(path) => println!("{} {}", "Loaded from".dimmed(), path.display()),
        None => println!("{}", "No configuration file, showing defaults".dimmed()),
    }

    let value = serde_json::to_value(&loaded.config).unwrap_or_default();
    output::print_highlighted_json(&value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_config_paths_returns_non_empty() {
        let paths = config_paths();
        // Should have at least one path (unless no HOME directory)
        assert!(!paths.is_empty() || std::env::var("HOME").is_err());
    }

    #[test]
    fn test_init_config_writes_template() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("backdrop/config.jsonc");

        let created = init_config(false, Some(path.clone())).unwrap();
        assert_eq!(created, path);
        assert!(std::fs::read_to_string(&path).unwrap().contains("geometryCommand"));
    }

    #[test]
    fn test_init_config_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.jsonc");
        std::fs::write(&path, "{}").unwrap();

        let err = init_config(false, Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");

        init_config(true, Some(path.clone())).unwrap();
        assert_ne!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_show_config_custom_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "interval": 30 }"#).unwrap();

        show_config(Some(&path)).unwrap();
    }

    #[test]
    fn test_show_config_missing_custom_path() {
        let err = show_config(Some(Path::new("/nonexistent/config.json"))).unwrap_err();
        assert!(matches!(err, BackdropError::Config(_)));
    }
}
