//! CLI command definitions using Clap.
//!
//! This module defines all CLI commands and their arguments, organized into
//! domain-specific submodules:
//!
//! - `build` - `run` and `once`, the backdrop builders
//! - `config_cmd` - Configuration file management commands
//! - `screens` - Screen layout listing

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::config::{self, LoadedConfig};
use crate::constants::APP_NAME;
use crate::error::BackdropError;
use crate::schema;

pub mod build;
pub mod config_cmd;
pub mod screens;

pub use build::{BuildArgs, OnceArgs, RunArgs};
pub use config_cmd::ConfigCommands;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backdrop - spans a random collage of images across every connected monitor.
#[derive(Parser, Debug)]
#[command(name = "backdrop")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug details (overridden by the `BACKDROP_LOG` variable).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Build a backdrop now and rebuild it every INTERVAL seconds.
    ///
    /// Runs until interrupted with Ctrl-C or SIGTERM. An interval of 0 builds
    /// a single backdrop and exits.
    #[command(after_long_help = r#"Examples:
  backdrop run ~/Pictures/Wallpapers          # New backdrop every 60 seconds
  backdrop run ~/Pictures/Wallpapers 300      # Every five minutes
  backdrop run --seed 7 --no-desktop ./walls  # Reproducible, file only"#)]
    Run(RunArgs),

    /// Build a single backdrop and exit.
    Once(OnceArgs),

    /// List the connected screens and their placement.
    Screens {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Configuration file management commands.
    ///
    /// Initialize, view, and manage the configuration file.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Output Backdrop configuration JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// configuration file. Can be redirected to a file for use with editors
    /// that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    ///
    /// Usage:
    ///   eval "$(backdrop completions --shell zsh)"
    ///   backdrop completions --shell fish > ~/.config/fish/completions/backdrop.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Returns whether debug logging was requested.
    #[must_use]
    pub const fn verbose(&self) -> bool { self.verbose }

    /// Loads the configuration, honoring `--config`.
    fn load_config(&self) -> Result<LoadedConfig, BackdropError> {
        Ok(config::load(self.config.as_deref())?)
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), BackdropError> {
        match &self.command {
            Commands::Run(args) => build::execute_run(args, self.load_config()?),
            Commands::Once(args) => build::execute_once(args, self.load_config()?),
            Commands::Screens { json } => screens::execute(*json, &self.load_config()?.config),
            Commands::Config(cmd) => config_cmd::execute(cmd, self.config.as_deref()),

            Commands::Schema => {
                println!("{}", schema::print_schema());
                Ok(())
            }

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, APP_NAME, &mut io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceFilter;

    // ========================================================================
    // CLI parsing tests
    // ========================================================================

    #[test]
    fn test_cli_definition_is_valid() { Cli::command().debug_assert(); }

    #[test]
    fn test_cli_parses_run_positionals() {
        let cli = Cli::try_parse_from(["backdrop", "run", "/srv/walls", "300"]).unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.source.as_deref(), Some("/srv/walls"));
                assert_eq!(args.interval, Some(300));
                assert!(!args.build.no_desktop);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_run_without_arguments() {
        let cli = Cli::try_parse_from(["backdrop", "run"]).unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert!(args.source.is_none());
                assert!(args.interval.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "backdrop",
            "run",
            "walls",
            "--output",
            "/tmp/out.jpg",
            "--seed",
            "9",
            "--filter",
            "images",
            "--no-desktop",
        ])
        .unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.build.output.as_deref(), Some("/tmp/out.jpg"));
                assert_eq!(args.build.seed, Some(9));
                assert_eq!(args.build.filter, Some(SourceFilter::Images));
                assert!(args.build.no_desktop);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_non_numeric_interval() {
        assert!(Cli::try_parse_from(["backdrop", "run", "walls", "soon"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_filter() {
        assert!(Cli::try_parse_from(["backdrop", "once", "--filter", "png"]).is_err());
    }

    #[test]
    fn test_cli_parses_once() {
        let cli = Cli::try_parse_from(["backdrop", "once", "walls"]).unwrap();
        let Commands::Once(args) = cli.command else { panic!("expected once") };
        assert_eq!(args.source.as_deref(), Some("walls"));
    }

    #[test]
    fn test_cli_parses_screens_json() {
        let cli = Cli::try_parse_from(["backdrop", "screens", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Screens { json: true }));
    }

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["backdrop", "screens", "-v", "--config", "/tmp/c.json"]).unwrap();
        assert!(cli.verbose());
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.json")));
    }

    #[test]
    fn test_cli_parses_config_init() {
        let cli = Cli::try_parse_from(["backdrop", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Init { force: true, stdout: false, .. })
        ));
    }

    #[test]
    fn test_cli_parses_schema() {
        let cli = Cli::try_parse_from(["backdrop", "schema"]).unwrap();
        assert!(matches!(cli.command, Commands::Schema));
    }

    #[test]
    fn test_cli_parses_completions() {
        let cli = Cli::try_parse_from(["backdrop", "completions", "--shell", "zsh"]).unwrap();
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::Zsh }));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["backdrop"]).is_err());
    }
}
