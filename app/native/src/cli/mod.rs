//! CLI module for Backdrop.
//!
//! Parses the command line, sets up logging, and dispatches to the command
//! implementations.

mod commands;
mod output;

use clap::Parser;
pub use commands::{BuildArgs, Cli, ConfigCommands, OnceArgs, RunArgs};

use crate::error::BackdropError;
use crate::logging;

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), BackdropError> {
    let cli = Cli::parse();
    logging::init(cli.verbose());
    cli.execute()
}
