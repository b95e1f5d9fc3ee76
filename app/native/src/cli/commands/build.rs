//! Backdrop build commands: `run` and `once`.

use clap::Args;
use colored::Colorize;

use crate::config::{BackdropConfig, LoadedConfig, SourceFilter};
use crate::error::BackdropError;
use crate::platform::CancellationToken;
use crate::wallpaper::BackdropManager;

/// Options shared by `run` and `once`.
#[derive(Args, Debug, Default, Clone)]
pub struct BuildArgs {
    /// Where to write the backdrop (format follows the extension).
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<String>,

    /// Seed for reproducible image picks.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Which directory entries are candidates: all or images.
    #[arg(long, value_name = "FILTER")]
    pub filter: Option<SourceFilter>,

    /// Only write the file; leave the desktop settings alone.
    #[arg(long)]
    pub no_desktop: bool,
}

impl BuildArgs {
    /// Applies the flags on top of the configuration.
    pub fn apply(&self, config: &mut BackdropConfig) {
        if let Some(output) = &self.output {
            config.output.clone_from(output);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(filter) = self.filter {
            config.filter = filter;
        }
        if self.no_desktop {
            config.desktop.enabled = false;
        }
    }
}

/// Arguments of `backdrop run`.
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Directory with source images (defaults to `source` in the configuration).
    pub source: Option<String>,

    /// Seconds between backdrops (defaults to `interval`, 60 if unset).
    pub interval: Option<u64>,

    #[command(flatten)]
    pub build: BuildArgs,
}

impl RunArgs {
    /// Returns the configuration with all command line overrides applied.
    #[must_use]
    pub fn resolve(&self, mut config: BackdropConfig) -> BackdropConfig {
        if let Some(source) = &self.source {
            config.source.clone_from(source);
        }
        if let Some(interval) = self.interval {
            config.interval = interval;
        }
        self.build.apply(&mut config);
        config
    }
}

/// Arguments of `backdrop once`.
#[derive(Args, Debug, Default, Clone)]
pub struct OnceArgs {
    /// Directory with source images (defaults to `source` in the configuration).
    pub source: Option<String>,

    #[command(flatten)]
    pub build: BuildArgs,
}

impl OnceArgs {
    /// Returns the configuration with all command line overrides applied.
    #[must_use]
    pub fn resolve(&self, mut config: BackdropConfig) -> BackdropConfig {
        if let Some(source) = &self.source {
            config.source.clone_from(source);
        }
        self.build.apply(&mut config);
        config
    }
}

fn log_config_source(loaded: &LoadedConfig) {
    match &loaded.path {
        Some(path) => tracing::debug!(path = %path.display(), "using configuration file"),
        None => tracing::debug!("using built-in defaults"),
    }
}

/// Runs the rotation loop until interrupted.
///
/// # Errors
///
/// Returns an error if no source is set, signal handlers cannot be installed,
/// or the loop hits a fatal error.
pub fn execute_run(args: &RunArgs, loaded: LoadedConfig) -> Result<(), BackdropError> {
    log_config_source(&loaded);
    let config = args.resolve(loaded.config);
    let mut manager = BackdropManager::new(config)?;

    let token = CancellationToken::new();
    token.register_signals()?;

    manager.run(&token)
}

/// Builds one backdrop and prints where it went.
///
/// # Errors
///
/// Returns an error if no source is set or any stage of the build fails.
pub fn execute_once(args: &OnceArgs, loaded: LoadedConfig) -> Result<(), BackdropError> {
    log_config_source(&loaded);
    let config = args.resolve(loaded.config);
    let mut manager = BackdropManager::new(config)?;

    let report = manager.run_once()?;
    println!(
        "{} {} ({}x{}, {} screens)",
        "Backdrop written to".green(),
        report.output.display().to_string().bold(),
        report.canvas.width,
        report.canvas.height,
        report.screens
    );
    Ok(())
}
