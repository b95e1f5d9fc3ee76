//! Backdrop manager for building collages and cycling them on an interval.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;

use super::composer::{compose, warn_overlaps};
use super::desktop;
use super::output::save_canvas;
use super::selector::ImageSelector;
use crate::config::BackdropConfig;
use crate::error::BackdropError;
use crate::platform::CancellationToken;
use crate::screen::{CanvasBounds, ScreenSet, ScreenSource, XrandrCommand};

/// Outcome of one successful build cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Number of screens covered.
    pub screens: usize,
    /// Size of the written canvas.
    pub canvas: CanvasBounds,
    /// Image picked for each screen, in screen order.
    pub images: Vec<PathBuf>,
    /// Where the canvas was written.
    pub output: PathBuf,
}

/// Builds backdrops from a source directory and keeps them rotating.
pub struct BackdropManager {
    /// Effective configuration.
    config: BackdropConfig,
    /// Directory images are picked from.
    source: PathBuf,
    /// Where each canvas is written.
    output: PathBuf,
    /// Random image picker, reused across cycles.
    selector: ImageSelector<StdRng>,
    /// Screen layout provider, queried before every cycle.
    screens: Box<dyn ScreenSource>,
}

impl BackdropManager {
    /// Creates a manager that reads the layout from the configured command.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError::InvalidArguments`] if no source directory is
    /// configured.
    pub fn new(config: BackdropConfig) -> Result<Self, BackdropError> {
        let screens = XrandrCommand::new(config.geometry_command.clone());
        Self::with_screen_source(config, Box::new(screens))
    }

    /// Creates a manager with a custom screen layout provider.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError::InvalidArguments`] if no source directory is
    /// configured.
    pub fn with_screen_source(
        config: BackdropConfig,
        screens: Box<dyn ScreenSource>,
    ) -> Result<Self, BackdropError> {
        let source = config.source_dir().ok_or_else(|| {
            BackdropError::InvalidArguments(
                "Cannot run without a source directory. Pass one as an argument or set \
                 \"source\" in the configuration."
                    .to_string(),
            )
        })?;

        let selector = match config.seed {
            Some(seed) => ImageSelector::seeded(seed, config.filter),
            None => ImageSelector::from_entropy(config.filter),
        };
        let output = config.output_path();

        Ok(Self { config, source, output, selector, screens })
    }

    /// Returns the effective configuration.
    #[must_use]
    pub const fn config(&self) -> &BackdropConfig { &self.config }

    /// Returns the source directory.
    #[must_use]
    pub fn source(&self) -> &Path { &self.source }

    /// Returns the output path.
    #[must_use]
    pub fn output(&self) -> &Path { &self.output }

    /// Queries the screens, then picks, composes, and saves one backdrop.
    ///
    /// # Errors
    ///
    /// Returns the first error of any stage. Nothing is written on failure.
    pub fn build_cycle(&mut self) -> Result<CycleReport, BackdropError> {
        let screens = self.screens.screens()?;
        self.build_on(&screens)
    }

    fn build_on(&mut self, screens: &ScreenSet) -> Result<CycleReport, BackdropError> {
        let images = self.selector.pick_images(&self.source, screens.len())?;
        let canvas = compose(screens, &images)?;
        save_canvas(&canvas, &self.output)?;

        Ok(CycleReport {
            screens: screens.len(),
            canvas: screens.bounds(),
            images,
            output: self.output.clone(),
        })
    }

    /// Checks the layout and points the desktop at the output file.
    fn prepare(&self) -> Result<ScreenSet, BackdropError> {
        let screens = self.screens.screens()?;
        let bounds = screens.bounds();
        tracing::info!(
            count = screens.len(),
            width = bounds.width,
            height = bounds.height,
            "screens detected"
        );
        warn_overlaps(&screens);

        if self.config.desktop.enabled {
            desktop::apply(&self.config.desktop, &self.output)?;
        } else {
            tracing::debug!("desktop integration disabled");
        }

        Ok(screens)
    }

    /// Re-queries the layout, falling back to `previous` when the query fails.
    fn refresh_layout(&self, previous: ScreenSet) -> ScreenSet {
        match self.screens.screens() {
            Ok(screens) if screens == previous => previous,
            Ok(screens) => {
                let bounds = screens.bounds();
                tracing::info!(
                    count = screens.len(),
                    width = bounds.width,
                    height = bounds.height,
                    "screen layout changed"
                );
                warn_overlaps(&screens);
                screens
            }
            Err(err) => {
                tracing::warn!(error = %err, "screen query failed, keeping the previous layout");
                previous
            }
        }
    }

    /// Builds a single backdrop after applying the desktop settings.
    ///
    /// # Errors
    ///
    /// Returns any error, fatal or not; there is no next cycle to retry in.
    pub fn run_once(&mut self) -> Result<CycleReport, BackdropError> {
        let screens = self.prepare()?;
        let report = self.build_on(&screens)?;
        log_report(&report);
        Ok(report)
    }

    /// Runs the build loop until `token` is cancelled.
    ///
    /// The layout is checked once up front; no screens or a failing desktop
    /// update end the run before anything is written. After each wait the
    /// layout is queried again, and a failed query keeps the previous one.
    /// Cycle errors such as an empty directory or an unreadable image are
    /// logged and the next cycle retries. An interval of zero builds once and
    /// returns.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error (see [`BackdropError::is_fatal`]).
    pub fn run(&mut self, token: &CancellationToken) -> Result<(), BackdropError> {
        if self.config.interval == 0 {
            return self.run_once().map(|_| ());
        }

        let mut layout = self.prepare()?;
        let interval = self.config.interval_duration();
        tracing::info!(
            source = %self.source.display(),
            interval_secs = self.config.interval,
            "backdrop rotation started"
        );

        while !token.is_cancelled() {
            match self.build_on(&layout) {
                Ok(report) => log_report(&report),
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => tracing::warn!(error = %err, "backdrop cycle failed"),
            }

            if !token.wait(interval) {
                break;
            }
            layout = self.refresh_layout(layout);
        }

        tracing::info!("backdrop rotation stopped");
        Ok(())
    }
}

fn log_report(report: &CycleReport) {
    tracing::info!(
        screens = report.screens,
        width = report.canvas.width,
        height = report.canvas.height,
        output = %report.output.display(),
        "backdrop updated"
    );
    for (index, image) in report.images.iter().enumerate() {
        tracing::debug!(index, image = %image.display(), "screen image");
    }
}
