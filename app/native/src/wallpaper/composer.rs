//! Composition of per-screen images onto one spanning canvas.

use std::path::PathBuf;

use image::{DynamicImage, RgbImage, imageops};

use super::processing::{fit_to_screen, load_image};
use crate::error::BackdropError;
use crate::screen::{CanvasBounds, GeometryRecord, ScreenSet};

/// Black RGB canvas that screens are pasted onto.
#[derive(Debug, Clone)]
pub struct CollageComposer {
    canvas: RgbImage,
}

impl CollageComposer {
    /// Allocates a black canvas of the given size.
    #[must_use]
    pub fn new(bounds: CanvasBounds) -> Self {
        Self { canvas: RgbImage::new(bounds.width, bounds.height) }
    }

    /// Fits `image` to `screen` and copies it at the screen's position.
    ///
    /// Pixels already on the canvas are overwritten.
    pub fn paste(&mut self, screen: &GeometryRecord, image: DynamicImage) {
        let fitted = fit_to_screen(image, screen).into_rgb8();
        imageops::replace(&mut self.canvas, &fitted, i64::from(screen.x), i64::from(screen.y));
    }

    /// Returns the finished canvas.
    #[must_use]
    pub fn finish(self) -> RgbImage { self.canvas }
}

/// Warns about screens that share pixels; later screens win.
///
/// Called once per distinct layout, not per composition.
pub fn warn_overlaps(screens: &ScreenSet) {
    let screen_list: Vec<_> = screens.iter().collect();
    for (first, second) in screens.overlapping_pairs() {
        tracing::warn!(
            first = %screen_list[first],
            second = %screen_list[second],
            "screens overlap, the later one is drawn on top"
        );
    }
}

/// Builds the canvas from already decoded images, one per screen.
///
/// # Errors
///
/// Returns [`BackdropError::InvalidArguments`] if the image count does not
/// match the screen count.
pub fn compose_images(
    screens: &ScreenSet,
    images: Vec<DynamicImage>,
) -> Result<RgbImage, BackdropError> {
    check_counts(screens, images.len())?;
    debug_overlaps(screens);

    let mut composer = CollageComposer::new(screens.bounds());
    for (screen, image) in screens.iter().zip(images) {
        composer.paste(screen, image);
    }
    Ok(composer.finish())
}

/// Loads one image per screen and builds the canvas.
///
/// Loading stops at the first file that cannot be decoded; no partial canvas
/// is returned.
///
/// # Errors
///
/// Returns [`BackdropError::InvalidArguments`] on a count mismatch and
/// [`BackdropError::ImageLoad`] for the first unreadable image.
pub fn compose(screens: &ScreenSet, image_paths: &[PathBuf]) -> Result<RgbImage, BackdropError> {
    check_counts(screens, image_paths.len())?;
    debug_overlaps(screens);

    let mut composer = CollageComposer::new(screens.bounds());
    for (index, (screen, path)) in screens.iter().zip(image_paths).enumerate() {
        let image = load_image(path)?;
        tracing::debug!(index, screen = %screen, path = %path.display(), "placing image");
        composer.paste(screen, image);
    }
    Ok(composer.finish())
}

fn debug_overlaps(screens: &ScreenSet) {
    let overlaps = screens.overlapping_pairs().len();
    if overlaps > 0 {
        tracing::debug!(overlaps, "drawing overlapping screens in order");
    }
}

fn check_counts(screens: &ScreenSet, images: usize) -> Result<(), BackdropError> {
    if images == screens.len() {
        return Ok(());
    }
    Err(BackdropError::InvalidArguments(format!(
        "{images} images supplied for {} screens",
        screens.len()
    )))
}
