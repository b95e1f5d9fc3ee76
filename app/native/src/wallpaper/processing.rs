//! Image processing for backdrops.
//!
//! Provides loading, aspect-ratio cropping, and exact resizing so that every
//! image handed to the composer matches its screen's dimensions.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};

use crate::error::BackdropError;
use crate::screen::GeometryRecord;

/// Interpolation filter used when resizing (good quality, faster than Lanczos3).
const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Loads and decodes an image, guessing the format from its contents.
///
/// # Errors
///
/// Returns [`BackdropError::ImageLoad`] if the file cannot be opened or is not
/// a decodable image.
pub fn load_image(path: &Path) -> Result<DynamicImage, BackdropError> {
    let load_error = |reason: String| BackdropError::ImageLoad {
        path: path.to_path_buf(),
        reason,
    };

    ImageReader::open(path)
        .map_err(|err| load_error(err.to_string()))?
        .with_guessed_format()
        .map_err(|err| load_error(err.to_string()))?
        .decode()
        .map_err(|err| load_error(err.to_string()))
}

/// Crops the centered band of `image` that has the target aspect ratio.
///
/// Ratios are compared exactly with integer cross-multiplication. When they
/// are equal the image is returned as is. Otherwise the band spans the full
/// height (source wider) or full width (source taller), its other side is the
/// rounded ideal length, and the offset is floored. The result never grows
/// either dimension.
#[must_use]
pub fn crop_to_aspect(image: DynamicImage, target_width: u32, target_height: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 || target_width == 0 || target_height == 0 {
        return image;
    }

    let (w, h) = (u64::from(width), u64::from(height));
    let (tw, th) = (u64::from(target_width), u64::from(target_height));

    let target_side = tw * h;
    let source_side = w * th;

    if target_side == source_side {
        return image;
    }

    if target_side < source_side {
        // Source is wider: keep full height.
        let crop_width = clamp_side(rounded_div(h * tw, th), width);
        let x = (width - crop_width) / 2;
        image.crop_imm(x, 0, crop_width, height)
    } else {
        // Source is taller: keep full width.
        let crop_height = clamp_side(rounded_div(w * th, tw), height);
        let y = (height - crop_height) / 2;
        image.crop_imm(0, y, width, crop_height)
    }
}

/// Resizes `image` to exactly `target_width` x `target_height`.
///
/// Returns the image untouched when it already has those dimensions. No aspect
/// correction is done; call [`crop_to_aspect`] first.
#[must_use]
pub fn scale_to(image: DynamicImage, target_width: u32, target_height: u32) -> DynamicImage {
    if image.dimensions() == (target_width, target_height) {
        return image;
    }

    image.resize_exact(target_width, target_height, RESIZE_FILTER)
}

/// Crops and scales `image` so it exactly covers `screen`.
#[must_use]
pub fn fit_to_screen(image: DynamicImage, screen: &GeometryRecord) -> DynamicImage {
    let cropped = crop_to_aspect(image, screen.width, screen.height);
    scale_to(cropped, screen.width, screen.height)
}

/// Integer division rounding halves up.
const fn rounded_div(numerator: u64, denominator: u64) -> u64 {
    (2 * numerator + denominator) / (2 * denominator)
}

/// Clamps a computed side length into `1..=limit`.
fn clamp_side(side: u64, limit: u32) -> u32 {
    u32::try_from(side).unwrap_or(limit).clamp(1, limit)
}
