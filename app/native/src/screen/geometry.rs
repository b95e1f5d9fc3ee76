//! Screen placement in the shared virtual coordinate space.
//!
//! Coordinates use a top-left origin and pixel units. A [`ScreenSet`] is built
//! once per cycle from the geometry source and only read afterwards.

use serde::Serialize;

use crate::error::BackdropError;

/// Position and size of one physical monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GeometryRecord {
    /// Left edge in the virtual screen space.
    pub x: u32,
    /// Top edge in the virtual screen space.
    pub y: u32,
    /// Width in pixels, always non-zero.
    pub width: u32,
    /// Height in pixels, always non-zero.
    pub height: u32,
}

impl GeometryRecord {
    /// Creates a record, rejecting empty screens.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError::InvalidGeometry`] if `width` or `height` is zero
    /// or the far edge does not fit in `u32`.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Result<Self, BackdropError> {
        if width == 0 || height == 0 {
            return Err(BackdropError::InvalidGeometry(format!(
                "{width}x{height}+{x}+{y} has an empty dimension"
            )));
        }
        if x.checked_add(width).is_none() || y.checked_add(height).is_none() {
            return Err(BackdropError::InvalidGeometry(format!(
                "{width}x{height}+{x}+{y} exceeds the coordinate range"
            )));
        }

        Ok(Self { x, y, width, height })
    }

    /// Returns the rightmost X coordinate (exclusive).
    #[must_use]
    pub const fn right(&self) -> u32 { self.x.saturating_add(self.width) }

    /// Returns the bottommost Y coordinate (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> u32 { self.y.saturating_add(self.height) }

    /// Returns `true` if this rectangle shares any pixel with `other`.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

impl std::fmt::Display for GeometryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Size of the canvas covering every screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasBounds {
    pub width: u32,
    pub height: u32,
}

/// Ordered, non-empty set of screens, one per detected monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenSet {
    screens: Vec<GeometryRecord>,
}

impl ScreenSet {
    /// Creates a screen set.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError::NoScreensDetected`] if `screens` is empty.
    pub fn new(screens: Vec<GeometryRecord>) -> Result<Self, BackdropError> {
        if screens.is_empty() {
            return Err(BackdropError::NoScreensDetected);
        }
        Ok(Self { screens })
    }

    /// Number of screens, always at least one.
    #[must_use]
    pub fn len(&self) -> usize { self.screens.len() }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.screens.is_empty() }

    /// Iterates the screens in detection order.
    pub fn iter(&self) -> std::slice::Iter<'_, GeometryRecord> { self.screens.iter() }

    /// Returns the union bounding box anchored at the origin.
    ///
    /// Every screen rectangle lies inside these bounds by construction.
    #[must_use]
    pub fn bounds(&self) -> CanvasBounds {
        let width = self.screens.iter().map(GeometryRecord::right).max().unwrap_or(0);
        let height = self.screens.iter().map(GeometryRecord::bottom).max().unwrap_or(0);
        CanvasBounds { width, height }
    }

    /// Returns index pairs of screens whose rectangles overlap.
    ///
    /// Overlaps are allowed; the later screen wins when composing.
    #[must_use]
    pub fn overlapping_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.screens.iter().enumerate() {
            for (j, b) in self.screens.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

impl<'a> IntoIterator for &'a ScreenSet {
    type Item = &'a GeometryRecord;
    type IntoIter = std::slice::Iter<'a, GeometryRecord>;

    fn into_iter(self) -> Self::IntoIter { self.screens.iter() }
}
