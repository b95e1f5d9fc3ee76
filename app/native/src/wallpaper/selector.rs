//! Random image selection from a source directory.

use std::fs;
use std::path::{Path, PathBuf};

use natord::compare;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SourceFilter;
use crate::error::BackdropError;

/// Supported image file extensions for [`SourceFilter::Images`].
const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "gif", "tif", "tiff"];

/// Checks if a file has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Lists the candidate entries of `dir` in natural order.
///
/// The listing does not recurse. With [`SourceFilter::All`] every entry is a
/// candidate, including subdirectories and non-image files.
///
/// # Errors
///
/// Returns [`BackdropError::InvalidPath`] if `dir` is not a directory and
/// [`BackdropError::Io`] if it cannot be read.
pub fn list_candidates(dir: &Path, filter: SourceFilter) -> Result<Vec<PathBuf>, BackdropError> {
    if !dir.is_dir() {
        return Err(BackdropError::InvalidPath(dir.to_path_buf()));
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let keep = match filter {
            SourceFilter::All => true,
            SourceFilter::Images => path.is_file() && is_supported_image(&path),
        };
        if keep {
            candidates.push(path);
        }
    }

    candidates.sort_by(|a, b| compare(a.to_string_lossy().as_ref(), b.to_string_lossy().as_ref()));
    Ok(candidates)
}

/// Picks images uniformly at random, with replacement.
///
/// The random source is owned by the selector so runs can be reproduced by
/// seeding it.
#[derive(Debug)]
pub struct ImageSelector<R: Rng> {
    rng: R,
    filter: SourceFilter,
}

impl<R: Rng> ImageSelector<R> {
    /// Creates a selector around an existing random source.
    pub const fn new(rng: R, filter: SourceFilter) -> Self { Self { rng, filter } }

    /// Returns the candidate filter in use.
    #[must_use]
    pub const fn filter(&self) -> SourceFilter { self.filter }

    /// Returns `count` paths drawn from `dir`.
    ///
    /// The same file may be picked for several screens.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError::EmptySourceDirectory`] if `dir` has no
    /// candidates, or the errors of [`list_candidates`].
    pub fn pick_images(&mut self, dir: &Path, count: usize) -> Result<Vec<PathBuf>, BackdropError> {
        let candidates = list_candidates(dir, self.filter)?;
        if candidates.is_empty() {
            return Err(BackdropError::EmptySourceDirectory(dir.to_path_buf()));
        }

        let picks = (0..count)
            .map(|_| candidates[self.rng.random_range(0..candidates.len())].clone())
            .collect();
        Ok(picks)
    }
}

impl ImageSelector<StdRng> {
    /// Creates a selector with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64, filter: SourceFilter) -> Self {
        Self::new(StdRng::seed_from_u64(seed), filter)
    }

    /// Creates a selector seeded from the thread-local generator.
    #[must_use]
    pub fn from_entropy(filter: SourceFilter) -> Self {
        Self::new(StdRng::from_rng(&mut rand::rng()), filter)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn populate(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), b"x").unwrap();
        }
    }

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image(Path::new("a.jpg")));
        assert!(is_supported_image(Path::new("a.JPEG")));
        assert!(is_supported_image(Path::new("a.TiFf")));
        assert!(!is_supported_image(Path::new("a.txt")));
        assert!(!is_supported_image(Path::new("README")));
    }

    #[test]
    fn test_list_candidates_all_keeps_everything() {
        let temp_dir = TempDir::new().unwrap();
        populate(temp_dir.path(), &["b.png", "notes.txt", "a.jpg"]);
        fs::create_dir(temp_dir.path().join("nested")).unwrap();

        let candidates = list_candidates(temp_dir.path(), SourceFilter::All).unwrap();
        assert_eq!(candidates.len(), 4);
    }

    #[test]
    fn test_list_candidates_images_filters() {
        let temp_dir = TempDir::new().unwrap();
        populate(temp_dir.path(), &["b.png", "notes.txt", "a.jpg"]);
        fs::create_dir(temp_dir.path().join("dir.png")).unwrap();

        let candidates = list_candidates(temp_dir.path(), SourceFilter::Images).unwrap();
        let names: Vec<_> =
            candidates.iter().map(|p| p.file_name().unwrap().to_str().unwrap()).collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn test_list_candidates_natural_order() {
        let temp_dir = TempDir::new().unwrap();
        populate(temp_dir.path(), &["img10.png", "img2.png", "img1.png"]);

        let candidates = list_candidates(temp_dir.path(), SourceFilter::All).unwrap();
        let names: Vec<_> =
            candidates.iter().map(|p| p.file_name().unwrap().to_str().unwrap()).collect();
        assert_eq!(names, vec!["img1.png", "img2.png", "img10.png"]);
    }

    #[test]
    fn test_list_candidates_missing_dir() {
        let err = list_candidates(Path::new("/nonexistent/walls"), SourceFilter::All).unwrap_err();
        assert!(matches!(err, BackdropError::InvalidPath(_)));
    }

    #[test]
    fn test_pick_images_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut selector = ImageSelector::seeded(1, SourceFilter::All);

        let err = selector.pick_images(temp_dir.path(), 2).unwrap_err();
        assert!(matches!(err, BackdropError::EmptySourceDirectory(_)));
    }

    #[test]
    fn test_pick_images_only_text_with_images_filter_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        populate(temp_dir.path(), &["notes.txt"]);
        let mut selector = ImageSelector::seeded(1, SourceFilter::Images);

        let err = selector.pick_images(temp_dir.path(), 1).unwrap_err();
        assert!(matches!(err, BackdropError::EmptySourceDirectory(_)));
    }

    #[test]
    fn test_pick_images_count_and_membership() {
        let temp_dir = TempDir::new().unwrap();
        populate(temp_dir.path(), &["a.png", "b.png", "c.png"]);
        let mut selector = ImageSelector::seeded(42, SourceFilter::All);

        let picks = selector.pick_images(temp_dir.path(), 5).unwrap();
        assert_eq!(picks.len(), 5);
        assert!(picks.iter().all(|p| p.parent() == Some(temp_dir.path())));
    }

    #[test]
    fn test_pick_images_single_candidate_repeats() {
        let temp_dir = TempDir::new().unwrap();
        populate(temp_dir.path(), &["only.png"]);
        let mut selector = ImageSelector::from_entropy(SourceFilter::All);

        let picks = selector.pick_images(temp_dir.path(), 3).unwrap();
        assert!(picks.iter().all(|p| p.ends_with("only.png")));
    }

    #[test]
    fn test_same_seed_same_picks() {
        let temp_dir = TempDir::new().unwrap();
        populate(temp_dir.path(), &["a.png", "b.png", "c.png", "d.png", "e.png"]);

        let first = ImageSelector::seeded(7, SourceFilter::All)
            .pick_images(temp_dir.path(), 8)
            .unwrap();
        let second = ImageSelector::seeded(7, SourceFilter::All)
            .pick_images(temp_dir.path(), 8)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_count_still_requires_candidates() {
        let temp_dir = TempDir::new().unwrap();
        populate(temp_dir.path(), &["a.png"]);
        let mut selector = ImageSelector::seeded(3, SourceFilter::All);

        assert!(selector.pick_images(temp_dir.path(), 0).unwrap().is_empty());
    }
}
