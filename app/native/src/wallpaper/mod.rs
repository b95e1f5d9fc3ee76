//! Backdrop building: selection, processing, composition, and output.
//!
//! - [`selector`] - random picks from the source directory
//! - [`processing`] - loading, aspect cropping, and exact scaling
//! - [`composer`] - pasting per-screen images onto the spanning canvas
//! - [`output`] - atomic canvas writes
//! - [`desktop`] - GSettings background integration
//! - [`manager`] - the build cycle and rotation loop

pub mod composer;
pub mod desktop;
pub mod manager;
pub mod output;
pub mod processing;
pub mod selector;

pub use composer::{CollageComposer, compose, compose_images};
pub use manager::{BackdropManager, CycleReport};
pub use output::save_canvas;
pub use processing::{crop_to_aspect, fit_to_screen, load_image, scale_to};
pub use selector::{ImageSelector, is_supported_image, list_candidates};
