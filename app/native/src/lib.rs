//! Backdrop - spans a random collage of images across every connected monitor.
//!
//! Each cycle reads the screen layout, picks one image per screen from a
//! source directory, crops and scales each image to its screen, pastes them
//! onto a canvas covering the whole layout, and writes the canvas to disk for
//! the desktop to display in "spanned" mode.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod platform;
pub mod schema;
pub mod screen;
pub mod wallpaper;

pub use error::BackdropError;
