//! Platform helpers shared by the CLI and the build loop.
//!
//! - [`path`] - tilde expansion and relative path resolution
//! - [`signal`] - cooperative cancellation bound to SIGINT/SIGTERM

pub mod path;
pub mod signal;

pub use path::{expand, expand_and_resolve};
pub use signal::CancellationToken;
