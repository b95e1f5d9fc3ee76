#![allow(clippy::multiple_crate_versions)]

//! Backdrop - spans a random collage of images across every connected monitor.
//!
//! Exits with status 1 and a `backdrop: <error>` line on any fatal error.

fn main() {
    if let Err(err) = backdrop_lib::cli::run() {
        eprintln!("backdrop: {err}");
        std::process::exit(1);
    }
}
