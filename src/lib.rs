//! # Photo Date Watermark
//!
//! Stamps every photo in a folder with the date it was taken.
//!
//! ## How it works
//! - Read the capture time (`DateTimeOriginal`) from each photo's EXIF block
//! - Render it as `YYYY-MM-DD` at a fixed anchor with the chosen size and color
//! - Write the result next to the originals in `<folder>_watermark`
//!
//! Photos without a usable capture date are skipped, never guessed.
//!
//! ## Architecture
//! - `core` - Metadata extraction, text rendering and the batch pipeline
//! - `events` - Event-driven progress reporting
//! - `error` - User-friendly error types

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{Result, WatermarkError};

/// Initialize tracing for the library
///
/// Diagnostics go to stderr so that stdout stays reserved for status lines.
/// `RUST_LOG` takes precedence over the `verbose` flag.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    // A subscriber may already be installed (tests, embedding apps)
    let _ = tracing::subscriber::set_global_default(subscriber);
}
