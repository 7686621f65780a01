//! # Scanner Module
//!
//! Lists the photos to watermark in the input directory.
//!
//! ## Supported Formats
//! - JPEG (.jpg, .jpeg)
//! - PNG (.png)
//! - BMP (.bmp)
//! - TIFF (.tiff)
//!
//! Only files directly inside the directory are considered; the output
//! directory and any other subdirectory are never descended into.

mod filter;
mod walker;

pub use filter::ImageFilter;
pub use walker::{DirectoryScanner, ScanConfig};

use crate::error::ScanError;
use crate::events::EventSender;
use std::path::{Path, PathBuf};

/// A supported image found in the input directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFile {
    pub path: PathBuf,
}

/// Result of a scan operation
#[derive(Debug)]
pub struct ScanResult {
    /// Supported photos, sorted by file name
    pub photos: Vec<PhotoFile>,
    /// Entries that could not be read (non-fatal)
    pub errors: Vec<ScanError>,
}

/// Trait for photo scanners
///
/// Implement this trait to feed the pipeline from somewhere else (e.g. tests).
pub trait PhotoScanner: Send + Sync {
    /// List photos in a directory
    fn scan(&self, dir: &Path) -> Result<ScanResult, ScanError>;

    /// List photos with progress reporting via events
    fn scan_with_events(&self, dir: &Path, events: &EventSender)
        -> Result<ScanResult, ScanError>;
}
