//! # Core Module
//!
//! The UI-agnostic watermark engine.
//!
//! ## Modules
//! - `config` - Validates raw user input into typed settings
//! - `scanner` - Lists photos in the input directory
//! - `metadata` - Reads the capture date from EXIF
//! - `watermark` - Measures, places and composites the date text
//! - `pipeline` - Orchestrates the full per-directory workflow

pub mod config;
pub mod metadata;
pub mod pipeline;
pub mod scanner;
pub mod watermark;

// Re-export commonly used types
pub use metadata::{extract_capture_date, CaptureDate, MetadataBlob};
pub use pipeline::{Pipeline, PipelineResult};
pub use scanner::PhotoFile;
pub use watermark::{Anchor, StyleParameters, WatermarkRenderer};
