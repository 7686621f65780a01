//! # Error Module
//!
//! User-friendly error types for the photo date watermarker.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Only configuration is fatal** - everything per-file skips that file

use crate::core::watermark::MAX_FONT_SIZE;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum WatermarkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Failed to create output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors in the run configuration. These stop the run before any file is touched.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid path, please enter an existing directory: {path}")]
    InvalidDirectory { path: PathBuf },

    #[error("Invalid font size '{value}' (must be a whole number from 1 to {max})", max = MAX_FONT_SIZE)]
    InvalidFontSize { value: String },

    #[error("Invalid color '{value}': {reason} (expected three numbers 0-255, e.g. \"255 255 255\")")]
    InvalidColor { value: String, reason: String },

    #[error("No value given for {field}")]
    MissingValue { field: &'static str },

    #[error("Failed to read input: {0}")]
    Prompt(#[source] std::io::Error),
}

/// Errors that occur while listing the input directory
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reasons a capture date could not be read
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No readable EXIF data: {reason}")]
    NoExif { reason: String },

    #[error("No capture time (DateTimeOriginal) in EXIF data")]
    MissingTag,

    #[error("Capture time '{value}' is not in YYYY:MM:DD HH:MM:SS format")]
    InvalidTimestamp { value: String },
}

/// Errors that occur while drawing the watermark
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("Cannot render empty watermark text")]
    EmptyText,

    #[error("Font size must be from 1 to {max}", max = MAX_FONT_SIZE)]
    InvalidFontSize,
}

/// Per-file failures. The batch records these and moves on.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("{0}")]
    Metadata(#[from] MetadataError),

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("Failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, WatermarkError>;
