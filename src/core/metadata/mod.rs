//! # Metadata Module
//!
//! Reads the capture date from a photo's EXIF block.
//!
//! ## Extracted Fields
//! - Date taken (`DateTimeOriginal`, stored as `YYYY:MM:DD HH:MM:SS`)
//!
//! Anything short of a complete, well-formed timestamp counts as "no date".
//! A photo without a date is a normal outcome, so the total entry point
//! [`extract_capture_date`] returns `Option` and only logs why. The batch
//! uses [`try_extract_capture_date`] to keep the reason for its skip line.

use crate::error::MetadataError;
use chrono::{NaiveDate, NaiveDateTime};
use exif::{In, Reader, Tag, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// EXIF timestamp layout
const EXIF_TIMESTAMP_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Raw TIFF-structured EXIF bytes, as embedded in an image container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataBlob {
    bytes: Vec<u8>,
}

impl MetadataBlob {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Pull the EXIF block out of a JPEG, PNG, TIFF, WebP or HEIF file
    pub fn from_file(path: &Path) -> Result<Self, MetadataError> {
        let file = File::open(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut reader = BufReader::new(file);
        let exif = Reader::new()
            .read_from_container(&mut reader)
            .map_err(|e| MetadataError::NoExif {
                reason: e.to_string(),
            })?;

        Ok(Self::new(exif.buf().to_vec()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// The calendar day a photo was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CaptureDate(NaiveDate);

impl CaptureDate {
    /// Parse an EXIF timestamp, keeping only the date.
    ///
    /// The whole value must match `YYYY:MM:DD HH:MM:SS`; trailing NUL padding
    /// written by some cameras is ignored.
    pub fn parse_exif_timestamp(value: &str) -> Result<Self, MetadataError> {
        let trimmed = value.trim_end_matches('\0');
        NaiveDateTime::parse_from_str(trimmed, EXIF_TIMESTAMP_FORMAT)
            .map(|timestamp| Self(timestamp.date()))
            .map_err(|_| MetadataError::InvalidTimestamp {
                value: trimmed.to_string(),
            })
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CaptureDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CaptureDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Extract the capture date from a metadata block.
///
/// Never fails: every problem is logged at debug level and yields `None`.
pub fn extract_capture_date(blob: &MetadataBlob) -> Option<CaptureDate> {
    match try_extract_capture_date(blob) {
        Ok(date) => Some(date),
        Err(e) => {
            debug!(error = %e, "No capture date in metadata block");
            None
        }
    }
}

/// Extract the capture date from a metadata block, keeping the failure reason
pub fn try_extract_capture_date(blob: &MetadataBlob) -> Result<CaptureDate, MetadataError> {
    if blob.is_empty() {
        return Err(MetadataError::NoExif {
            reason: "metadata block is empty".to_string(),
        });
    }

    let exif = Reader::new()
        .read_raw(blob.as_bytes().to_vec())
        .map_err(|e| MetadataError::NoExif {
            reason: e.to_string(),
        })?;

    let field = exif
        .get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .ok_or(MetadataError::MissingTag)?;

    let bytes = match field.value {
        Value::Ascii(ref vec) => vec.first(),
        _ => None,
    }
    .ok_or_else(|| MetadataError::InvalidTimestamp {
        value: field.display_value().to_string(),
    })?;

    let text = std::str::from_utf8(bytes).map_err(|_| MetadataError::InvalidTimestamp {
        value: String::from_utf8_lossy(bytes).into_owned(),
    })?;

    CaptureDate::parse_exif_timestamp(text)
}
