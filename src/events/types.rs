//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// All events emitted by the watermark pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Directory listing events
    Scan(ScanEvent),
    /// Per-file outcome events
    File(FileEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events while listing the input directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Listing has started
    Started { path: PathBuf },
    /// A supported image was found
    PhotoFound { path: PathBuf },
    /// An entry could not be read but listing continues
    Error { path: PathBuf, message: String },
    /// Listing completed
    Completed { total_photos: usize },
}

/// Outcome of processing a single photo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FileEvent {
    /// The watermarked copy was written
    Saved {
        source: PathBuf,
        output: PathBuf,
        date: String,
    },
    /// The photo was left alone
    Skipped { path: PathBuf, reason: SkipReason },
}

/// Why a photo was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// No usable capture date in the EXIF data
    NoCaptureDate { detail: String },
    /// The image bytes could not be decoded
    DecodeFailed { detail: String },
    /// Drawing the watermark failed
    RenderFailed { detail: String },
    /// The output file could not be written
    WriteFailed { detail: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoCaptureDate { detail } => write!(f, "no capture date ({})", detail),
            SkipReason::DecodeFailed { detail } => write!(f, "could not decode ({})", detail),
            SkipReason::RenderFailed { detail } => write!(f, "could not draw watermark ({})", detail),
            SkipReason::WriteFailed { detail } => write!(f, "could not save ({})", detail),
        }
    }
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Pipeline has started
    Started,
    /// Moving to a new phase
    PhaseChanged { phase: PipelinePhase },
    /// Pipeline completed
    Completed { summary: PipelineSummary },
}

/// Phases of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Scanning,
    Watermarking,
}

/// Summary of pipeline results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Supported images found in the input directory
    pub total_photos: usize,
    /// Watermarked copies written
    pub saved: usize,
    /// Photos left alone
    pub skipped: usize,
    /// Where the copies were written
    pub output_dir: PathBuf,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelinePhase::Scanning => write!(f, "Scanning"),
            PipelinePhase::Watermarking => write!(f, "Watermarking"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_serializable() {
        let event = Event::File(FileEvent::Skipped {
            path: PathBuf::from("/photos/scan.png"),
            reason: SkipReason::NoCaptureDate {
                detail: "no EXIF".to_string(),
            },
        });

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        match deserialized {
            Event::File(FileEvent::Skipped { path, reason }) => {
                assert_eq!(path, PathBuf::from("/photos/scan.png"));
                assert!(matches!(reason, SkipReason::NoCaptureDate { .. }));
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn skip_reason_display_is_readable() {
        let reason = SkipReason::NoCaptureDate {
            detail: "No capture time".to_string(),
        };
        assert_eq!(reason.to_string(), "no capture date (No capture time)");
    }

    #[test]
    fn pipeline_summary_is_serializable() {
        let summary = PipelineSummary {
            total_photos: 12,
            saved: 10,
            skipped: 2,
            output_dir: PathBuf::from("/photos/trip/trip_watermark"),
            duration_ms: 5000,
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("trip_watermark"));
        assert!(json.contains("\"saved\":10"));
    }
}
