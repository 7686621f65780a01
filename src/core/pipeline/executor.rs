//! Pipeline execution implementation.

use crate::core::config::validate_input_dir;
use crate::core::metadata::{try_extract_capture_date, CaptureDate, MetadataBlob};
use crate::core::scanner::{DirectoryScanner, PhotoFile, PhotoScanner, ScanConfig};
use crate::core::watermark::{StyleParameters, TextFace, WatermarkRenderer};
use crate::error::{ConfigError, FileError, WatermarkError};
use crate::events::{
    null_sender, Event, EventSender, FileEvent, PipelineEvent, PipelinePhase, PipelineSummary,
    SkipReason,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Suffix appended to the input directory name for the output directory
const OUTPUT_SUFFIX: &str = "_watermark";

/// A photo that was watermarked and written
#[derive(Debug, Clone)]
pub struct SavedPhoto {
    pub source: PathBuf,
    pub output: PathBuf,
    pub date: CaptureDate,
}

/// A photo that was left alone
#[derive(Debug, Clone)]
pub struct SkippedPhoto {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Result of pipeline execution
#[derive(Debug)]
pub struct PipelineResult {
    /// Where the watermarked copies were written
    pub output_dir: PathBuf,
    /// Supported images found in the input directory
    pub total_photos: usize,
    pub saved: Vec<SavedPhoto>,
    pub skipped: Vec<SkippedPhoto>,
    /// Directory entries that could not be read (non-fatal)
    pub scan_errors: Vec<String>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl PipelineResult {
    pub fn summary(&self) -> PipelineSummary {
        PipelineSummary {
            total_photos: self.total_photos,
            saved: self.saved.len(),
            skipped: self.skipped.len(),
            output_dir: self.output_dir.clone(),
            duration_ms: self.duration_ms,
        }
    }
}

/// Builder for pipeline configuration
#[derive(Default)]
pub struct PipelineBuilder {
    input_dir: Option<PathBuf>,
    style: StyleParameters,
    scan_config: ScanConfig,
    face: Option<Box<dyn TextFace>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory holding the photos
    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = Some(dir.into());
        self
    }

    /// Set the watermark style
    pub fn style(mut self, style: StyleParameters) -> Self {
        self.style = style;
        self
    }

    /// Include hidden files
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.scan_config.include_hidden = include;
        self
    }

    /// Use a specific font face instead of resolving one
    pub fn face(mut self, face: Box<dyn TextFace>) -> Self {
        self.face = Some(face);
        self
    }

    /// Validate the configuration and build the pipeline.
    ///
    /// Nothing is written to disk here.
    pub fn build(self) -> Result<Pipeline, ConfigError> {
        let input_dir = self.input_dir.ok_or(ConfigError::MissingValue {
            field: "input directory",
        })?;
        let input_dir = validate_input_dir(&input_dir)?;

        let renderer = match self.face {
            Some(face) => WatermarkRenderer::with_face(self.style, face),
            None => WatermarkRenderer::new(self.style),
        };

        Ok(Pipeline {
            output_dir: output_dir_for(&input_dir),
            input_dir,
            scanner: DirectoryScanner::new(self.scan_config),
            renderer,
        })
    }
}

/// `<dir>/<dir name>_watermark`
pub fn output_dir_for(input_dir: &Path) -> PathBuf {
    let name = input_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            // "." or ".." have no file name of their own
            fs::canonicalize(input_dir)
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| "photos".to_string());

    input_dir.join(format!("{}{}", name, OUTPUT_SUFFIX))
}

/// The watermark pipeline
pub struct Pipeline {
    input_dir: PathBuf,
    output_dir: PathBuf,
    scanner: DirectoryScanner,
    renderer: WatermarkRenderer,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Name of the font face used for the watermark
    pub fn face_name(&self) -> &str {
        self.renderer.face_name()
    }

    /// Run the pipeline without events
    pub fn run(&self) -> Result<PipelineResult, WatermarkError> {
        self.run_with_events(&null_sender())
    }

    /// Run the pipeline with event reporting
    pub fn run_with_events(&self, events: &EventSender) -> Result<PipelineResult, WatermarkError> {
        let start_time = Instant::now();

        events.send(Event::Pipeline(PipelineEvent::Started));

        fs::create_dir_all(&self.output_dir).map_err(|source| WatermarkError::OutputDirectory {
            path: self.output_dir.clone(),
            source,
        })?;

        // Phase 1: Scanning
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Scanning,
        }));

        let scan_result = self
            .scanner
            .scan_with_events(&self.input_dir, events)?;
        let scan_errors: Vec<String> = scan_result.errors.iter().map(|e| e.to_string()).collect();
        let total_photos = scan_result.photos.len();

        // Phase 2: Watermarking
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Watermarking,
        }));

        let mut saved = Vec::new();
        let mut skipped = Vec::new();

        for photo in &scan_result.photos {
            match self.process_photo(photo) {
                Ok(result) => {
                    info!(
                        source = %result.source.display(),
                        output = %result.output.display(),
                        date = %result.date,
                        "Saved watermarked copy"
                    );
                    events.send(Event::File(FileEvent::Saved {
                        source: result.source.clone(),
                        output: result.output.clone(),
                        date: result.date.to_string(),
                    }));
                    saved.push(result);
                }
                Err(e) => {
                    warn!(path = %photo.path.display(), error = %e, "Skipping photo");
                    let reason = skip_reason(&e);
                    events.send(Event::File(FileEvent::Skipped {
                        path: photo.path.clone(),
                        reason: reason.clone(),
                    }));
                    skipped.push(SkippedPhoto {
                        path: photo.path.clone(),
                        reason,
                    });
                }
            }
        }

        let result = PipelineResult {
            output_dir: self.output_dir.clone(),
            total_photos,
            saved,
            skipped,
            scan_errors,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: result.summary(),
        }));

        Ok(result)
    }

    /// Read date, decode, render, save. Any failure skips just this photo.
    fn process_photo(&self, photo: &PhotoFile) -> Result<SavedPhoto, FileError> {
        let blob = MetadataBlob::from_file(&photo.path)?;
        let date = try_extract_capture_date(&blob)?;
        debug!(path = %photo.path.display(), %date, "Read capture date");

        let image = image::open(&photo.path).map_err(|e| FileError::Decode {
            path: photo.path.clone(),
            reason: e.to_string(),
        })?;

        let watermarked = self.renderer.render(&image, &date.to_string())?;

        let file_name = photo.path.file_name().ok_or_else(|| FileError::Write {
            path: photo.path.clone(),
            reason: "path has no file name".to_string(),
        })?;
        let output = self.output_dir.join(file_name);

        watermarked.save(&output).map_err(|e| FileError::Write {
            path: output.clone(),
            reason: e.to_string(),
        })?;

        Ok(SavedPhoto {
            source: photo.path.clone(),
            output,
            date,
        })
    }
}

fn skip_reason(error: &FileError) -> SkipReason {
    let detail = error.to_string();
    match error {
        FileError::Metadata(_) => SkipReason::NoCaptureDate { detail },
        FileError::Decode { .. } => SkipReason::DecodeFailed { detail },
        FileError::Render(_) => SkipReason::RenderFailed { detail },
        FileError::Write { .. } => SkipReason::WriteFailed { detail },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::watermark::BuiltinFace;
    use crate::error::{MetadataError, RenderError};
    use tempfile::TempDir;

    #[test]
    fn output_dir_is_named_after_input() {
        let out = output_dir_for(Path::new("/photos/trip"));
        assert_eq!(out, PathBuf::from("/photos/trip/trip_watermark"));
    }

    #[test]
    fn output_dir_ignores_trailing_separator() {
        let out = output_dir_for(Path::new("/photos/trip/"));
        assert_eq!(out, PathBuf::from("/photos/trip/trip_watermark"));
    }

    #[test]
    fn build_rejects_missing_directory() {
        let result = Pipeline::builder()
            .input_dir("/nonexistent/photos/12345")
            .face(Box::new(BuiltinFace))
            .build();

        assert!(matches!(result, Err(ConfigError::InvalidDirectory { .. })));
        assert!(!Path::new("/nonexistent/photos/12345/12345_watermark").exists());
    }

    #[test]
    fn build_requires_input_directory() {
        let result = Pipeline::builder().face(Box::new(BuiltinFace)).build();
        assert!(matches!(result, Err(ConfigError::MissingValue { .. })));
    }

    #[test]
    fn build_does_not_create_output_directory() {
        let temp = TempDir::new().unwrap();
        let pipeline = Pipeline::builder()
            .input_dir(temp.path())
            .face(Box::new(BuiltinFace))
            .build()
            .unwrap();

        assert!(!pipeline.output_dir().exists());
        assert_eq!(pipeline.face_name(), "built-in bitmap");
    }

    #[test]
    fn run_on_empty_directory_creates_empty_output() {
        let temp = TempDir::new().unwrap();
        let pipeline = Pipeline::builder()
            .input_dir(temp.path())
            .face(Box::new(BuiltinFace))
            .build()
            .unwrap();

        let result = pipeline.run().unwrap();

        assert_eq!(result.total_photos, 0);
        assert!(result.saved.is_empty());
        assert!(pipeline.output_dir().is_dir());
    }

    #[test]
    fn undecodable_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("broken.jpg"), [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

        let pipeline = Pipeline::builder()
            .input_dir(temp.path())
            .face(Box::new(BuiltinFace))
            .build()
            .unwrap();
        let result = pipeline.run().unwrap();

        assert_eq!(result.total_photos, 1);
        assert!(result.saved.is_empty());
        assert_eq!(result.skipped.len(), 1);
    }

    #[test]
    fn skip_reasons_follow_error_kind() {
        assert!(matches!(
            skip_reason(&FileError::Metadata(MetadataError::MissingTag)),
            SkipReason::NoCaptureDate { .. }
        ));
        assert!(matches!(
            skip_reason(&FileError::Decode {
                path: PathBuf::from("a.jpg"),
                reason: "bad".to_string()
            }),
            SkipReason::DecodeFailed { .. }
        ));
        assert!(matches!(
            skip_reason(&FileError::Render(RenderError::EmptyText)),
            SkipReason::RenderFailed { .. }
        ));
    }
}
