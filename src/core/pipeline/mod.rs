//! # Pipeline Module
//!
//! Runs the watermark over a whole directory.
//!
//! ## Pipeline Stages
//! 1. **Scan** - List supported images in the input directory
//! 2. **Watermark** - For each photo: read capture date, decode, render, save
//!
//! Photos are processed one at a time in file name order. A photo that
//! fails at any step is skipped with a reason; the batch always continues.

mod executor;

pub use executor::{
    output_dir_for, Pipeline, PipelineBuilder, PipelineResult, SavedPhoto, SkippedPhoto,
};
