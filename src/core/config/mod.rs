//! # Config Module
//!
//! Turns raw user input (flags or prompt answers) into validated run settings.
//!
//! Every value is checked here, once. Past this point the pipeline only sees
//! typed values, and a malformed value never reaches the renderer.

use crate::core::watermark::{Anchor, Color, StyleParameters, MAX_FONT_SIZE};
use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Raw style answers, exactly as typed
#[derive(Debug, Clone, Default)]
pub struct StyleInput {
    /// e.g. `"40"`
    pub font_size: String,
    /// e.g. `"255 255 255"`
    pub color: String,
    /// e.g. `"bottom-right"` or `"右下角"`
    pub position: String,
    pub font: Option<PathBuf>,
}

/// Validated style plus anything worth telling the user about it
#[derive(Debug, Clone)]
pub struct ParsedStyle {
    pub style: StyleParameters,
    /// Set when the position label was not recognized and center was used
    pub unrecognized_position: Option<String>,
}

/// Validate all style answers.
pub fn parse_style(input: &StyleInput) -> Result<ParsedStyle, ConfigError> {
    let font_size = parse_font_size(&input.font_size)?;
    let color = parse_color(&input.color)?;

    let (anchor, unrecognized_position) = match Anchor::parse_label(&input.position) {
        Some(anchor) => (anchor, None),
        None => {
            warn!(position = %input.position, "Invalid position, defaulting to center");
            (Anchor::Center, Some(input.position.clone()))
        }
    };

    Ok(ParsedStyle {
        style: StyleParameters {
            font_size,
            color,
            anchor,
            font_path: input.font.clone(),
        },
        unrecognized_position,
    })
}

/// Parse a font size: a whole number from 1 to [`MAX_FONT_SIZE`].
pub fn parse_font_size(value: &str) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(size) if (1..=MAX_FONT_SIZE).contains(&size) => Ok(size),
        _ => Err(ConfigError::InvalidFontSize {
            value: value.trim().to_string(),
        }),
    }
}

/// Parse a color given as three whitespace-separated numbers, e.g. `"255 128 0"`.
pub fn parse_color(value: &str) -> Result<Color, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidColor {
        value: value.trim().to_string(),
        reason,
    };

    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(invalid(format!("expected 3 values, got {}", parts.len())));
    }

    let mut channels = [0u8; 3];
    for (channel, part) in channels.iter_mut().zip(&parts) {
        *channel = part
            .parse::<u8>()
            .map_err(|_| invalid(format!("'{}' is not a number between 0 and 255", part)))?;
    }

    Ok(Color::new(channels[0], channels[1], channels[2]))
}

/// Check that the input path is an existing directory.
pub fn validate_input_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.as_os_str().is_empty() || !path.is_dir() {
        return Err(ConfigError::InvalidDirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(path.to_path_buf())
}
