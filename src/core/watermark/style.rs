//! Style shared by every image in a run.

use super::Anchor;
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest accepted font size in pixels
pub const MAX_FONT_SIZE: u32 = 2000;

/// Text color (RGB). Always drawn fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// The color as a fully opaque RGBA pixel
    pub fn opaque(&self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

/// How the watermark looks. Built once per run and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleParameters {
    /// Font size in pixels, `1..=MAX_FONT_SIZE`
    pub font_size: u32,
    pub color: Color,
    pub anchor: Anchor,
    /// Font file to try before the system fonts
    pub font_path: Option<PathBuf>,
}

impl Default for StyleParameters {
    fn default() -> Self {
        Self {
            font_size: 40,
            color: Color::white(),
            anchor: Anchor::default(),
            font_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_color_has_full_alpha() {
        assert_eq!(Color::new(1, 2, 3).opaque(), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn default_style_is_white_centered() {
        let style = StyleParameters::default();
        assert_eq!(style.color, Color::white());
        assert_eq!(style.anchor, Anchor::Center);
        assert!(style.font_size > 0 && style.font_size <= MAX_FONT_SIZE);
        assert!(style.font_path.is_none());
    }
}
