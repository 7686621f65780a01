//! Placement of the watermark text.
//!
//! # Example
//!
//! ```
//! use photo_date_watermark::core::watermark::{Anchor, ImageSize, Origin, TextExtent};
//!
//! let image = ImageSize { width: 200, height: 100 };
//! let text = TextExtent { width: 40, height: 20 };
//!
//! assert_eq!(Anchor::BottomRight.origin(image, text), Origin { x: 150, y: 70 });
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance in pixels kept from the edge for corner anchors
pub const EDGE_MARGIN: i64 = 10;

/// Dimensions of the image being watermarked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Pixel size of the measured text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextExtent {
    pub width: u32,
    pub height: u32,
}

/// Top-left corner of the text. May be negative when the text is wider
/// or taller than the image; anything outside the canvas is clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    pub x: i64,
    pub y: i64,
}

/// Where the watermark goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    #[default]
    Center,
    BottomRight,
}

impl Anchor {
    /// Parse a position label.
    ///
    /// Accepts the canonical names, a few short aliases and the localized
    /// labels `左上角`, `居中` and `右下角`.
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "top-left" | "top_left" | "topleft" | "top left" | "tl" | "左上角" => {
                Some(Anchor::TopLeft)
            }
            "center" | "centre" | "middle" | "c" | "居中" => Some(Anchor::Center),
            "bottom-right" | "bottom_right" | "bottomright" | "bottom right" | "br" | "右下角" => {
                Some(Anchor::BottomRight)
            }
            _ => None,
        }
    }

    /// Compute the text origin for an image and text of the given sizes.
    pub fn origin(self, image: ImageSize, text: TextExtent) -> Origin {
        let img_w = i64::from(image.width);
        let img_h = i64::from(image.height);
        let txt_w = i64::from(text.width);
        let txt_h = i64::from(text.height);

        match self {
            Anchor::TopLeft => Origin {
                x: EDGE_MARGIN,
                y: EDGE_MARGIN,
            },
            Anchor::Center => Origin {
                x: (img_w - txt_w).div_euclid(2),
                y: (img_h - txt_h).div_euclid(2),
            },
            Anchor::BottomRight => Origin {
                x: img_w - txt_w - EDGE_MARGIN,
                y: img_h - txt_h - EDGE_MARGIN,
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::Center => "center",
            Anchor::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
