//! # Watermark Module
//!
//! Draws a line of text onto a copy of an image.
//!
//! ## Steps
//! 1. Measure the text with the resolved font face
//! 2. Place it with one of three [`Anchor`] rules
//! 3. Draw it onto a transparent overlay the size of the image
//! 4. Alpha-blend the overlay over the source and flatten to RGB
//!
//! The source image is borrowed, never modified.

mod anchor;
mod builtin_font;
mod font;
mod renderer;
mod style;

pub use anchor::{Anchor, ImageSize, Origin, TextExtent, EDGE_MARGIN};
pub use builtin_font::BuiltinFace;
pub use font::{resolve_face, OutlineFace, TextFace};
pub use renderer::{alpha_composite, WatermarkRenderer};
pub use style::{Color, StyleParameters, MAX_FONT_SIZE};
