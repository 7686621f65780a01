//! Font faces for measuring and drawing watermark text.
//!
//! A named system font is preferred. When none can be loaded the
//! compiled-in [`BuiltinFace`] is used, so resolving a face never fails.

use super::{BuiltinFace, Origin, TextExtent};
use ab_glyph::{point, Font, FontVec, OutlinedGlyph, PxScale, Rect, ScaleFont};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Font files tried in each search directory, in order
const SYSTEM_FONT_FILES: [&str; 5] = [
    "arial.ttf",
    "Arial.ttf",
    "DejaVuSans.ttf",
    "LiberationSans-Regular.ttf",
    "FreeSans.ttf",
];

/// Well-known system font directories
const SYSTEM_FONT_DIRS: [&str; 9] = [
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/freefont",
    "/usr/share/fonts/TTF",
    "/usr/share/fonts/dejavu",
    "/usr/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
    "C:\\Windows\\Fonts",
];

/// Something that can measure and draw a line of text.
pub trait TextFace: Send + Sync {
    /// Human-readable name for diagnostics
    fn name(&self) -> &str;

    /// Pixel size of `text` at `font_size`
    fn measure(&self, text: &str, font_size: u32) -> TextExtent;

    /// Draw `text` so that its measured box starts at `origin`.
    ///
    /// Writes `color` with glyph coverage as alpha; pixels outside the
    /// canvas are clipped.
    fn draw(&self, canvas: &mut RgbaImage, text: &str, origin: Origin, font_size: u32, color: Rgba<u8>);
}

/// Write one pixel of glyph coverage onto a single-color overlay.
///
/// Overlapping coverage keeps the stronger alpha.
pub(crate) fn put_coverage(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>, coverage: f32) {
    if x < 0 || y < 0 || x >= i64::from(canvas.width()) || y >= i64::from(canvas.height()) {
        return;
    }

    let alpha = (coverage.clamp(0.0, 1.0) * f32::from(color[3])).round() as u8;
    if alpha == 0 {
        return;
    }

    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    if alpha > pixel[3] {
        *pixel = Rgba([color[0], color[1], color[2], alpha]);
    }
}

/// A TrueType/OpenType font loaded from disk
pub struct OutlineFace {
    name: String,
    font: FontVec,
}

impl OutlineFace {
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let data = std::fs::read(path)?;
        let font = FontVec::try_from_vec(data)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;

        Ok(Self {
            name: path.display().to_string(),
            font,
        })
    }

    /// Lay out `text` on a baseline at the font's ascent, applying kerning
    fn layout(&self, text: &str, font_size: u32) -> (Vec<OutlinedGlyph>, f32) {
        let scale = PxScale::from(font_size as f32);
        let scaled_font = self.font.as_scaled(scale);
        let baseline = scaled_font.ascent();

        let mut cursor_x = 0.0f32;
        let mut prev_glyph: Option<ab_glyph::GlyphId> = None;
        let mut outlined = Vec::new();

        for c in text.chars() {
            let glyph_id = scaled_font.glyph_id(c);

            if let Some(prev) = prev_glyph {
                cursor_x += scaled_font.kern(prev, glyph_id);
            }

            let glyph = glyph_id.with_scale_and_position(scale, point(cursor_x, baseline));
            if let Some(g) = self.font.outline_glyph(glyph) {
                outlined.push(g);
            }

            cursor_x += scaled_font.h_advance(glyph_id);
            prev_glyph = Some(glyph_id);
        }

        (outlined, cursor_x)
    }
}

/// Union of the pixel bounds of all outlined glyphs
fn ink_bounds(glyphs: &[OutlinedGlyph]) -> Option<Rect> {
    glyphs.iter().map(|g| g.px_bounds()).reduce(|a, b| Rect {
        min: point(a.min.x.min(b.min.x), a.min.y.min(b.min.y)),
        max: point(a.max.x.max(b.max.x), a.max.y.max(b.max.y)),
    })
}

impl TextFace for OutlineFace {
    fn name(&self) -> &str {
        &self.name
    }

    fn measure(&self, text: &str, font_size: u32) -> TextExtent {
        let (glyphs, advance) = self.layout(text, font_size);

        match ink_bounds(&glyphs) {
            Some(bounds) => TextExtent {
                width: (bounds.max.x - bounds.min.x).ceil() as u32,
                height: (bounds.max.y - bounds.min.y).ceil() as u32,
            },
            // Whitespace only: no ink, use the advance box
            None => TextExtent {
                width: advance.ceil() as u32,
                height: self
                    .font
                    .as_scaled(PxScale::from(font_size as f32))
                    .height()
                    .ceil() as u32,
            },
        }
    }

    fn draw(&self, canvas: &mut RgbaImage, text: &str, origin: Origin, font_size: u32, color: Rgba<u8>) {
        let (glyphs, _) = self.layout(text, font_size);
        let Some(bounds) = ink_bounds(&glyphs) else {
            return;
        };

        // Shift so the top-left of the ink box lands on the origin
        let shift_x = origin.x - bounds.min.x.floor() as i64;
        let shift_y = origin.y - bounds.min.y.floor() as i64;

        for glyph in &glyphs {
            let glyph_bounds = glyph.px_bounds();
            let left = glyph_bounds.min.x.floor() as i64 + shift_x;
            let top = glyph_bounds.min.y.floor() as i64 + shift_y;

            glyph.draw(|px, py, coverage| {
                put_coverage(canvas, left + i64::from(px), top + i64::from(py), color, coverage);
            });
        }
    }
}

/// Candidate font files, most specific first
fn system_font_candidates() -> Vec<PathBuf> {
    let mut dirs_to_search: Vec<PathBuf> = vec![PathBuf::new()];
    if let Some(user_fonts) = dirs::font_dir() {
        dirs_to_search.push(user_fonts);
    }
    dirs_to_search.extend(SYSTEM_FONT_DIRS.iter().map(PathBuf::from));

    dirs_to_search
        .iter()
        .flat_map(|dir| SYSTEM_FONT_FILES.iter().map(move |file| dir.join(file)))
        .collect()
}

/// Pick the font face for a run.
///
/// Tries `preferred` first, then the named system fonts, then falls back to
/// the built-in bitmap font.
pub fn resolve_face(preferred: Option<&Path>) -> Box<dyn TextFace> {
    if let Some(path) = preferred {
        match OutlineFace::from_file(path) {
            Ok(face) => {
                debug!(font = %path.display(), "Using requested font");
                return Box::new(face);
            }
            Err(e) => warn!(font = %path.display(), error = %e, "Cannot load requested font"),
        }
    }

    for path in system_font_candidates() {
        if !path.is_file() {
            continue;
        }
        match OutlineFace::from_file(&path) {
            Ok(face) => {
                debug!(font = %path.display(), "Using system font");
                return Box::new(face);
            }
            Err(e) => debug!(font = %path.display(), error = %e, "Skipping unreadable font"),
        }
    }

    debug!("No system font available, using built-in bitmap font");
    Box::new(BuiltinFace)
}
