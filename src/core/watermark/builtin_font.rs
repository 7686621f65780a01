//! Compiled-in 5x7 bitmap font.
//!
//! Covers digits, `A-Z` (lowercase is drawn as uppercase), space and
//! `- : / .`. Anything else is drawn as a hollow box. Each row is five bits,
//! most significant bit on the left.

use super::font::put_coverage;
use super::{Origin, TextExtent, TextFace};
use image::{Rgba, RgbaImage};

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
/// Glyph width plus one column of spacing
const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;
/// Font size covered by one unscaled glyph cell
const BASE_SIZE: u32 = 8;

type Glyph = [u8; GLYPH_HEIGHT as usize];

const UNKNOWN: Glyph = [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F];

fn glyph_for(c: char) -> Glyph {
    match c.to_ascii_uppercase() {
        ' ' => [0x00; 7],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '/' => [0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        _ => UNKNOWN,
    }
}

/// The fallback face. Always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFace;

impl BuiltinFace {
    /// Pixels per glyph cell at `font_size`
    fn scale(font_size: u32) -> u32 {
        (font_size / BASE_SIZE).max(1)
    }
}

impl TextFace for BuiltinFace {
    fn name(&self) -> &str {
        "built-in bitmap"
    }

    fn measure(&self, text: &str, font_size: u32) -> TextExtent {
        let scale = Self::scale(font_size);
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);

        TextExtent {
            // No spacing column after the last glyph
            width: chars
                .saturating_mul(GLYPH_ADVANCE)
                .saturating_sub(1)
                .saturating_mul(scale),
            height: GLYPH_HEIGHT.saturating_mul(scale),
        }
    }

    fn draw(&self, canvas: &mut RgbaImage, text: &str, origin: Origin, font_size: u32, color: Rgba<u8>) {
        let scale = i64::from(Self::scale(font_size));
        let advance = i64::from(GLYPH_ADVANCE) * scale;
        let width = i64::from(canvas.width());
        let height = i64::from(canvas.height());

        for (index, c) in text.chars().enumerate() {
            let glyph = glyph_for(c);
            let glyph_x = origin.x + index as i64 * advance;

            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (0x10 >> col) == 0 {
                        continue;
                    }

                    let cell_x = glyph_x + i64::from(col) * scale;
                    let cell_y = origin.y + row as i64 * scale;

                    // Only the part of the cell that lands on the canvas
                    let x_range = cell_x.max(0)..(cell_x + scale).min(width);
                    let y_range = cell_y.max(0)..(cell_y + scale).min(height);
                    for y in y_range {
                        for x in x_range.clone() {
                            put_coverage(canvas, x, y, color, 1.0);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn measure_date_text() {
        // 10 glyphs * 6 columns - 1 trailing spacing column, doubled
        let extent = BuiltinFace.measure("2023-07-04", 16);
        assert_eq!(
            extent,
            TextExtent {
                width: 118,
                height: 14
            }
        );
    }

    #[test]
    fn small_sizes_clamp_to_one_pixel_cells() {
        let extent = BuiltinFace.measure("1", 3);
        assert_eq!(
            extent,
            TextExtent {
                width: 5,
                height: 7
            }
        );
    }

    #[test]
    fn larger_font_size_gives_larger_extent() {
        let small = BuiltinFace.measure("2024-01-01", 16);
        let large = BuiltinFace.measure("2024-01-01", 48);
        assert!(large.width > small.width);
        assert!(large.height > small.height);
    }

    #[test]
    fn draw_stays_inside_measured_box() {
        let mut canvas = RgbaImage::new(100, 40);
        let origin = Origin { x: 3, y: 5 };
        let extent = BuiltinFace.measure("2024-01-01", 8);

        BuiltinFace.draw(&mut canvas, "2024-01-01", origin, 8, WHITE);

        for (x, y, pixel) in canvas.enumerate_pixels() {
            if pixel[3] > 0 {
                assert!(x >= 3 && x < 3 + extent.width, "x={} outside box", x);
                assert!(y >= 5 && y < 5 + extent.height, "y={} outside box", y);
            }
        }
        assert!(canvas.pixels().any(|p| p[3] == 255));
    }

    #[test]
    fn draw_dash_is_middle_row() {
        let mut canvas = RgbaImage::new(5, 7);
        BuiltinFace.draw(&mut canvas, "-", Origin { x: 0, y: 0 }, 8, WHITE);

        for x in 0..5 {
            assert_eq!(canvas.get_pixel(x, 3)[3], 255);
            assert_eq!(canvas.get_pixel(x, 2)[3], 0);
        }
    }

    #[test]
    fn measure_saturates_at_huge_sizes() {
        let extent = BuiltinFace.measure("2024-01-01", u32::MAX);
        assert_eq!(extent.width, u32::MAX);
        assert_eq!(extent.height, u32::MAX);
    }

    #[test]
    fn draw_at_huge_size_only_touches_the_canvas() {
        let mut canvas = RgbaImage::new(8, 8);
        BuiltinFace.draw(&mut canvas, "8", Origin { x: -4, y: -4 }, u32::MAX, WHITE);

        // The top-left cell of '8' is unlit and every lit cell starts past the canvas
        assert!(canvas.pixels().all(|p| p[3] == 0));

        // Cells are 250_000_000 px; row 3 of '-' starts at y = 0
        BuiltinFace.draw(&mut canvas, "-", Origin { x: 0, y: -750_000_000 }, 2_000_000_000, WHITE);
        assert!(canvas.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn lowercase_draws_like_uppercase() {
        assert_eq!(glyph_for('a'), glyph_for('A'));
        assert_eq!(glyph_for('é'), UNKNOWN);
    }

    #[test]
    fn empty_text_measures_zero_width() {
        assert_eq!(BuiltinFace.measure("", 16).width, 0);
    }
}
