//! Compositing watermark text onto images.

use super::{resolve_face, ImageSize, Origin, StyleParameters, TextExtent, TextFace, MAX_FONT_SIZE};
use crate::error::RenderError;
use image::{DynamicImage, Rgba, RgbaImage};

/// Renders the watermark for one run's style.
///
/// The font face is resolved once, when the renderer is built.
pub struct WatermarkRenderer {
    style: StyleParameters,
    face: Box<dyn TextFace>,
}

impl std::fmt::Debug for WatermarkRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatermarkRenderer")
            .field("style", &self.style)
            .field("face", &self.face.name())
            .finish()
    }
}

impl WatermarkRenderer {
    /// Build a renderer, resolving the best available font face
    pub fn new(style: StyleParameters) -> Self {
        let face = resolve_face(style.font_path.as_deref());
        Self::with_face(style, face)
    }

    /// Build a renderer with an explicit font face
    pub fn with_face(style: StyleParameters, face: Box<dyn TextFace>) -> Self {
        Self { style, face }
    }

    pub fn face_name(&self) -> &str {
        self.face.name()
    }

    /// Measure `text` and work out where it goes on an image of `size`
    pub fn placement(&self, size: ImageSize, text: &str) -> (Origin, TextExtent) {
        let extent = self.face.measure(text, self.style.font_size);
        (self.style.anchor.origin(size, extent), extent)
    }

    /// Return a flattened RGB copy of `image` with `text` drawn on it.
    pub fn render(&self, image: &DynamicImage, text: &str) -> Result<DynamicImage, RenderError> {
        if text.is_empty() {
            return Err(RenderError::EmptyText);
        }
        if !(1..=MAX_FONT_SIZE).contains(&self.style.font_size) {
            return Err(RenderError::InvalidFontSize);
        }

        let mut base = image.to_rgba8();
        let size = ImageSize {
            width: base.width(),
            height: base.height(),
        };
        let (origin, _) = self.placement(size, text);

        let mut overlay = RgbaImage::new(size.width, size.height);
        self.face.draw(
            &mut overlay,
            text,
            origin,
            self.style.font_size,
            self.style.color.opaque(),
        );

        alpha_composite(&mut base, &overlay);

        Ok(DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(base).to_rgb8()))
    }
}

/// Blend `overlay` over `base` in place. Both must be the same size.
///
/// Uses the Porter-Duff "over" operator.
pub fn alpha_composite(base: &mut RgbaImage, overlay: &RgbaImage) {
    for (bottom, top) in base.pixels_mut().zip(overlay.pixels()) {
        if top[3] == 0 {
            continue;
        }
        *bottom = blend_pixels(*bottom, *top);
    }
}

fn blend_pixels(bottom: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    let top_alpha = f32::from(top[3]) / 255.0;
    let bottom_alpha = f32::from(bottom[3]) / 255.0;

    let out_alpha = top_alpha + bottom_alpha * (1.0 - top_alpha);
    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |t: u8, b: u8| -> u8 {
        let t = f32::from(t) / 255.0;
        let b = f32::from(b) / 255.0;
        let result = (t * top_alpha + b * bottom_alpha * (1.0 - top_alpha)) / out_alpha;
        (result * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend(top[0], bottom[0]),
        blend(top[1], bottom[1]),
        blend(top[2], bottom[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::watermark::{Anchor, BuiltinFace, Color};
    use image::{ColorType, Rgb, RgbImage};

    fn renderer(anchor: Anchor, font_size: u32) -> WatermarkRenderer {
        let style = StyleParameters {
            font_size,
            color: Color::white(),
            anchor,
            font_path: None,
        };
        WatermarkRenderer::with_face(style, Box::new(BuiltinFace))
    }

    fn black(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([0, 0, 0])))
    }

    #[test]
    fn output_is_opaque_rgb_with_same_dimensions() {
        let transparent = DynamicImage::ImageRgba8(RgbaImage::new(120, 80));

        let out = renderer(Anchor::Center, 16).render(&transparent, "2024-01-01").unwrap();

        assert_eq!(out.color(), ColorType::Rgb8);
        assert_eq!((out.width(), out.height()), (120, 80));
    }

    #[test]
    fn top_left_text_starts_at_margin() {
        let out = renderer(Anchor::TopLeft, 16)
            .render(&black(200, 100), "2023-07-04")
            .unwrap()
            .to_rgb8();

        // First glyph is '2': top row 01110 at 2px per cell
        assert_eq!(*out.get_pixel(10, 10), Rgb([0, 0, 0]));
        assert_eq!(*out.get_pixel(12, 10), Rgb([255, 255, 255]));
        assert_eq!(*out.get_pixel(13, 11), Rgb([255, 255, 255]));
        assert_eq!(*out.get_pixel(5, 5), Rgb([0, 0, 0]));
    }

    #[test]
    fn only_pixels_inside_text_box_change() {
        let source = black(200, 100);
        let r = renderer(Anchor::BottomRight, 16);
        let size = ImageSize {
            width: 200,
            height: 100,
        };
        let (origin, extent) = r.placement(size, "2023-07-04");
        assert_eq!(origin, Origin { x: 72, y: 76 });

        let out = r.render(&source, "2023-07-04").unwrap().to_rgb8();

        let mut changed = 0;
        for (x, y, pixel) in out.enumerate_pixels() {
            let inside = i64::from(x) >= origin.x
                && i64::from(x) < origin.x + i64::from(extent.width)
                && i64::from(y) >= origin.y
                && i64::from(y) < origin.y + i64::from(extent.height);
            if *pixel != Rgb([0, 0, 0]) {
                assert!(inside, "pixel ({}, {}) changed outside the text box", x, y);
                changed += 1;
            }
        }
        assert!(changed > 0);
    }

    #[test]
    fn render_does_not_mutate_source_and_is_repeatable() {
        let source = black(64, 32);
        let before = source.clone();
        let r = renderer(Anchor::Center, 8);

        let first = r.render(&source, "2024-01-01").unwrap();
        let second = r.render(&source, "2024-01-01").unwrap();

        assert_eq!(source.as_bytes(), before.as_bytes());
        assert_eq!(first.as_bytes(), second.as_bytes());
        assert_ne!(first.as_bytes(), source.as_bytes());
    }

    #[test]
    fn oversized_text_is_clipped_not_rejected() {
        let out = renderer(Anchor::BottomRight, 64)
            .render(&black(20, 20), "2024-01-01")
            .unwrap();
        assert_eq!((out.width(), out.height()), (20, 20));
    }

    #[test]
    fn empty_text_is_rejected() {
        let result = renderer(Anchor::Center, 16).render(&black(10, 10), "");
        assert_eq!(result.unwrap_err(), RenderError::EmptyText);
    }

    #[test]
    fn zero_font_size_is_rejected() {
        let result = renderer(Anchor::Center, 0).render(&black(10, 10), "2024-01-01");
        assert_eq!(result.unwrap_err(), RenderError::InvalidFontSize);
    }

    #[test]
    fn huge_font_size_is_rejected_not_drawn() {
        let result = renderer(Anchor::Center, u32::MAX).render(&black(10, 10), "2024-01-01");
        assert_eq!(result.unwrap_err(), RenderError::InvalidFontSize);

        let result = renderer(Anchor::Center, MAX_FONT_SIZE + 1).render(&black(10, 10), "2024-01-01");
        assert_eq!(result.unwrap_err(), RenderError::InvalidFontSize);
    }

    #[test]
    fn largest_font_size_renders_clipped() {
        let out = renderer(Anchor::TopLeft, MAX_FONT_SIZE)
            .render(&black(40, 30), "2024-01-01")
            .unwrap();
        assert_eq!((out.width(), out.height()), (40, 30));
    }

    #[test]
    fn opaque_top_replaces_bottom() {
        let blended = blend_pixels(Rgba([10, 20, 30, 255]), Rgba([200, 100, 50, 255]));
        assert_eq!(blended, Rgba([200, 100, 50, 255]));
    }

    #[test]
    fn half_alpha_top_mixes_with_opaque_bottom() {
        let blended = blend_pixels(Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 128]));
        assert_eq!(blended[3], 255);
        assert!(blended[0] > 120 && blended[0] < 135);
    }

    #[test]
    fn transparent_overlay_leaves_base_untouched() {
        let mut base = RgbaImage::from_pixel(3, 3, Rgba([7, 8, 9, 100]));
        let overlay = RgbaImage::new(3, 3);

        alpha_composite(&mut base, &overlay);

        assert!(base.pixels().all(|p| *p == Rgba([7, 8, 9, 100])));
    }
}
