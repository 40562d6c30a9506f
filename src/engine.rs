//! Compositing facade: decode, style resolution, layout, glyph and
//! gradient passes, encode.

use std::io::Cursor;
use std::path::PathBuf;

use image::{ImageFormat, RgbaImage};

use crate::{
    compose,
    error::{OverlayError, OverlayResult},
    font::FontLibrary,
    gradient::{self, GradientSpec},
    layout,
    style::{TextSpec, TextStyle},
    text,
};

/// Entry point for text and gradient compositing.
///
/// Owns the process-wide font cache; construct once and share by
/// reference across calls. Every call is a deterministic, CPU-bound
/// function of its inputs: same bytes in, same bytes out.
pub struct OverlayEngine {
    fonts: FontLibrary,
}

impl Default for OverlayEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayEngine {
    pub fn new() -> Self {
        Self {
            fonts: FontLibrary::new(),
        }
    }

    /// Engine with a custom fonts directory consulted before system
    /// fonts.
    pub fn with_fonts_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            fonts: FontLibrary::with_fonts_dir(dir),
        }
    }

    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    /// Overlay styled text onto a PNG/JPEG image and return it as PNG.
    ///
    /// Empty text performs no drawing pass; the image is returned
    /// re-encoded but pixel-identical.
    #[tracing::instrument(skip(self, image), fields(len = image.len()))]
    pub fn compose_text_overlay(
        &self,
        image: &[u8],
        text: &str,
        style: &TextStyle,
    ) -> OverlayResult<Vec<u8>> {
        style.validate()?;
        let mut base = decode_rgba_premul(image)?;
        self.compose_on_image(&mut base, text, style);
        encode_png(&base)
    }

    /// Apply a sequence of independent overlays; each pass composites
    /// onto the previous pass's result.
    #[tracing::instrument(skip(self, image, overlays), fields(count = overlays.len()))]
    pub fn compose_text_overlays(
        &self,
        image: &[u8],
        overlays: &[TextSpec],
    ) -> OverlayResult<Vec<u8>> {
        for spec in overlays {
            spec.style.validate()?;
        }
        let mut base = decode_rgba_premul(image)?;
        for spec in overlays {
            self.compose_on_image(&mut base, &spec.text, &spec.style);
        }
        encode_png(&base)
    }

    /// Blend a contrast gradient band onto the image.
    #[tracing::instrument(skip(self, image))]
    pub fn apply_gradient(&self, image: &[u8], spec: &GradientSpec) -> OverlayResult<Vec<u8>> {
        let mut base = decode_rgba_premul(image)?;
        gradient::apply_gradient(&mut base, spec);
        encode_png(&base)
    }

    /// Gradient-then-text convenience for the common thumbnail path.
    #[tracing::instrument(skip(self, image))]
    pub fn compose_thumbnail(
        &self,
        image: &[u8],
        text: &str,
        style: &TextStyle,
        gradient_spec: Option<&GradientSpec>,
    ) -> OverlayResult<Vec<u8>> {
        style.validate()?;
        let mut base = decode_rgba_premul(image)?;
        if let Some(spec) = gradient_spec {
            gradient::apply_gradient(&mut base, spec);
        }
        self.compose_on_image(&mut base, text, style);
        encode_png(&base)
    }

    fn compose_on_image(&self, base: &mut RgbaImage, text: &str, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        let (width, height) = base.dimensions();

        let px_size = style
            .font_size
            .unwrap_or_else(|| layout::auto_font_size(text, height));
        let font = self.fonts.resolve(style.font_preset, px_size);

        let max_width_px = width as f32 * style.effective_max_width_ratio();
        let lines = layout::wrap_text(&font, text, max_width_px);

        let (x_ratio, y_ratio) = style.position.ratios();
        let anchor = (width as f32 * x_ratio, height as f32 * y_ratio);

        let mut overlay = RgbaImage::new(width, height);
        text::render_block(
            &mut overlay,
            &lines,
            &font,
            &style.colors(),
            style.stroke_width,
            style.shadow_offset,
            anchor,
        );
        compose::over_in_place(base, &overlay);
    }
}

fn decode_rgba_premul(bytes: &[u8]) -> OverlayResult<RgbaImage> {
    let dyn_img =
        image::load_from_memory(bytes).map_err(|e| OverlayError::decode(e.to_string()))?;
    let mut rgba = dyn_img.to_rgba8();
    compose::premultiply_rgba8_in_place(&mut rgba);
    Ok(rgba)
}

/// Pinned output encoding: PNG with the `image` crate's default
/// settings, so equal pixels give equal bytes.
fn encode_png(img: &RgbaImage) -> OverlayResult<Vec<u8>> {
    let rgb = compose::flatten_to_rgb(img);
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(rgb)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| OverlayError::encode(e.to_string()))?;
    Ok(buf)
}
