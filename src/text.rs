//! Glyph compositing: shadow, stroke and fill passes onto a transparent
//! overlay.

use ab_glyph::{Font as _, GlyphId, ScaleFont as _, point};
use image::{Rgba, RgbaImage};

use crate::{
    color::{ColorScheme, Rgb},
    compose::{self, mul_div255},
    font::ResolvedFont,
    layout,
};

const EDGE_MARGIN_PX: i32 = 10;

/// Shadow pass alpha (~50%).
const SHADOW_ALPHA: u8 = 128;

/// Render a wrapped text block onto `overlay`.
///
/// `anchor_px` is the block's geometric center in overlay pixels. The
/// draw origin is clamped so the block keeps a 10 px margin; the lower
/// bound is applied last, so a canvas too small for both bounds degrades
/// to the margin instead of failing.
///
/// Pass order is shadow, stroke, fill; each pass covers the whole block
/// with per-line centered alignment. Non-positive shadow offsets and
/// stroke widths disable their pass.
pub fn render_block(
    overlay: &mut RgbaImage,
    lines: &[String],
    font: &ResolvedFont,
    scheme: &ColorScheme,
    stroke_width: i32,
    shadow_offset: i32,
    anchor_px: (f32, f32),
) {
    if lines.iter().all(|line| line.is_empty()) {
        return;
    }

    let (canvas_w, canvas_h) = overlay.dimensions();
    let (block_w, block_h) = layout::measure_block(font, lines);

    let x = (anchor_px.0 - block_w / 2.0) as i32;
    let y = (anchor_px.1 - block_h / 2.0) as i32;
    let x = x.min(canvas_w as i32 - block_w as i32 - EDGE_MARGIN_PX).max(EDGE_MARGIN_PX);
    let y = y.min(canvas_h as i32 - block_h as i32 - EDGE_MARGIN_PX).max(EDGE_MARGIN_PX);

    if shadow_offset > 0 {
        draw_block(
            overlay,
            lines,
            font,
            (x + shadow_offset, y + shadow_offset),
            block_w,
            scheme.shadow,
            SHADOW_ALPHA,
        );
    }

    if stroke_width > 0 {
        // Filled-disc neighborhood for a round outline.
        for dy in -stroke_width..=stroke_width {
            for dx in -stroke_width..=stroke_width {
                if dx * dx + dy * dy <= stroke_width * stroke_width {
                    draw_block(
                        overlay,
                        lines,
                        font,
                        (x + dx, y + dy),
                        block_w,
                        scheme.stroke,
                        255,
                    );
                }
            }
        }
    }

    draw_block(overlay, lines, font, (x, y), block_w, scheme.fill, 255);
}

fn draw_block(
    overlay: &mut RgbaImage,
    lines: &[String],
    font: &ResolvedFont,
    origin: (i32, i32),
    block_w: f32,
    color: Rgb,
    alpha: u8,
) {
    let line_height = font.line_height();
    let ascent = font.ascent();
    for (i, line) in lines.iter().enumerate() {
        let (line_w, _) = font.measure(line);
        let line_x = origin.0 as f32 + (block_w - line_w) / 2.0;
        let baseline_y = origin.1 as f32 + i as f32 * line_height + ascent;
        draw_line(overlay, line, font, line_x, baseline_y, color, alpha);
    }
}

fn draw_line(
    overlay: &mut RgbaImage,
    text: &str,
    font: &ResolvedFont,
    start_x: f32,
    baseline_y: f32,
    color: Rgb,
    alpha: u8,
) {
    let face = font.font();
    let scaled = face.as_scaled(font.scale());
    let (canvas_w, canvas_h) = overlay.dimensions();

    let mut cursor = start_x;
    let mut prev: Option<GlyphId> = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = prev {
            cursor += scaled.kern(prev, id);
        }

        let glyph = id.with_scale_and_position(font.scale(), point(cursor, baseline_y));
        if let Some(outlined) = face.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let gx = px as i32 + bounds.min.x as i32;
                let gy = py as i32 + bounds.min.y as i32;
                if gx < 0 || gy < 0 || gx >= canvas_w as i32 || gy >= canvas_h as i32 {
                    return;
                }
                let a = (coverage.clamp(0.0, 1.0) * f32::from(alpha)).round() as u8;
                if a == 0 {
                    return;
                }
                let src = [
                    mul_div255(u16::from(color.r), u16::from(a)),
                    mul_div255(u16::from(color.g), u16::from(a)),
                    mul_div255(u16::from(color.b), u16::from(a)),
                    a,
                ];
                let dst = overlay.get_pixel(gx as u32, gy as u32).0;
                overlay.put_pixel(gx as u32, gy as u32, Rgba(compose::over(dst, src)));
            });
        }

        cursor += scaled.h_advance(id);
        prev = Some(id);
    }
}
