//! Text measurement, greedy wrapping and dynamic sizing.

use crate::font::ResolvedFont;

/// Dynamic point size from text length and canvas height, used when the
/// caller supplies no explicit size.
///
/// Base is 12% of the canvas height; the >20 and >30 character
/// reductions compound multiplicatively. Rounding is pinned to
/// half-away-from-zero (`f32::round`) so sizes are bit-reproducible.
pub fn auto_font_size(text: &str, canvas_height: u32) -> u32 {
    let mut size = (canvas_height as f32 * 0.12).round();
    let chars = text.chars().count();
    if chars > 20 {
        size = (size * 0.8).round();
    }
    if chars > 30 {
        size = (size * 0.7).round();
    }
    (size as u32).max(24)
}

/// Greedy word wrap against measured glyph advances.
///
/// Text that already fits stays a single line. Otherwise words are
/// appended while the measured candidate line stays within
/// `max_width_px`; a single word wider than the bound gets its own line
/// unsplit (no hyphenation).
pub fn wrap_text(font: &ResolvedFont, text: &str, max_width_px: f32) -> Vec<String> {
    let (full_width, _) = font.measure(text);
    if full_width <= max_width_px {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if font.measure(&candidate).0 <= max_width_px || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Bounding box of a wrapped block: widest line by stacked line heights.
pub fn measure_block(font: &ResolvedFont, lines: &[String]) -> (f32, f32) {
    let width = lines
        .iter()
        .map(|line| font.measure(line).0)
        .fold(0.0f32, f32::max);
    let height = lines.len() as f32 * font.line_height();
    (width, height)
}
