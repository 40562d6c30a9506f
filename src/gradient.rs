//! Directional contrast gradient: a black band with a per-row linear
//! alpha ramp, blended under text regions for legibility.

use image::RgbaImage;

use crate::compose;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GradientDirection {
    Top,
    #[default]
    Bottom,
}

/// Gradient band parameters. Defaults mirror the original service call
/// (`bottom`, peak opacity 0.6, 30% of the canvas height).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GradientSpec {
    pub direction: GradientDirection,
    pub peak_opacity: f32,
    pub band_height_ratio: f32,
}

impl Default for GradientSpec {
    fn default() -> Self {
        Self {
            direction: GradientDirection::Bottom,
            peak_opacity: 0.6,
            band_height_ratio: 0.3,
        }
    }
}

/// Alpha-blend the gradient band onto `img` in place.
///
/// For `Bottom`, alpha rises linearly from 0 at the band's top edge
/// toward the image's bottom edge; `Top` is the mirror. Degenerate
/// opacity/ratio values clamp rather than fail.
pub fn apply_gradient(img: &mut RgbaImage, spec: &GradientSpec) {
    let (width, height) = img.dimensions();
    let opacity = if spec.peak_opacity.is_finite() {
        spec.peak_opacity.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let ratio = if spec.band_height_ratio.is_finite() {
        spec.band_height_ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let band = (height as f32 * ratio).round() as u32;
    let band = band.min(height);
    if band == 0 || opacity == 0.0 {
        return;
    }

    for y in 0..band {
        let alpha = band_alpha(spec.direction, opacity, band, y);
        if alpha == 0 {
            continue;
        }
        let row = match spec.direction {
            GradientDirection::Bottom => height - band + y,
            GradientDirection::Top => y,
        };
        for x in 0..width {
            let px = img.get_pixel_mut(x, row);
            px.0 = compose::over(px.0, [0, 0, 0, alpha]);
        }
    }
}

/// Per-row alpha; `y` is 0-indexed from the band's top edge. Rounding is
/// pinned to half-away-from-zero.
fn band_alpha(direction: GradientDirection, opacity: f32, band: u32, y: u32) -> u8 {
    let t = y as f32 / band as f32;
    let ramp = match direction {
        GradientDirection::Bottom => t,
        GradientDirection::Top => 1.0 - t,
    };
    (255.0 * opacity * ramp).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_ramp_is_nondecreasing() {
        let band = 252;
        let mut prev = 0u8;
        for y in 0..band {
            let a = band_alpha(GradientDirection::Bottom, 0.5, band, y);
            assert!(a >= prev);
            prev = a;
        }
    }

    #[test]
    fn top_ramp_is_nonincreasing() {
        let band = 252;
        let mut prev = u8::MAX;
        for y in 0..band {
            let a = band_alpha(GradientDirection::Top, 0.5, band, y);
            assert!(a <= prev);
            prev = a;
        }
    }

    #[test]
    fn ramp_endpoints_match_formula() {
        // 720-tall canvas, ratio 0.35 -> band 252 rows.
        let band = (720.0f32 * 0.35).round() as u32;
        assert_eq!(band, 252);

        // Band row 0 (canvas row 468) is fully transparent.
        assert_eq!(band_alpha(GradientDirection::Bottom, 0.5, band, 0), 0);
        // Last band row (canvas row 719): round(255 * 0.5 * 251/252).
        assert_eq!(band_alpha(GradientDirection::Bottom, 0.5, band, 251), 127);

        assert_eq!(band_alpha(GradientDirection::Top, 0.5, band, 0), 128);
    }

    #[test]
    fn rows_outside_band_are_untouched() {
        let mut img = RgbaImage::from_pixel(4, 100, image::Rgba([200, 200, 200, 255]));
        apply_gradient(
            &mut img,
            &GradientSpec {
                direction: GradientDirection::Bottom,
                peak_opacity: 1.0,
                band_height_ratio: 0.3,
            },
        );
        // Band covers rows 70..100.
        for y in 0..70 {
            assert_eq!(img.get_pixel(0, y).0, [200, 200, 200, 255]);
        }
        // Bottom row is darker than the band's first row.
        assert!(img.get_pixel(0, 99).0[0] < img.get_pixel(0, 71).0[0]);
    }

    #[test]
    fn zero_opacity_or_band_is_noop() {
        let base = RgbaImage::from_pixel(4, 40, image::Rgba([9, 9, 9, 255]));

        let mut img = base.clone();
        apply_gradient(
            &mut img,
            &GradientSpec {
                peak_opacity: 0.0,
                ..GradientSpec::default()
            },
        );
        assert_eq!(img.as_raw(), base.as_raw());

        let mut img = base.clone();
        apply_gradient(
            &mut img,
            &GradientSpec {
                band_height_ratio: 0.0,
                ..GradientSpec::default()
            },
        );
        assert_eq!(img.as_raw(), base.as_raw());
    }

    #[test]
    fn degenerate_values_are_clamped() {
        let base = RgbaImage::from_pixel(2, 20, image::Rgba([100, 100, 100, 255]));
        let mut img = base.clone();
        apply_gradient(
            &mut img,
            &GradientSpec {
                direction: GradientDirection::Bottom,
                peak_opacity: 7.5,
                band_height_ratio: 3.0,
            },
        );
        // Clamps to opacity 1.0 over the full height; last row goes
        // almost black.
        assert!(img.get_pixel(0, 19).0[0] < 10);
    }
}
