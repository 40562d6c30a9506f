use crate::color::{ColorPreset, ColorScheme};
use crate::error::{OverlayError, OverlayResult};

/// Named anchor points for the text block's geometric center, as
/// width/height ratios.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PositionPreset {
    TopLeft,
    TopCenter,
    TopRight,
    Center,
    BottomLeft,
    #[default]
    BottomCenter,
    BottomRight,
}

impl PositionPreset {
    pub const fn ratios(self) -> (f32, f32) {
        match self {
            PositionPreset::TopLeft => (0.05, 0.1),
            PositionPreset::TopCenter => (0.5, 0.1),
            PositionPreset::TopRight => (0.95, 0.1),
            PositionPreset::Center => (0.5, 0.5),
            PositionPreset::BottomLeft => (0.05, 0.85),
            PositionPreset::BottomCenter => (0.5, 0.85),
            PositionPreset::BottomRight => (0.95, 0.85),
        }
    }
}

/// Anchor for the text block: a named preset or an explicit ratio pair.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Position {
    Preset(PositionPreset),
    Custom { x: f32, y: f32 },
}

impl Default for Position {
    fn default() -> Self {
        Position::Preset(PositionPreset::BottomCenter)
    }
}

impl Position {
    /// Anchor ratios in [0,1]x[0,1]. Out-of-range custom values are
    /// clamped; non-finite values fall back to the canvas center.
    pub fn ratios(self) -> (f32, f32) {
        match self {
            Position::Preset(p) => p.ratios(),
            Position::Custom { x, y } => (clamp_ratio(x), clamp_ratio(y)),
        }
    }
}

fn clamp_ratio(v: f32) -> f32 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.5 }
}

/// Weight preference passed to the system font query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeightHint {
    Regular,
    Bold,
}

/// Named font stacks. Each preset resolves through an ordered family
/// list; resolution itself lives in [`crate::font::FontLibrary`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FontPreset {
    #[default]
    Impact,
    Modern,
    Dramatic,
    Clean,
}

impl FontPreset {
    pub const fn primary_family(self) -> &'static str {
        match self {
            FontPreset::Impact => "Impact",
            FontPreset::Modern => "Montserrat",
            FontPreset::Dramatic => "Bebas Neue",
            FontPreset::Clean => "Roboto",
        }
    }

    pub const fn fallback_families(self) -> &'static [&'static str] {
        match self {
            FontPreset::Impact => &["Arial Black", "Helvetica Bold", "DejaVuSans-Bold"],
            FontPreset::Modern => &["Arial", "Helvetica", "DejaVuSans"],
            FontPreset::Dramatic => &["Impact", "Arial Black", "DejaVuSans-Bold"],
            FontPreset::Clean => &["Arial", "Helvetica", "DejaVuSans"],
        }
    }

    pub const fn weight_hint(self) -> WeightHint {
        match self {
            FontPreset::Dramatic => WeightHint::Regular,
            _ => WeightHint::Bold,
        }
    }
}

/// Per-call text styling. Built by the caller, never persisted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub position: Position,
    pub font_preset: FontPreset,
    pub color_scheme: ColorPreset,
    /// Overrides `color_scheme` when set.
    pub custom_colors: Option<ColorScheme>,
    /// Explicit pixel size; computed from text length and canvas height
    /// when absent.
    pub font_size: Option<u32>,
    /// Outline radius in pixels; `<= 0` disables the stroke pass.
    pub stroke_width: i32,
    /// Drop shadow offset in pixels; `<= 0` disables the shadow pass.
    pub shadow_offset: i32,
    /// Maximum text width as a ratio of canvas width.
    pub max_width_ratio: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            position: Position::default(),
            font_preset: FontPreset::default(),
            color_scheme: ColorPreset::default(),
            custom_colors: None,
            font_size: None,
            stroke_width: 4,
            shadow_offset: 5,
            max_width_ratio: 0.9,
        }
    }
}

impl TextStyle {
    /// Boundary validation. Rendering anomalies (disabled stroke/shadow,
    /// odd ratios) degrade instead of failing; a zero font size would
    /// silently draw nothing, so it is rejected here.
    pub fn validate(&self) -> OverlayResult<()> {
        if self.font_size == Some(0) {
            return Err(OverlayError::invalid_config("font_size must be > 0"));
        }
        Ok(())
    }

    pub fn colors(&self) -> ColorScheme {
        self.custom_colors
            .unwrap_or_else(|| self.color_scheme.scheme())
    }

    /// The wrap-width ratio actually used: degenerate values fall back
    /// to the default 0.9.
    pub fn effective_max_width_ratio(&self) -> f32 {
        let r = self.max_width_ratio;
        if r.is_finite() && r > 0.0 && r <= 1.0 {
            r
        } else {
            0.9
        }
    }
}

/// One text overlay in a batch: the text plus its styling.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextSpec {
    pub text: String,
    #[serde(flatten)]
    pub style: TextStyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_ratios_match_registry() {
        assert_eq!(PositionPreset::BottomCenter.ratios(), (0.5, 0.85));
        assert_eq!(PositionPreset::TopLeft.ratios(), (0.05, 0.1));
        assert_eq!(PositionPreset::Center.ratios(), (0.5, 0.5));
    }

    #[test]
    fn custom_ratios_are_clamped() {
        let p = Position::Custom { x: -0.5, y: 1.5 };
        assert_eq!(p.ratios(), (0.0, 1.0));

        let p = Position::Custom {
            x: f32::NAN,
            y: 0.25,
        };
        assert_eq!(p.ratios(), (0.5, 0.25));
    }

    #[test]
    fn position_deserializes_preset_or_custom() {
        let p: Position = serde_json::from_str("\"bottom_center\"").unwrap();
        assert_eq!(p, Position::Preset(PositionPreset::BottomCenter));

        let p: Position = serde_json::from_str(r#"{"x": 0.2, "y": 0.7}"#).unwrap();
        assert_eq!(p, Position::Custom { x: 0.2, y: 0.7 });
    }

    #[test]
    fn style_defaults_match_service_defaults() {
        let style = TextStyle::default();
        assert_eq!(style.stroke_width, 4);
        assert_eq!(style.shadow_offset, 5);
        assert_eq!(style.max_width_ratio, 0.9);
        assert_eq!(style.font_preset, FontPreset::Impact);
        assert_eq!(style.color_scheme, ColorPreset::WhiteShadow);
        assert!(style.font_size.is_none());
    }

    #[test]
    fn validate_rejects_zero_font_size() {
        let style = TextStyle {
            font_size: Some(0),
            ..TextStyle::default()
        };
        assert!(style.validate().is_err());
        assert!(TextStyle::default().validate().is_ok());
    }

    #[test]
    fn custom_colors_override_preset() {
        let custom = ColorScheme {
            fill: crate::color::Rgb::new(1, 2, 3),
            stroke: crate::color::Rgb::new(4, 5, 6),
            shadow: crate::color::Rgb::new(7, 8, 9),
        };
        let style = TextStyle {
            custom_colors: Some(custom),
            ..TextStyle::default()
        };
        assert_eq!(style.colors(), custom);
        assert_eq!(
            TextStyle::default().colors(),
            ColorPreset::WhiteShadow.scheme()
        );
    }

    #[test]
    fn degenerate_wrap_ratio_falls_back() {
        let style = TextStyle {
            max_width_ratio: 0.0,
            ..TextStyle::default()
        };
        assert_eq!(style.effective_max_width_ratio(), 0.9);

        let style = TextStyle {
            max_width_ratio: 0.5,
            ..TextStyle::default()
        };
        assert_eq!(style.effective_max_width_ratio(), 0.5);
    }

    #[test]
    fn text_spec_json_with_flattened_style() {
        let spec: TextSpec = serde_json::from_str(
            r#"{"text": "HELLO", "position": "top_center", "font_preset": "dramatic"}"#,
        )
        .unwrap();
        assert_eq!(spec.text, "HELLO");
        assert_eq!(spec.style.font_preset, FontPreset::Dramatic);
        assert_eq!(spec.style.stroke_width, 4);
    }
}
