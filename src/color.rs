use crate::error::{OverlayError, OverlayResult};

/// Straight (non-premultiplied) 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB`, case-insensitive.
    pub fn from_hex(hex: &str) -> OverlayResult<Self> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| OverlayError::invalid_config("hex color must start with '#'"))?;
        if !digits.is_ascii() {
            return Err(OverlayError::invalid_config(format!(
                "invalid hex digits in '{hex}'"
            )));
        }

        let channel = |s: &str| {
            u8::from_str_radix(s, 16)
                .map_err(|_| OverlayError::invalid_config(format!("invalid hex digits in '{hex}'")))
        };

        match digits.len() {
            3 => Ok(Self::new(
                channel(&digits[0..1])? * 17,
                channel(&digits[1..2])? * 17,
                channel(&digits[2..3])? * 17,
            )),
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            n => Err(OverlayError::invalid_config(format!(
                "hex color must be #RGB or #RRGGBB, got {n} digits"
            ))),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Fill, stroke and shadow colors used by the glyph passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColorScheme {
    pub fill: Rgb,
    pub stroke: Rgb,
    pub shadow: Rgb,
}

/// Named color schemes. A closed set: unknown wire names fail to
/// deserialize instead of silently hitting a fallback table entry.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorPreset {
    #[default]
    WhiteShadow,
    YellowPop,
    RedAlert,
    BlueTrust,
    GreenSuccess,
}

impl ColorPreset {
    pub const ALL: [ColorPreset; 5] = [
        ColorPreset::WhiteShadow,
        ColorPreset::YellowPop,
        ColorPreset::RedAlert,
        ColorPreset::BlueTrust,
        ColorPreset::GreenSuccess,
    ];

    pub const fn scheme(self) -> ColorScheme {
        const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
        const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

        match self {
            ColorPreset::WhiteShadow => ColorScheme {
                fill: WHITE,
                stroke: BLACK,
                shadow: BLACK,
            },
            ColorPreset::YellowPop => ColorScheme {
                fill: Rgb::new(0xFF, 0xFF, 0x00),
                stroke: BLACK,
                shadow: BLACK,
            },
            ColorPreset::RedAlert => ColorScheme {
                fill: Rgb::new(0xFF, 0x00, 0x00),
                stroke: WHITE,
                shadow: BLACK,
            },
            ColorPreset::BlueTrust => ColorScheme {
                fill: Rgb::new(0x00, 0xBF, 0xFF),
                stroke: BLACK,
                shadow: BLACK,
            },
            ColorPreset::GreenSuccess => ColorScheme {
                fill: Rgb::new(0x00, 0xFF, 0x00),
                stroke: BLACK,
                shadow: BLACK,
            },
        }
    }
}
