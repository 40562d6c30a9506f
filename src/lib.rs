//! Thumbtext composites styled, readable text and contrast gradients
//! onto raster images, entirely offline.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: PNG/JPEG bytes into premultiplied RGBA8
//! 2. **Resolve**: font preset + fallbacks into a cached face at a
//!    concrete pixel size
//! 3. **Layout**: dynamic sizing and greedy word wrap against measured
//!    glyph advances
//! 4. **Render**: shadow, stroke and fill passes onto a transparent
//!    overlay, then "over" composited onto the base
//! 5. **Encode**: flatten to opaque RGB and emit PNG with pinned
//!    settings
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: every call is a pure function of its inputs;
//!   rounding modes are pinned.
//! - **No IO in the engine**: font files are read once per (preset,
//!   size) and cached; image bytes come from the caller.
//! - **Premultiplied RGBA8** end-to-end until the final flatten.
//!
//! The only shared mutable state is the font cache inside
//! [`FontLibrary`]; everything else is call-local, so one
//! [`OverlayEngine`] can serve concurrent callers.
#![forbid(unsafe_code)]

mod color;
mod compose;
mod engine;
mod error;
mod font;
mod gradient;
mod layout;
mod style;
mod text;

pub use color::{ColorPreset, ColorScheme, Rgb};
pub use engine::OverlayEngine;
pub use error::{OverlayError, OverlayResult};
pub use font::{FontLibrary, ResolvedFont};
pub use gradient::{GradientDirection, GradientSpec};
pub use layout::{auto_font_size, measure_block, wrap_text};
pub use style::{FontPreset, Position, PositionPreset, TextSpec, TextStyle, WeightHint};
