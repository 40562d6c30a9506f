use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, OnceLock, RwLock},
};

use ab_glyph::{Font as _, FontArc, FontVec, GlyphId, PxScale, ScaleFont as _};

use crate::style::{FontPreset, WeightHint};

/// Guaranteed built-in face so resolution can never fail.
const FALLBACK_FONT_DATA: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");

static FALLBACK_FONT: OnceLock<FontArc> = OnceLock::new();

fn fallback_font() -> FontArc {
    FALLBACK_FONT
        .get_or_init(|| {
            FontArc::try_from_slice(FALLBACK_FONT_DATA)
                .expect("embedded fallback font parses; failure is a packaging bug")
        })
        .clone()
}

/// A loaded font face bound to a concrete pixel size.
///
/// This is the measuring/drawing capability the layout and glyph passes
/// work against; they never touch font files or family names.
#[derive(Clone)]
pub struct ResolvedFont {
    font: FontArc,
    px_size: f32,
}

impl ResolvedFont {
    pub fn px_size(&self) -> f32 {
        self.px_size
    }

    pub fn scale(&self) -> PxScale {
        PxScale::from(self.px_size)
    }

    /// Vertical space one line occupies (ascent - descent + line gap).
    pub fn line_height(&self) -> f32 {
        self.font.as_scaled(self.scale()).height()
    }

    pub fn ascent(&self) -> f32 {
        self.font.as_scaled(self.scale()).ascent()
    }

    /// Kerned advance width and line height of a single line of text.
    pub fn measure(&self, text: &str) -> (f32, f32) {
        let scaled = self.font.as_scaled(self.scale());
        let mut width = 0.0f32;
        let mut prev: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = prev {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }
        (width, scaled.height())
    }

    pub(crate) fn font(&self) -> &FontArc {
        &self.font
    }
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("px_size", &self.px_size)
            .finish_non_exhaustive()
    }
}

/// Process-wide font resolution and cache.
///
/// Candidate families are tried in preset order, first against the
/// configured custom fonts directory, then against system fonts via
/// `fontdb`. The embedded face is the terminal fallback, so
/// [`FontLibrary::resolve`] never errors. Cached entries are immutable
/// and the cache only grows; the (preset, size) key space is small.
pub struct FontLibrary {
    fonts_dir: Option<PathBuf>,
    db: fontdb::Database,
    cache: RwLock<HashMap<(FontPreset, u32), Arc<ResolvedFont>>>,
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontLibrary {
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Self {
            fonts_dir: None,
            db,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Like [`FontLibrary::new`], with a directory of custom font files
    /// (`<Family>.ttf` / `<Family>.otf`) consulted before system fonts.
    pub fn with_fonts_dir(dir: impl Into<PathBuf>) -> Self {
        let mut lib = Self::new();
        lib.fonts_dir = Some(dir.into());
        lib
    }

    /// Resolve a preset to a loaded face at `px_size`. Infallible by
    /// construction; shared reads with a single-writer insert.
    pub fn resolve(&self, preset: FontPreset, px_size: u32) -> Arc<ResolvedFont> {
        let key = (preset, px_size);
        if let Some(hit) = self
            .cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&key)
        {
            return Arc::clone(hit);
        }

        let font = self.load_first_candidate(preset);
        let resolved = Arc::new(ResolvedFont {
            font,
            px_size: px_size as f32,
        });

        Arc::clone(
            self.cache
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .entry(key)
                .or_insert(resolved),
        )
    }

    fn load_first_candidate(&self, preset: FontPreset) -> FontArc {
        let primary = preset.primary_family();
        for family in std::iter::once(primary).chain(preset.fallback_families().iter().copied()) {
            if let Some(font) = self.load_from_fonts_dir(family) {
                tracing::debug!(?preset, family, source = "fonts_dir", "font resolved");
                return font;
            }
            if let Some(font) = self.load_from_system(family, preset.weight_hint()) {
                tracing::debug!(?preset, family, source = "system", "font resolved");
                return font;
            }
        }
        tracing::debug!(?preset, "no candidate family available, using embedded face");
        fallback_font()
    }

    fn load_from_fonts_dir(&self, family: &str) -> Option<FontArc> {
        let dir = self.fonts_dir.as_ref()?;
        for ext in ["ttf", "otf"] {
            let path = dir.join(format!("{family}.{ext}"));
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };
            match FontVec::try_from_vec(bytes) {
                Ok(font) => return Some(FontArc::from(font)),
                Err(_) => continue,
            }
        }
        None
    }

    fn load_from_system(&self, family: &str, weight: WeightHint) -> Option<FontArc> {
        let query = fontdb::Query {
            families: &[fontdb::Family::Name(family)],
            weight: match weight {
                WeightHint::Bold => fontdb::Weight::BOLD,
                WeightHint::Regular => fontdb::Weight::NORMAL,
            },
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| {
                FontVec::try_from_vec_and_index(data.to_vec(), index)
                    .ok()
                    .map(FontArc::from)
            })
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_library() -> FontLibrary {
        // No system fonts, no custom dir: every preset must land on the
        // embedded face.
        FontLibrary {
            fonts_dir: None,
            db: fontdb::Database::new(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    #[test]
    fn resolve_never_fails_without_any_fonts() {
        let lib = empty_library();
        for preset in [
            FontPreset::Impact,
            FontPreset::Modern,
            FontPreset::Dramatic,
            FontPreset::Clean,
        ] {
            let font = lib.resolve(preset, 48);
            let (w, h) = font.measure("HELLO");
            assert!(w > 0.0);
            assert!(h > 0.0);
        }
    }

    #[test]
    fn resolve_caches_by_preset_and_size() {
        let lib = empty_library();
        let a = lib.resolve(FontPreset::Impact, 48);
        let b = lib.resolve(FontPreset::Impact, 48);
        assert!(Arc::ptr_eq(&a, &b));

        let c = lib.resolve(FontPreset::Impact, 64);
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(c.px_size(), 64.0);
    }

    #[test]
    fn measure_scales_with_px_size() {
        let lib = empty_library();
        let small = lib.resolve(FontPreset::Clean, 24);
        let large = lib.resolve(FontPreset::Clean, 96);
        assert!(large.measure("abc").0 > small.measure("abc").0);
        assert!(large.line_height() > small.line_height());
    }

    #[test]
    fn missing_fonts_dir_is_ignored() {
        let lib = FontLibrary {
            fonts_dir: Some(PathBuf::from("/nonexistent/fonts")),
            db: fontdb::Database::new(),
            cache: RwLock::new(HashMap::new()),
        };
        let font = lib.resolve(FontPreset::Modern, 32);
        assert!(font.measure("x").0 > 0.0);
    }
}
