use std::collections::HashMap;
use std::path::Path;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Point;
use crate::error::FontError;

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Family-name registry of parsed fonts.
///
/// There is no system font discovery: applications register the faces they
/// use under the family names they will later pass to `font_name`. Lookups are
/// case-insensitive; an unknown family resolves to the first registered face.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
    families: HashMap<String, FontId>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self {
            fonts: Vec::new(),
            families: HashMap::new(),
        }
    }

    /// Parses a TrueType/OpenType face and registers it under `family`.
    ///
    /// Registering a family twice replaces the earlier mapping.
    pub fn load_font(&mut self, family: &str, bytes: &[u8]) -> Result<FontId, FontError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(FontError::Parse)?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        self.families.insert(family.to_lowercase(), id);
        log::debug!("registered font family \"{family}\" as {id:?}");
        Ok(id)
    }

    pub fn load_font_file(&mut self, family: &str, path: impl AsRef<Path>) -> Result<FontId, FontError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_font(family, &bytes)
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Resolves a family name, falling back to the first registered face.
    pub fn resolve(&self, family: &str) -> Option<FontId> {
        self.families
            .get(&family.to_lowercase())
            .copied()
            .or_else(|| (!self.fonts.is_empty()).then_some(FontId(0)))
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Lays out `text` at `px` and returns its `(width, height)` extent.
    ///
    /// Width is the pen advance after the last glyph, not the ink bounds, so
    /// trailing spaces count. Height is at least one line.
    #[must_use]
    pub fn measure(&self, text: &str, id: FontId, px: f32, max_width: Option<f32>) -> Point {
        let Some(font) = self.get(id) else {
            return Point::new(0.0, 0.0);
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings { max_width, ..LayoutSettings::default() });
        layout.append(&[font], &TextStyle::new(text, px, 0));

        let line_height = font
            .horizontal_line_metrics(px)
            .map(|m| m.new_line_size)
            .unwrap_or(px * 1.2);

        let width = layout
            .glyphs()
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, px);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);

        Point::new(width, layout.height().max(line_height))
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}
