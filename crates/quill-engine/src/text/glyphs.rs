use std::collections::HashMap;

use tiny_skia::{Pixmap, PremultipliedColorU8};

/// Colored glyph bitmaps for one materialized font.
///
/// Glyphs are rasterized on first use and kept until the owning font resource
/// is superseded, so repeated `text_out` calls with unchanged font state do
/// not re-rasterize. Keyed by glyph index; size and color are fixed for the
/// lifetime of the cache.
pub(crate) struct GlyphCache {
    px: f32,
    color: [u8; 4],
    glyphs: HashMap<u16, Option<Pixmap>>,
}

impl GlyphCache {
    /// `color` is premultiplied RGBA.
    pub(crate) fn new(px: f32, color: [u8; 4]) -> Self {
        Self {
            px,
            color,
            glyphs: HashMap::new(),
        }
    }

    /// Returns the glyph bitmap, rasterizing it on first request.
    ///
    /// `None` for glyphs with no coverage (spaces, control characters).
    pub(crate) fn get_or_rasterize(&mut self, font: &fontdue::Font, glyph_index: u16) -> Option<&Pixmap> {
        let (px, color) = (self.px, self.color);
        self.glyphs
            .entry(glyph_index)
            .or_insert_with(|| rasterize(font, glyph_index, px, color))
            .as_ref()
    }

    pub(crate) fn len(&self) -> usize {
        self.glyphs.len()
    }
}

fn rasterize(font: &fontdue::Font, glyph_index: u16, px: f32, color: [u8; 4]) -> Option<Pixmap> {
    let (metrics, coverage) = font.rasterize_indexed(glyph_index, px);
    let mut pixmap = Pixmap::new(metrics.width as u32, metrics.height as u32)?;

    let [r, g, b, a] = color.map(u16::from);
    for (dst, &c) in pixmap.pixels_mut().iter_mut().zip(coverage.iter()) {
        let c = u16::from(c);
        let scale = |v: u16| ((v * c + 127) / 255) as u8;
        *dst = PremultipliedColorU8::from_rgba(scale(r), scale(g), scale(b), scale(a))
            .unwrap_or(PremultipliedColorU8::TRANSPARENT);
    }
    Some(pixmap)
}
