//! Pen, brush and font state with lazily built backend resources.
//!
//! Every state keeps the scalars the caller set plus an optional materialized
//! resource. `None` means dirty: the next draw that needs the resource builds
//! it from the current scalars and later draws reuse it until a contributing
//! scalar changes.

use tiny_skia::{LineCap, LineJoin, Paint, Stroke, StrokeDash};

use crate::error::DrawError;
use crate::paint::Rgba;
use crate::text::{FontId, FontStyle, FontSystem, GlyphCache};

/// How many times each resource kind has been built.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Materializations {
    pub pen: u64,
    pub brush: u64,
    pub font: u64,
}

/// Stroke pattern for lines and outlines.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PenStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    /// Uses the pattern given to `dash_style`.
    Custom,
}

impl PenStyle {
    /// On/off lengths in units of pen width.
    fn pattern(self) -> &'static [f32] {
        match self {
            PenStyle::Solid | PenStyle::Custom => &[],
            PenStyle::Dash => &[3.0, 1.0],
            PenStyle::Dot => &[1.0, 1.0],
            PenStyle::DashDot => &[3.0, 1.0, 1.0, 1.0],
        }
    }
}

// ── pen ───────────────────────────────────────────────────────────────────

pub(crate) struct PenResource {
    pub(crate) paint: Paint<'static>,
    pub(crate) stroke: Stroke,
}

#[derive(Default)]
pub(crate) struct PenState {
    pub(crate) color: Rgba,
    pub(crate) width: f32,
    pub(crate) style: PenStyle,
    pub(crate) dashes: Vec<f32>,
    resource: Option<PenResource>,
}

impl PenState {
    pub(crate) fn new() -> Self {
        Self {
            color: Rgba::BLACK,
            width: 1.0,
            ..Self::default()
        }
    }

    pub(crate) fn set_color(&mut self, color: Rgba) {
        if self.color != color {
            self.color = color;
            self.invalidate();
        }
    }

    pub(crate) fn set_width(&mut self, width: f32) {
        let width = if width.is_finite() { width.max(0.0) } else { 1.0 };
        if self.width != width {
            self.width = width;
            self.invalidate();
        }
    }

    pub(crate) fn set_style(&mut self, style: PenStyle) {
        if self.style != style {
            self.style = style;
            self.invalidate();
        }
    }

    /// Stores a custom on/off pattern and switches to [`PenStyle::Custom`].
    pub(crate) fn set_dashes(&mut self, dashes: &[f32]) {
        if self.dashes != dashes || self.style != PenStyle::Custom {
            self.dashes = dashes.to_vec();
            self.style = PenStyle::Custom;
            self.invalidate();
        }
    }

    pub(crate) fn invalidate(&mut self) {
        self.resource = None;
    }

    pub(crate) fn is_materialized(&self) -> bool {
        self.resource.is_some()
    }

    pub(crate) fn materialize(&mut self, anti_alias: bool, stats: &mut Materializations) -> &PenResource {
        self.resource.get_or_insert_with(|| {
            stats.pen += 1;

            let mut paint = Paint::default();
            paint.set_color(self.color.to_skia());
            paint.anti_alias = anti_alias;

            let pattern: &[f32] = match self.style {
                PenStyle::Custom => &self.dashes,
                other => other.pattern(),
            };
            // Hairlines still dash in whole pixels.
            let unit = self.width.max(1.0);

            let stroke = Stroke {
                width: self.width,
                line_cap: LineCap::Butt,
                line_join: LineJoin::Miter,
                dash: dash(pattern, unit),
                ..Stroke::default()
            };
            PenResource { paint, stroke }
        })
    }
}

/// Scales `pattern` by `unit` into a backend dash; an unusable pattern draws solid.
fn dash(pattern: &[f32], unit: f32) -> Option<StrokeDash> {
    if pattern.is_empty() {
        return None;
    }
    let mut scaled: Vec<f32> = pattern.iter().map(|v| v * unit).collect();
    if scaled.len() % 2 == 1 {
        scaled.extend_from_within(..);
    }
    let dash = StrokeDash::new(scaled, 0.0);
    if dash.is_none() {
        log::warn!("dash pattern {pattern:?} is unusable; drawing solid");
    }
    dash
}

// ── brush ─────────────────────────────────────────────────────────────────

pub(crate) struct BrushResource {
    pub(crate) paint: Paint<'static>,
}

pub(crate) struct BrushState {
    pub(crate) color: Rgba,
    resource: Option<BrushResource>,
}

impl BrushState {
    pub(crate) fn new() -> Self {
        Self {
            color: Rgba::WHITE,
            resource: None,
        }
    }

    pub(crate) fn set_color(&mut self, color: Rgba) {
        if self.color != color {
            self.color = color;
            self.invalidate();
        }
    }

    pub(crate) fn invalidate(&mut self) {
        self.resource = None;
    }

    pub(crate) fn is_materialized(&self) -> bool {
        self.resource.is_some()
    }

    pub(crate) fn materialize(&mut self, anti_alias: bool, stats: &mut Materializations) -> &BrushResource {
        self.resource.get_or_insert_with(|| {
            stats.brush += 1;
            let mut paint = Paint::default();
            paint.set_color(self.color.to_skia());
            paint.anti_alias = anti_alias;
            BrushResource { paint }
        })
    }
}

// ── font ──────────────────────────────────────────────────────────────────

pub(crate) struct FontResource {
    pub(crate) id: FontId,
    pub(crate) px: f32,
    pub(crate) style: FontStyle,
    /// Straight-alpha font color, for decoration lines.
    pub(crate) color: Rgba,
    pub(crate) glyphs: GlyphCache,
}

pub(crate) struct FontState {
    pub(crate) name: String,
    pub(crate) size: f32,
    pub(crate) style: FontStyle,
    pub(crate) color: Rgba,
    resource: Option<FontResource>,
}

impl FontState {
    pub(crate) fn new() -> Self {
        Self {
            name: "sans-serif".to_string(),
            size: 16.0,
            style: FontStyle::NORMAL,
            color: Rgba::BLACK,
            resource: None,
        }
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        if self.name != name {
            self.name = name.to_string();
            self.invalidate();
        }
    }

    pub(crate) fn set_size(&mut self, size: f32) {
        let size = if size.is_finite() && size > 0.0 { size } else { 16.0 };
        if self.size != size {
            self.size = size;
            self.invalidate();
        }
    }

    pub(crate) fn set_style(&mut self, style: FontStyle) {
        if self.style != style {
            self.style = style;
            self.invalidate();
        }
    }

    pub(crate) fn set_color(&mut self, color: Rgba) {
        if self.color != color {
            self.color = color;
            self.invalidate();
        }
    }

    pub(crate) fn invalidate(&mut self) {
        self.resource = None;
    }

    pub(crate) fn is_materialized(&self) -> bool {
        self.resource.is_some()
    }

    /// Resolves the family and prepares a glyph cache for the current size and color.
    pub(crate) fn materialize(
        &mut self,
        fonts: &FontSystem,
        stats: &mut Materializations,
    ) -> Result<&mut FontResource, DrawError> {
        let resource = match &mut self.resource {
            Some(resource) => resource,
            slot => {
                let id = fonts
                    .resolve(&self.name)
                    .ok_or_else(|| DrawError::NoFont(self.name.clone()))?;
                stats.font += 1;
                log::trace!("materialized font \"{}\" {}px {:?}", self.name, self.size, self.style);
                slot.insert(FontResource {
                    id,
                    px: self.size,
                    style: self.style,
                    color: self.color,
                    glyphs: GlyphCache::new(self.size, self.color.premultiplied()),
                })
            }
        };
        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_never_build_resources() {
        let mut stats = Materializations::default();
        let mut pen = PenState::new();
        pen.set_color(Rgba::rgb(1, 2, 3));
        pen.set_width(4.0);
        pen.set_style(PenStyle::Dot);
        assert!(!pen.is_materialized());
        assert_eq!(stats, Materializations::default());

        pen.materialize(true, &mut stats);
        pen.materialize(true, &mut stats);
        assert_eq!(stats.pen, 1);
    }

    #[test]
    fn unchanged_value_keeps_resource() {
        let mut stats = Materializations::default();
        let mut brush = BrushState::new();
        brush.materialize(false, &mut stats);
        brush.set_color(Rgba::WHITE);
        assert!(brush.is_materialized());
        brush.set_color(Rgba::BLACK);
        assert!(!brush.is_materialized());
    }

    #[test]
    fn dash_patterns_scale_with_width() {
        let mut stats = Materializations::default();
        let mut pen = PenState::new();
        pen.set_width(2.0);
        pen.set_style(PenStyle::Dash);
        assert!(pen.materialize(true, &mut stats).stroke.dash.is_some());

        pen.set_style(PenStyle::Solid);
        assert!(pen.materialize(true, &mut stats).stroke.dash.is_none());
    }

    #[test]
    fn odd_and_zero_custom_patterns() {
        // Odd counts repeat to pair up.
        assert!(dash(&[2.0, 1.0, 1.0], 1.0).is_some());
        // All-zero patterns cannot be stroked.
        assert!(dash(&[0.0, 0.0], 1.0).is_none());
    }

    #[test]
    fn font_without_registered_faces_fails() {
        let mut stats = Materializations::default();
        let mut font = FontState::new();
        let err = font.materialize(&FontSystem::new(), &mut stats).err();
        assert_eq!(err, Some(DrawError::NoFont("sans-serif".into())));
        assert_eq!(stats.font, 0);
    }
}
