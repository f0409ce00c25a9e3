use std::fmt;

use fontdue::layout::{LayoutSettings, TextStyle};
use tiny_skia::{Paint, PixmapPaint, Rect, Transform};

use crate::coords::Point;
use crate::error::DrawError;
use crate::text::{FontStyle, TextAlign};

use super::{report, Canvas};

/// Horizontal shear applied to upright faces for `FontStyle::ITALIC`.
const ITALIC_SKEW: f32 = 0.2;

impl Canvas {
    /// Draws `text` with its top-left corner at `(x, y)`. `\n` starts a new line.
    pub fn text_out(&mut self, x: f32, y: f32, text: &str) {
        report("text_out", self.try_text_out(x, y, text));
    }

    pub fn try_text_out(&mut self, x: f32, y: f32, text: &str) -> Result<(), DrawError> {
        let settings = LayoutSettings {
            x,
            y,
            ..LayoutSettings::default()
        };
        self.render_text(&settings, text)
    }

    /// Draws `text` wrapped and aligned inside the `width` x `height` box.
    pub fn draw_text(&mut self, x: f32, y: f32, width: f32, height: f32, text: &str, align: TextAlign) {
        report("draw_text", self.try_draw_text(x, y, width, height, text, align));
    }

    pub fn try_draw_text(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        text: &str,
        align: TextAlign,
    ) -> Result<(), DrawError> {
        let settings = LayoutSettings {
            x,
            y,
            max_width: Some(width.max(0.0)),
            max_height: Some(height.max(0.0)),
            horizontal_align: align.horizontal(),
            vertical_align: align.vertical(),
            ..LayoutSettings::default()
        };
        self.render_text(&settings, text)
    }

    /// Formatted [`text_out`](Self::text_out):
    /// `canvas.print(10.0, 10.0, format_args!("fps {fps:.1}"))`.
    pub fn print(&mut self, x: f32, y: f32, args: fmt::Arguments<'_>) {
        match args.as_str() {
            Some(s) => self.text_out(x, y, s),
            None => self.text_out(x, y, &args.to_string()),
        }
    }

    /// Advance width of `text` in the current font; 0 when no font is available.
    pub fn text_width(&self, text: &str) -> f32 {
        self.measure(text).x
    }

    /// Height of `text` in the current font, at least one line.
    pub fn text_height(&self, text: &str) -> f32 {
        self.measure(text).y
    }

    fn measure(&self, text: &str) -> Point {
        match self.fonts.resolve(&self.font.name) {
            Some(id) => self.fonts.measure(text, id, self.font.size, None),
            None => {
                log::warn!("cannot measure text: no font registered for \"{}\"", self.font.name);
                Point::default()
            }
        }
    }

    fn render_text(&mut self, settings: &LayoutSettings, text: &str) -> Result<(), DrawError> {
        let Canvas {
            backbuffer,
            level,
            font,
            fonts,
            layout,
            stats,
            ..
        } = self;
        let target = backbuffer.as_mut().ok_or(DrawError::NotInitialized)?;
        let resource = font.materialize(fonts, stats)?;
        let face = fonts
            .get(resource.id)
            .ok_or_else(|| DrawError::NoFont(format!("{:?}", resource.id)))?;

        layout.reset(settings);
        layout.append(&[face], &TextStyle::new(text, resource.px, 0));
        let Some(lines) = layout.lines() else {
            return Ok(());
        };
        let glyphs = layout.glyphs();

        let bold = resource.style.contains(FontStyle::BOLD);
        let italic = resource.style.contains(FontStyle::ITALIC);
        let glyph_paint = PixmapPaint {
            quality: level.filter(),
            ..PixmapPaint::default()
        };

        let mut line_paint = Paint::default();
        line_paint.set_color(resource.color.to_skia());
        line_paint.anti_alias = false;
        let thickness = (resource.px / 14.0).max(1.0);

        for line in lines {
            let Some(run) = glyphs.get(line.glyph_start..=line.glyph_end) else {
                continue;
            };
            let baseline = line.baseline_y;
            let shear = if italic {
                // Pivot on the baseline so glyphs lean without drifting.
                Transform::from_row(1.0, 0.0, -ITALIC_SKEW, 1.0, ITALIC_SKEW * baseline, 0.0)
            } else {
                Transform::identity()
            };

            for g in run {
                if g.width == 0 || g.height == 0 {
                    continue;
                }
                let Some(bitmap) = resource.glyphs.get_or_rasterize(face, g.key.glyph_index) else {
                    continue;
                };
                let (gx, gy) = (g.x.round() as i32, g.y.round() as i32);
                target.draw_pixmap(gx, gy, bitmap.as_ref(), &glyph_paint, shear, None);
                if bold {
                    target.draw_pixmap(gx + 1, gy, bitmap.as_ref(), &glyph_paint, shear, None);
                }
            }

            if !resource.style.intersects(FontStyle::UNDERLINE | FontStyle::STRIKEOUT) {
                continue;
            }
            let Some(first) = run.first() else {
                continue;
            };
            let left = first.x;
            let right = run
                .iter()
                .map(|g| g.x + face.metrics_indexed(g.key.glyph_index, resource.px).advance_width)
                .fold(left, f32::max);

            let mut decorate = |y: f32| {
                if let Some(rect) = Rect::from_xywh(left, y, right - left, thickness) {
                    target.fill_rect(rect, &line_paint, Transform::identity(), None);
                }
            };
            if resource.style.contains(FontStyle::UNDERLINE) {
                decorate(baseline + thickness);
            }
            if resource.style.contains(FontStyle::STRIKEOUT) {
                decorate(baseline - resource.px * 0.3);
            }
        }

        log::trace!("text \"{text}\": {} glyph(s) cached", resource.glyphs.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Rgba;

    const DEJAVU: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

    fn canvas_with_font() -> Option<Canvas> {
        let bytes = std::fs::read(DEJAVU).ok()?;
        let mut canvas = Canvas::new(200, 60).unwrap();
        canvas.load_font("sans-serif", &bytes).unwrap();
        Some(canvas)
    }

    #[test]
    fn text_without_fonts_is_rejected() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        assert_eq!(
            canvas.try_text_out(0.0, 0.0, "hi"),
            Err(DrawError::NoFont("sans-serif".into()))
        );
        assert_eq!(canvas.text_width("hi"), 0.0);
    }

    #[test]
    fn text_out_materializes_font_once() {
        let Some(mut canvas) = canvas_with_font() else {
            return;
        };
        canvas.clear(Rgba::WHITE);
        canvas.text_out(2.0, 2.0, "Hello");
        canvas.text_out(2.0, 30.0, "Hello");
        assert_eq!(canvas.materializations().font, 1);

        let inked = (0..60).any(|y| (0..200).any(|x| canvas.pixel(x, y) != Some(Rgba::WHITE)));
        assert!(inked);

        canvas.font_style(FontStyle::UNDERLINE);
        canvas.text_out(2.0, 2.0, "Hello");
        assert_eq!(canvas.materializations().font, 2);
    }

    /// Leftmost and rightmost columns carrying non-white pixels.
    fn ink_columns(canvas: &Canvas) -> Option<(u32, u32)> {
        let inked: Vec<u32> = (0..200)
            .filter(|&x| (0..60).any(|y| canvas.pixel(x, y) != Some(Rgba::WHITE)))
            .collect();
        Some((*inked.first()?, *inked.last()?))
    }

    // ── alignment ─────────────────────────────────────────────────────────

    #[test]
    fn draw_text_aligns_within_box() {
        let Some(mut canvas) = canvas_with_font() else {
            return;
        };
        let width = canvas.text_width("Hi");

        canvas.clear(Rgba::WHITE);
        canvas.draw_text(0.0, 0.0, 200.0, 60.0, "Hi", TextAlign::LEFT | TextAlign::TOP);
        let (left, _) = ink_columns(&canvas).unwrap();
        assert!(left < 10, "left-aligned ink starts at {left}");

        canvas.clear(Rgba::WHITE);
        canvas.draw_text(0.0, 0.0, 200.0, 60.0, "Hi", TextAlign::RIGHT | TextAlign::TOP);
        let (left, right) = ink_columns(&canvas).unwrap();
        assert!(right >= 185, "right-aligned ink ends at {right}");
        assert!(left as f32 >= 200.0 - width - 4.0, "right-aligned ink starts at {left}");

        canvas.clear(Rgba::WHITE);
        canvas.draw_text(0.0, 0.0, 200.0, 60.0, "Hi", TextAlign::CENTER);
        let (left, right) = ink_columns(&canvas).unwrap();
        assert!(left > 70 && right < 130, "centered ink spans {left}..{right}");
    }

    #[test]
    fn measured_width_grows_with_text() {
        let Some(canvas) = canvas_with_font() else {
            return;
        };
        let short = canvas.text_width("ab");
        let long = canvas.text_width("abcdef");
        assert!(short > 0.0);
        assert!(long > short);
        assert!(canvas.text_height("ab") >= 16.0);
    }
}
