//! Rendering session: the backbuffer and everything that draws into it.
//!
//! All drawing lands in an offscreen `tiny_skia::Pixmap` sized to the current
//! viewport. Nothing reaches the window until the owning session presents.
//!
//! Pen, brush and font are materialized lazily (see [`state`]); images come
//! from the keyed [`ImageCache`] or from caller-owned [`Image`]s (see
//! [`compose`]).
//!
//! [`Image`]: crate::image::Image

pub mod compose;
pub mod state;
mod text;

use fontdue::layout::{CoordinateSystem, Layout};
use tiny_skia::{FillRule, FilterQuality, Path, PathBuilder, Pixmap, Rect, Transform};

use crate::coords::{Point, Viewport};
use crate::error::{DrawError, FontError, ImageError, InitError};
use crate::image::{ImageCache, ImageId, ImageKey};
use crate::paint::Rgba;
use crate::text::{FontId, FontStyle, FontSystem};

pub use state::{Materializations, PenStyle};
use state::{BrushState, FontState, PenState};

/// Rendering quality.
///
/// Only affects antialiasing and image filtering; geometry is identical at
/// every level.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum EffectLevel {
    /// No antialiasing, nearest-neighbour image sampling.
    Speed,
    /// Antialiased, bilinear sampling.
    #[default]
    Medium,
    /// Antialiased, bicubic sampling.
    Quality,
}

impl EffectLevel {
    pub(crate) fn anti_alias(self) -> bool {
        !matches!(self, EffectLevel::Speed)
    }

    pub(crate) fn filter(self) -> FilterQuality {
        match self {
            EffectLevel::Speed => FilterQuality::Nearest,
            EffectLevel::Medium => FilterQuality::Bilinear,
            EffectLevel::Quality => FilterQuality::Bicubic,
        }
    }
}

/// Snapshot of the pen scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct PenInfo {
    pub color: Rgba,
    pub width: f32,
    pub style: PenStyle,
    pub dashes: Vec<f32>,
}

/// Snapshot of the font scalars.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FontInfo<'a> {
    pub name: &'a str,
    pub size: f32,
    pub style: FontStyle,
    pub color: Rgba,
}

/// The drawing surface of a session.
///
/// Field order is drop order: backbuffer and cached resources go first, the
/// image cache last.
pub struct Canvas {
    backbuffer: Option<Pixmap>,
    viewport: Viewport,
    level: EffectLevel,

    pen: PenState,
    brush: BrushState,
    font: FontState,

    fonts: FontSystem,
    layout: Layout<()>,
    scratch: Option<Pixmap>,
    stats: Materializations,

    images: ImageCache,
}

impl Canvas {
    /// A canvas with no backbuffer. Every draw is rejected until
    /// [`viewport`](Self::viewport) succeeds.
    pub fn uninitialized() -> Self {
        Self {
            backbuffer: None,
            viewport: Viewport::default(),
            level: EffectLevel::default(),
            pen: PenState::new(),
            brush: BrushState::new(),
            font: FontState::new(),
            fonts: FontSystem::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
            scratch: None,
            stats: Materializations::default(),
            images: ImageCache::new(),
        }
    }

    /// A canvas with a `width` x `height` backbuffer, cleared to transparent black.
    pub fn new(width: u32, height: u32) -> Result<Self, InitError> {
        let mut canvas = Self::uninitialized();
        canvas.viewport(0, 0, width, height)?;
        Ok(canvas)
    }

    // ── backbuffer ────────────────────────────────────────────────────────

    /// Reallocates the backbuffer at `width` x `height`; `(x, y)` is where it
    /// lands inside the window on present.
    ///
    /// The previous contents are discarded. On failure the canvas is left
    /// uninitialized.
    pub fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32) -> Result<(), InitError> {
        self.backbuffer = None;
        self.viewport = Viewport::new(x, y, width, height);

        let pixmap = Pixmap::new(width, height).ok_or(InitError::Backbuffer { width, height })?;
        self.backbuffer = Some(pixmap);
        log::debug!("backbuffer {width}x{height} at ({x}, {y})");
        Ok(())
    }

    pub fn current_viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_initialized(&self) -> bool {
        self.backbuffer.is_some()
    }

    pub fn width(&self) -> u32 {
        self.backbuffer.as_ref().map_or(0, Pixmap::width)
    }

    pub fn height(&self) -> u32 {
        self.backbuffer.as_ref().map_or(0, Pixmap::height)
    }

    /// Straight-alpha color of a backbuffer pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let c = self.backbuffer.as_ref()?.pixel(x, y)?.demultiply();
        Some(Rgba::new(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Copies the backbuffer into a `0x00RRGGBB` frame of `width` x `height`,
    /// offset by the viewport origin. Uncovered pixels are black.
    pub(crate) fn blit(&self, frame: &mut [u32], width: u32, height: u32) {
        frame.fill(0);
        let Some(src) = self.backbuffer.as_ref() else {
            return;
        };

        let (vx, vy) = (i64::from(self.viewport.x), i64::from(self.viewport.y));
        let x0 = vx.max(0);
        let x1 = (vx + i64::from(src.width())).min(i64::from(width));
        if x0 >= x1 {
            return;
        }
        let y0 = vy.max(0);

        let src_pixels: &[[u8; 4]] = bytemuck::cast_slice(src.data());
        let sw = src.width() as usize;
        let dst_rows = frame.chunks_exact_mut(width as usize).take(height as usize);
        for (dy, dst_row) in dst_rows.enumerate().skip(y0 as usize) {
            let sy = (dy as i64 - vy) as usize;
            let Some(src_row) = src_pixels.get(sy * sw..(sy + 1) * sw) else {
                break;
            };
            for dx in x0..x1 {
                // Premultiplied over black is just the color channels.
                let [r, g, b, _] = src_row[(dx - vx) as usize];
                dst_row[dx as usize] = u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b);
            }
        }
    }

    // ── quality ───────────────────────────────────────────────────────────

    /// Selects the rendering quality and returns the previous level.
    ///
    /// Antialiasing is baked into pens and brushes, so they are rebuilt on
    /// next use.
    pub fn effect_level(&mut self, level: EffectLevel) -> EffectLevel {
        let previous = self.level;
        if previous != level {
            self.level = level;
            self.pen.invalidate();
            self.brush.invalidate();
        }
        previous
    }

    pub fn level(&self) -> EffectLevel {
        self.level
    }

    // ── state setters ─────────────────────────────────────────────────────

    pub fn pen_color(&mut self, color: impl Into<Rgba>) {
        self.pen.set_color(color.into());
    }

    pub fn pen_width(&mut self, width: f32) {
        self.pen.set_width(width);
    }

    pub fn pen_style(&mut self, style: PenStyle) {
        self.pen.set_style(style);
    }

    /// Sets a custom on/off pattern in units of pen width and selects
    /// [`PenStyle::Custom`].
    pub fn dash_style(&mut self, pattern: &[f32]) {
        self.pen.set_dashes(pattern);
    }

    pub fn fill_color(&mut self, color: impl Into<Rgba>) {
        self.brush.set_color(color.into());
    }

    pub fn font_name(&mut self, name: &str) {
        self.font.set_name(name);
    }

    pub fn font_size(&mut self, size: f32) {
        self.font.set_size(size);
    }

    pub fn font_style(&mut self, style: FontStyle) {
        self.font.set_style(style);
    }

    pub fn font_color(&mut self, color: impl Into<Rgba>) {
        self.font.set_color(color.into());
    }

    pub fn set_font(&mut self, name: &str, size: f32, style: FontStyle) {
        self.font.set_name(name);
        self.font.set_size(size);
        self.font.set_style(style);
    }

    // ── state getters ─────────────────────────────────────────────────────

    pub fn pen(&self) -> PenInfo {
        PenInfo {
            color: self.pen.color,
            width: self.pen.width,
            style: self.pen.style,
            dashes: self.pen.dashes.clone(),
        }
    }

    pub fn brush(&self) -> Rgba {
        self.brush.color
    }

    pub fn font(&self) -> FontInfo<'_> {
        FontInfo {
            name: &self.font.name,
            size: self.font.size,
            style: self.font.style,
            color: self.font.color,
        }
    }

    /// Resource build counters since the canvas was created.
    pub fn materializations(&self) -> Materializations {
        self.stats
    }

    /// `(pen, brush, font)`: whether each resource is currently built.
    pub fn materialized(&self) -> (bool, bool, bool) {
        (
            self.pen.is_materialized(),
            self.brush.is_materialized(),
            self.font.is_materialized(),
        )
    }

    // ── resources ─────────────────────────────────────────────────────────

    pub fn fonts(&self) -> &FontSystem {
        &self.fonts
    }

    /// Registers a font face; the current font is re-resolved on next use.
    pub fn load_font(&mut self, family: &str, bytes: &[u8]) -> Result<FontId, FontError> {
        let id = self.fonts.load_font(family, bytes)?;
        self.font.invalidate();
        Ok(id)
    }

    pub fn load_font_file(&mut self, family: &str, path: impl AsRef<std::path::Path>) -> Result<FontId, FontError> {
        let id = self.fonts.load_font_file(family, path)?;
        self.font.invalidate();
        Ok(id)
    }

    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    /// Registers encoded bytes for [`ImageKey::Resource`] lookups.
    pub fn register_resource(&mut self, name: impl Into<String>, bytes: impl Into<std::borrow::Cow<'static, [u8]>>) {
        self.images.register_resource(name, bytes);
    }

    /// Loads an image once and returns its id; later calls with the same key
    /// return the same id. Failures are logged and yield [`ImageId::null`].
    pub fn load_image(&mut self, key: impl Into<ImageKey>) -> ImageId {
        let key = key.into();
        match self.images.load(key.clone()) {
            Ok(id) => id,
            Err(e) => {
                log::warn!("failed to load {key:?}: {e}");
                ImageId::null()
            }
        }
    }

    pub fn try_load_image(&mut self, key: impl Into<ImageKey>) -> Result<ImageId, ImageError> {
        self.images.load(key.into())
    }

    // ── clear ─────────────────────────────────────────────────────────────

    /// Fills the whole backbuffer, replacing what was there.
    pub fn clear(&mut self, color: impl Into<Rgba>) {
        report("clear", self.try_clear(color));
    }

    pub fn try_clear(&mut self, color: impl Into<Rgba>) -> Result<(), DrawError> {
        let target = self.backbuffer.as_mut().ok_or(DrawError::NotInitialized)?;
        target.fill(color.into().to_skia());
        Ok(())
    }

    // ── shapes ────────────────────────────────────────────────────────────

    /// Plots a pen-colored dot of pen width centered on `(x, y)`.
    pub fn draw_point(&mut self, x: f32, y: f32) {
        let size = self.pen.width.max(1.0);
        let dot = rect(x - size / 2.0, y - size / 2.0, size, size).map(PathBuilder::from_rect);
        let Canvas { backbuffer, level, pen, stats, .. } = self;
        let result = backbuffer.as_mut().ok_or(DrawError::NotInitialized).map(|target| {
            let pen = pen.materialize(level.anti_alias(), stats);
            if let Some(dot) = dot {
                target.fill_path(&dot, &pen.paint, FillRule::Winding, Transform::identity(), None);
            }
        });
        report("draw_point", result);
    }

    pub fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        report("draw_line", self.try_draw_line(x1, y1, x2, y2));
    }

    pub fn try_draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), DrawError> {
        let mut pb = PathBuilder::new();
        pb.move_to(x1, y1);
        pb.line_to(x2, y2);
        self.stroke(pb.finish())
    }

    pub fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let path = rect(x, y, width, height).map(PathBuilder::from_rect);
        report("draw_rect", self.stroke(path));
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        report("fill_rect", self.try_fill_rect(x, y, width, height));
    }

    pub fn try_fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> Result<(), DrawError> {
        let Canvas { backbuffer, level, brush, stats, .. } = self;
        let target = backbuffer.as_mut().ok_or(DrawError::NotInitialized)?;
        let brush = brush.materialize(level.anti_alias(), stats);
        if let Some(rect) = rect(x, y, width, height) {
            target.fill_rect(rect, &brush.paint, Transform::identity(), None);
        }
        Ok(())
    }

    /// Rectangle outline with elliptical corners `cx` x `cy` in size.
    pub fn draw_roundrect(&mut self, x: f32, y: f32, width: f32, height: f32, cx: f32, cy: f32) {
        report("draw_roundrect", self.stroke(round_rect(x, y, width, height, cx, cy)));
    }

    pub fn fill_roundrect(&mut self, x: f32, y: f32, width: f32, height: f32, cx: f32, cy: f32) {
        report("fill_roundrect", self.fill(round_rect(x, y, width, height, cx, cy), FillRule::Winding));
    }

    /// Ellipse outline centered on `(x, y)` with radii `rx`, `ry`.
    pub fn draw_ellipse(&mut self, x: f32, y: f32, rx: f32, ry: f32) {
        report("draw_ellipse", self.stroke(ellipse(x, y, rx, ry)));
    }

    pub fn fill_ellipse(&mut self, x: f32, y: f32, rx: f32, ry: f32) {
        report("fill_ellipse", self.fill(ellipse(x, y, rx, ry), FillRule::Winding));
    }

    pub fn draw_circle(&mut self, x: f32, y: f32, r: f32) {
        report("draw_circle", self.stroke(PathBuilder::from_circle(x, y, r)));
    }

    pub fn fill_circle(&mut self, x: f32, y: f32, r: f32) {
        report("fill_circle", self.fill(PathBuilder::from_circle(x, y, r), FillRule::Winding));
    }

    pub fn draw_polyline(&mut self, points: &[Point]) {
        report("draw_polyline", self.stroke(poly(points, false)));
    }

    pub fn draw_polygon(&mut self, points: &[Point]) {
        report("draw_polygon", self.stroke(poly(points, true)));
    }

    /// Fills with the even-odd rule, so self-intersecting outlines leave holes.
    pub fn fill_polygon(&mut self, points: &[Point]) {
        report("fill_polygon", self.fill(poly(points, true), FillRule::EvenOdd));
    }

    // ── internals ─────────────────────────────────────────────────────────

    // The backbuffer is checked before any resource is materialized.

    fn stroke(&mut self, path: Option<Path>) -> Result<(), DrawError> {
        let Canvas { backbuffer, level, pen, stats, .. } = self;
        let target = backbuffer.as_mut().ok_or(DrawError::NotInitialized)?;
        let pen = pen.materialize(level.anti_alias(), stats);
        // Degenerate geometry (zero-length, non-finite) builds no path.
        if let Some(path) = path {
            target.stroke_path(&path, &pen.paint, &pen.stroke, Transform::identity(), None);
        }
        Ok(())
    }

    fn fill(&mut self, path: Option<Path>, rule: FillRule) -> Result<(), DrawError> {
        let Canvas { backbuffer, level, brush, stats, .. } = self;
        let target = backbuffer.as_mut().ok_or(DrawError::NotInitialized)?;
        let brush = brush.materialize(level.anti_alias(), stats);
        if let Some(path) = path {
            target.fill_path(&path, &brush.paint, rule, Transform::identity(), None);
        }
        Ok(())
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::uninitialized()
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("viewport", &self.viewport)
            .field("initialized", &self.is_initialized())
            .field("level", &self.level)
            .field("stats", &self.stats)
            .field("images", &self.images.len())
            .finish()
    }
}

/// Logs a rejected draw call.
pub(crate) fn report(op: &str, result: Result<(), DrawError>) {
    if let Err(e) = result {
        log::warn!("{op} ignored: {e}");
    }
}

/// Rect from a possibly negative-size box.
fn rect(x: f32, y: f32, width: f32, height: f32) -> Option<Rect> {
    Rect::from_ltrb(
        x.min(x + width),
        y.min(y + height),
        x.max(x + width),
        y.max(y + height),
    )
}

fn ellipse(x: f32, y: f32, rx: f32, ry: f32) -> Option<Path> {
    rect(x - rx, y - ry, rx * 2.0, ry * 2.0).and_then(PathBuilder::from_oval)
}

fn round_rect(x: f32, y: f32, width: f32, height: f32, cx: f32, cy: f32) -> Option<Path> {
    let r = rect(x, y, width, height)?;
    let rx = (cx / 2.0).clamp(0.0, r.width() / 2.0);
    let ry = (cy / 2.0).clamp(0.0, r.height() / 2.0);
    if rx == 0.0 || ry == 0.0 {
        return Some(PathBuilder::from_rect(r));
    }

    // Cubic approximation of a quarter ellipse.
    const K: f32 = 0.552_284_8;
    let (kx, ky) = (rx * K, ry * K);
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());

    let mut pb = PathBuilder::new();
    pb.move_to(l + rx, t);
    pb.line_to(rt - rx, t);
    pb.cubic_to(rt - rx + kx, t, rt, t + ry - ky, rt, t + ry);
    pb.line_to(rt, b - ry);
    pb.cubic_to(rt, b - ry + ky, rt - rx + kx, b, rt - rx, b);
    pb.line_to(l + rx, b);
    pb.cubic_to(l + rx - kx, b, l, b - ry + ky, l, b - ry);
    pb.line_to(l, t + ry);
    pb.cubic_to(l, t + ry - ky, l + rx - kx, t, l + rx, t);
    pb.close();
    pb.finish()
}

fn poly(points: &[Point], close: bool) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    if close {
        pb.close();
    }
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::rgb(255, 0, 0);

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn uninitialized_canvas_rejects_draws_without_materializing() {
        let mut canvas = Canvas::uninitialized();
        assert_eq!(canvas.try_fill_rect(0.0, 0.0, 1.0, 1.0), Err(DrawError::NotInitialized));
        assert_eq!(canvas.try_draw_line(0.0, 0.0, 1.0, 1.0), Err(DrawError::NotInitialized));
        canvas.draw_circle(5.0, 5.0, 3.0);
        assert_eq!(canvas.materializations(), Materializations::default());
    }

    #[test]
    fn failed_viewport_leaves_canvas_uninitialized() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        assert!(matches!(
            canvas.viewport(0, 0, 0, 10),
            Err(InitError::Backbuffer { width: 0, height: 10 })
        ));
        assert!(!canvas.is_initialized());
        assert_eq!(canvas.try_clear(RED), Err(DrawError::NotInitialized));
    }

    #[test]
    fn viewport_reallocates_at_new_size() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.viewport(10, 20, 30, 40).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (30, 40));
        assert_eq!(canvas.current_viewport(), Viewport::new(10, 20, 30, 40));
    }

    // ── state cache ───────────────────────────────────────────────────────

    #[test]
    fn setters_alone_materialize_nothing() {
        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.pen_color((1, 2, 3));
        canvas.pen_width(3.0);
        canvas.pen_style(PenStyle::DashDot);
        canvas.fill_color(RED);
        canvas.set_font("serif", 20.0, FontStyle::BOLD | FontStyle::ITALIC);
        canvas.font_color(Rgba::WHITE);
        canvas.effect_level(EffectLevel::Quality);

        assert_eq!(canvas.materializations(), Materializations::default());
        assert_eq!(canvas.materialized(), (false, false, false));
        assert_eq!(canvas.pen().width, 3.0);
        assert_eq!(canvas.font().name, "serif");
        assert_eq!(canvas.brush(), RED);
    }

    #[test]
    fn repeated_draws_reuse_one_pen() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        canvas.draw_line(0.0, 0.0, 10.0, 10.0);
        canvas.draw_rect(1.0, 1.0, 5.0, 5.0);
        canvas.draw_circle(8.0, 8.0, 4.0);
        assert_eq!(canvas.materializations().pen, 1);

        canvas.pen_color(RED);
        canvas.draw_line(0.0, 0.0, 10.0, 0.0);
        canvas.draw_line(0.0, 1.0, 10.0, 1.0);
        assert_eq!(canvas.materializations().pen, 2);
        assert_eq!(canvas.materializations().brush, 0);
    }

    #[test]
    fn effect_level_returns_previous_and_rebuilds_paints() {
        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.fill_rect(0.0, 0.0, 2.0, 2.0);
        assert_eq!(canvas.effect_level(EffectLevel::Speed), EffectLevel::Medium);
        assert_eq!(canvas.effect_level(EffectLevel::Speed), EffectLevel::Speed);
        canvas.fill_rect(0.0, 0.0, 2.0, 2.0);
        assert_eq!(canvas.materializations().brush, 2);
    }

    // ── drawing ───────────────────────────────────────────────────────────

    #[test]
    fn fill_rect_covers_exactly_its_box() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        canvas.clear(Rgba::BLACK);
        canvas.fill_color(RED);
        canvas.fill_rect(5.0, 5.0, 10.0, 10.0);
        assert_eq!(canvas.pixel(5, 5), Some(RED));
        assert_eq!(canvas.pixel(14, 14), Some(RED));
        assert_eq!(canvas.pixel(15, 15), Some(Rgba::BLACK));
        assert_eq!(canvas.pixel(4, 10), Some(Rgba::BLACK));
    }

    #[test]
    fn negative_sizes_are_normalized() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        canvas.fill_color(RED);
        canvas.fill_rect(15.0, 15.0, -10.0, -10.0);
        assert_eq!(canvas.pixel(10, 10), Some(RED));
    }

    #[test]
    fn fill_polygon_uses_even_odd() {
        let mut canvas = Canvas::new(30, 30).unwrap();
        canvas.effect_level(EffectLevel::Speed);
        canvas.clear(Rgba::BLACK);
        canvas.fill_color(RED);
        let outer = [(0.0, 0.0), (30.0, 0.0), (30.0, 30.0), (0.0, 30.0), (0.0, 0.0)];
        let inner = [(10.0, 10.0), (20.0, 10.0), (20.0, 20.0), (10.0, 20.0), (10.0, 10.0)];
        let points: Vec<Point> = outer.into_iter().chain(inner).map(Point::from).collect();
        canvas.fill_polygon(&points);
        assert_eq!(canvas.pixel(5, 25), Some(RED));
        assert_eq!(canvas.pixel(15, 15), Some(Rgba::BLACK));
    }

    #[test]
    fn blit_places_backbuffer_at_viewport_origin() {
        let mut canvas = Canvas::uninitialized();
        canvas.viewport(2, 1, 2, 2).unwrap();
        canvas.clear(Rgba::rgb(0x12, 0x34, 0x56));

        let mut frame = vec![0xFFFF_FFFF; 5 * 4];
        canvas.blit(&mut frame, 5, 4);
        assert_eq!(frame[0], 0);
        assert_eq!(frame[5 + 2], 0x0012_3456);
        assert_eq!(frame[2 * 5 + 3], 0x0012_3456);
        assert_eq!(frame[3 * 5 + 3], 0);
    }

    #[test]
    fn load_image_failure_is_null() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        assert!(canvas.load_image("/nonexistent/quill/img.png").is_null());
        assert!(canvas.images().is_empty());
    }
}
