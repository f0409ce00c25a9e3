//! Image compositor.
//!
//! Draws cached or standalone images into the backbuffer at native size,
//! scaled, or rotated about the destination rectangle's center, plus a fast
//! path for caller-owned `0xAARRGGBB` pixel buffers.
//!
//! Every draw is a single `draw_pixmap` with a source-to-backbuffer transform;
//! the filter follows the canvas [`EffectLevel`](super::EffectLevel).

use tiny_skia::{Pixmap, PixmapPaint, PremultipliedColorU8, Transform};

use crate::error::DrawError;
use crate::image::{ImageCache, ImageRef};
use crate::paint::Rgba;

use super::{report, Canvas, EffectLevel};

impl Canvas {
    /// Draws `image` at native size with its top-left corner at `(x, y)`.
    pub fn draw_image<'a>(&mut self, image: impl Into<ImageRef<'a>>, x: f32, y: f32) {
        report("draw_image", self.try_draw_image(image, x, y));
    }

    pub fn try_draw_image<'a>(&mut self, image: impl Into<ImageRef<'a>>, x: f32, y: f32) -> Result<(), DrawError> {
        self.composite(image.into(), |_, _| Transform::from_translate(x, y))
    }

    /// Draws `image` stretched to `width` x `height`.
    pub fn draw_image_scaled<'a>(&mut self, image: impl Into<ImageRef<'a>>, x: f32, y: f32, width: f32, height: f32) {
        report("draw_image_scaled", self.try_draw_image_scaled(image, x, y, width, height));
    }

    pub fn try_draw_image_scaled<'a>(
        &mut self,
        image: impl Into<ImageRef<'a>>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), DrawError> {
        self.composite(image.into(), |iw, ih| {
            Transform::from_translate(x, y).pre_scale(width / iw, height / ih)
        })
    }

    /// Draws `image` at native size rotated `degrees` clockwise about its center.
    pub fn rotate_image<'a>(&mut self, image: impl Into<ImageRef<'a>>, x: f32, y: f32, degrees: f32) {
        let image = image.into();
        let result = self
            .image_size(image)
            .and_then(|(w, h)| self.try_rotate_image_scaled(image, x, y, w, h, degrees));
        report("rotate_image", result);
    }

    /// Draws `image` stretched to `width` x `height` and rotated `degrees`
    /// clockwise about the center of that rectangle.
    pub fn rotate_image_scaled<'a>(
        &mut self,
        image: impl Into<ImageRef<'a>>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        degrees: f32,
    ) {
        report(
            "rotate_image_scaled",
            self.try_rotate_image_scaled(image, x, y, width, height, degrees),
        );
    }

    pub fn try_rotate_image_scaled<'a>(
        &mut self,
        image: impl Into<ImageRef<'a>>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        degrees: f32,
    ) -> Result<(), DrawError> {
        self.composite(image.into(), |iw, ih| {
            let (hw, hh) = (width / 2.0, height / 2.0);
            Transform::from_translate(x + hw, y + hh)
                .pre_rotate(degrees)
                .pre_translate(-hw, -hh)
                .pre_scale(width / iw, height / ih)
        })
    }

    /// Composites a `pw` x `ph` buffer of `0xAARRGGBB` pixels stretched to
    /// `width` x `height` at `(x, y)`.
    ///
    /// The staging pixmap is kept between calls and only reallocated when the
    /// source size changes.
    pub fn draw_pixels(&mut self, x: f32, y: f32, width: f32, height: f32, pixels: &[u32], pw: u32, ph: u32) {
        report("draw_pixels", self.try_draw_pixels(x, y, width, height, pixels, pw, ph));
    }

    #[allow(clippy::too_many_arguments)]
    pub fn try_draw_pixels(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        pixels: &[u32],
        pw: u32,
        ph: u32,
    ) -> Result<(), DrawError> {
        let Canvas { backbuffer, level, scratch, .. } = self;
        let target = backbuffer.as_mut().ok_or(DrawError::NotInitialized)?;

        let needed = pw as usize * ph as usize;
        if pixels.len() < needed || needed == 0 {
            return Err(DrawError::BadPixelBuffer {
                len: pixels.len(),
                width: pw,
                height: ph,
                needed,
            });
        }

        if scratch.as_ref().map(|p| (p.width(), p.height())) != Some((pw, ph)) {
            *scratch = Pixmap::new(pw, ph);
        }
        let Some(staging) = scratch.as_mut() else {
            return Err(DrawError::BadPixelBuffer {
                len: pixels.len(),
                width: pw,
                height: ph,
                needed,
            });
        };

        for (dst, &argb) in staging.pixels_mut().iter_mut().zip(pixels) {
            let [r, g, b, a] = Rgba::from_argb(argb).premultiplied();
            *dst = PremultipliedColorU8::from_rgba(r, g, b, a).unwrap_or(PremultipliedColorU8::TRANSPARENT);
        }

        let transform = Transform::from_translate(x, y).pre_scale(width / pw as f32, height / ph as f32);
        target.draw_pixmap(0, 0, staging.as_ref(), &paint(*level), transform, None);
        Ok(())
    }

    /// Native size of `image`, or why it cannot be drawn.
    fn image_size(&self, image: ImageRef<'_>) -> Result<(f32, f32), DrawError> {
        let pixmap = resolve(&self.images, image)?;
        Ok((pixmap.width() as f32, pixmap.height() as f32))
    }

    /// Draws the resolved image with the transform built from its native size.
    fn composite(
        &mut self,
        image: ImageRef<'_>,
        transform: impl FnOnce(f32, f32) -> Transform,
    ) -> Result<(), DrawError> {
        let Canvas { backbuffer, level, images, .. } = self;
        let target = backbuffer.as_mut().ok_or(DrawError::NotInitialized)?;
        let source = resolve(images, image)?;

        let transform = transform(source.width() as f32, source.height() as f32);
        if !transform.is_finite() {
            return Ok(());
        }
        target.draw_pixmap(0, 0, source.as_ref(), &paint(*level), transform, None);
        Ok(())
    }
}

fn paint(level: EffectLevel) -> PixmapPaint {
    PixmapPaint {
        quality: level.filter(),
        ..PixmapPaint::default()
    }
}

fn resolve<'r>(images: &'r ImageCache, image: ImageRef<'r>) -> Result<&'r Pixmap, DrawError> {
    match image {
        ImageRef::Cached(id) if id.is_null() => Err(DrawError::InvalidImage),
        ImageRef::Cached(id) => images
            .get(id)
            .and_then(|img| img.pixmap())
            .ok_or(DrawError::InvalidImage),
        ImageRef::Standalone(img) => img.pixmap().ok_or(DrawError::ReleasedImage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{Image, ImageId, ImageKey, PixelFormat};

    const RED: Rgba = Rgba::rgb(255, 0, 0);
    const GREEN: Rgba = Rgba::rgb(0, 255, 0);
    const BLUE: Rgba = Rgba::rgb(0, 0, 255);
    const YELLOW: Rgba = Rgba::rgb(255, 255, 0);

    /// 8x8 image with a distinct color per quadrant: red TL, green TR, blue BL, yellow BR.
    fn quadrants() -> Image {
        let mut img = Image::create(8, 8, PixelFormat::Rgba8).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                let c = match (x < 4, y < 4) {
                    (true, true) => RED,
                    (false, true) => GREEN,
                    (true, false) => BLUE,
                    (false, false) => YELLOW,
                };
                img.set_pixel(x, y, c);
            }
        }
        img
    }

    fn canvas() -> Canvas {
        let mut canvas = Canvas::new(32, 32).unwrap();
        canvas.effect_level(EffectLevel::Speed);
        canvas.clear(Rgba::BLACK);
        canvas
    }

    // ── placement ─────────────────────────────────────────────────────────

    #[test]
    fn native_draw_copies_pixels() {
        let mut canvas = canvas();
        let img = quadrants();
        canvas.draw_image(&img, 4.0, 4.0);
        assert_eq!(canvas.pixel(4, 4), Some(RED));
        assert_eq!(canvas.pixel(11, 4), Some(GREEN));
        assert_eq!(canvas.pixel(4, 11), Some(BLUE));
        assert_eq!(canvas.pixel(12, 12), Some(Rgba::BLACK));
    }

    #[test]
    fn scaled_draw_stretches() {
        let mut canvas = canvas();
        canvas.draw_image_scaled(&quadrants(), 0.0, 0.0, 16.0, 16.0);
        assert_eq!(canvas.pixel(7, 7), Some(RED));
        assert_eq!(canvas.pixel(15, 0), Some(GREEN));
        assert_eq!(canvas.pixel(15, 15), Some(YELLOW));
    }

    #[test]
    fn quarter_turn_moves_top_left_to_top_right() {
        let mut canvas = canvas();
        canvas.rotate_image(&quadrants(), 0.0, 0.0, 90.0);
        assert_eq!(canvas.pixel(6, 1), Some(RED));
        assert_eq!(canvas.pixel(1, 1), Some(BLUE));
        assert_eq!(canvas.pixel(6, 6), Some(GREEN));
        assert_eq!(canvas.pixel(1, 6), Some(YELLOW));
    }

    #[test]
    fn scaled_quarter_turn_fills_target_rect() {
        let mut canvas = canvas();
        canvas.rotate_image_scaled(&quadrants(), 8.0, 8.0, 16.0, 16.0, 90.0);
        assert_eq!(canvas.pixel(20, 11), Some(RED));
        assert_eq!(canvas.pixel(11, 11), Some(BLUE));
        assert_eq!(canvas.pixel(20, 20), Some(GREEN));
        assert_eq!(canvas.pixel(11, 20), Some(YELLOW));
        assert_eq!(canvas.pixel(4, 4), Some(Rgba::BLACK));
        assert_eq!(canvas.pixel(27, 27), Some(Rgba::BLACK));
    }

    // ── handles ───────────────────────────────────────────────────────────

    #[test]
    fn cached_images_draw_by_id() {
        let mut canvas = canvas();
        let mut bytes = std::io::Cursor::new(Vec::new());
        quadrants()
            .to_rgba8()
            .unwrap()
            .write_to(&mut bytes, ::image::ImageFormat::Png)
            .unwrap();
        canvas.register_resource("quads", bytes.into_inner());

        let id = canvas.load_image(ImageKey::resource("quads"));
        assert_eq!(canvas.load_image(ImageKey::resource("quads")), id);
        canvas.draw_image(id, 0.0, 0.0);
        assert_eq!(canvas.pixel(7, 7), Some(YELLOW));
    }

    #[test]
    fn closed_and_null_images_are_rejected() {
        let mut canvas = canvas();
        let mut img = quadrants();
        img.close();
        assert_eq!(canvas.try_draw_image(&img, 0.0, 0.0), Err(DrawError::ReleasedImage));
        assert_eq!(canvas.try_draw_image(ImageId::null(), 0.0, 0.0), Err(DrawError::InvalidImage));
        assert_eq!(canvas.pixel(0, 0), Some(Rgba::BLACK));
    }

    // ── raw pixels ────────────────────────────────────────────────────────

    #[test]
    fn draw_pixels_places_argb_buffer() {
        let mut canvas = canvas();
        let pixels = [0xFFFF_0000, 0xFF00_FF00, 0xFF00_00FF, 0x0000_0000];
        canvas.draw_pixels(10.0, 10.0, 4.0, 4.0, &pixels, 2, 2);
        assert_eq!(canvas.pixel(10, 10), Some(RED));
        assert_eq!(canvas.pixel(13, 10), Some(GREEN));
        assert_eq!(canvas.pixel(10, 13), Some(BLUE));
        // Fully transparent source leaves the backbuffer alone.
        assert_eq!(canvas.pixel(13, 13), Some(Rgba::BLACK));
    }

    #[test]
    fn short_pixel_buffer_is_rejected() {
        let mut canvas = canvas();
        let err = canvas.try_draw_pixels(0.0, 0.0, 4.0, 4.0, &[0; 3], 2, 2).unwrap_err();
        assert_eq!(
            err,
            DrawError::BadPixelBuffer {
                len: 3,
                width: 2,
                height: 2,
                needed: 4
            }
        );
    }
}
