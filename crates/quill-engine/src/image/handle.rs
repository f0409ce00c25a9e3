use std::path::Path;

use ::image::{DynamicImage, ImageFormat, RgbaImage};
use tiny_skia::{ColorU8, Pixmap, PremultipliedColorU8};

use crate::error::ImageError;
use crate::paint::Rgba;

/// Pixel layout requested when creating an image.
///
/// Storage is always 32-bit premultiplied RGBA; `Rgb8` images are kept opaque.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PixelFormat {
    #[default]
    Rgba8,
    Rgb8,
}

/// A decoded image surface.
///
/// A standalone `Image` is exclusively owned by whoever created it. [`close`]
/// releases the pixels; it may be called any number of times, and a closed
/// image reports a `0x0` size and draws as a no-op.
///
/// Images handed out by the cache are only ever borrowed immutably, so they
/// cannot be closed behind the cache's back.
///
/// [`close`]: Image::close
#[derive(Clone)]
pub struct Image {
    pixmap: Option<Pixmap>,
    format: PixelFormat,
}

impl Image {
    /// Creates a blank image: transparent for `Rgba8`, opaque black for `Rgb8`.
    pub fn create(width: u32, height: u32, format: PixelFormat) -> Result<Self, ImageError> {
        let mut pixmap = Pixmap::new(width, height).ok_or(ImageError::InvalidSize { width, height })?;
        if format == PixelFormat::Rgb8 {
            pixmap.fill(tiny_skia::Color::BLACK);
        }
        Ok(Self {
            pixmap: Some(pixmap),
            format,
        })
    }

    /// Decodes a BMP, JPEG, PNG or static GIF file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ImageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let image = Self::from_bytes(&bytes)?;
        log::debug!("decoded {}x{} image from {}", image.width(), image.height(), path.display());
        Ok(image)
    }

    /// Decodes an in-memory encoded image; the format is sniffed from its header.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        let decoded = ::image::load_from_memory(bytes).map_err(ImageError::Decode)?;
        let format = if decoded.color().has_alpha() {
            PixelFormat::Rgba8
        } else {
            PixelFormat::Rgb8
        };
        Self::from_rgba8(&decoded.to_rgba8(), format)
    }

    pub(crate) fn from_rgba8(rgba: &RgbaImage, format: PixelFormat) -> Result<Self, ImageError> {
        let (width, height) = rgba.dimensions();
        let mut pixmap = Pixmap::new(width, height).ok_or(ImageError::InvalidSize { width, height })?;

        let src: &[[u8; 4]] = bytemuck::cast_slice(rgba.as_raw());
        for (dst, &[r, g, b, a]) in pixmap.pixels_mut().iter_mut().zip(src) {
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }

        Ok(Self {
            pixmap: Some(pixmap),
            format,
        })
    }

    /// Encodes to `path`; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        let path = path.as_ref();
        let rgba = self.to_rgba8().ok_or(ImageError::Closed)?;

        let encodable = match ImageFormat::from_path(path) {
            // JPEG and BMP writers take no alpha channel.
            Ok(ImageFormat::Jpeg | ImageFormat::Bmp) => DynamicImage::ImageRgba8(rgba).to_rgb8().into(),
            _ => DynamicImage::ImageRgba8(rgba),
        };

        encodable.save(path).map_err(|source| ImageError::Encode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Releases the pixels. Idempotent.
    pub fn close(&mut self) {
        if self.pixmap.take().is_some() {
            log::trace!("image closed");
        }
    }

    /// `true` once closed (or if creation produced no pixels).
    pub fn is_empty(&self) -> bool {
        self.pixmap.is_none()
    }

    pub fn width(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, Pixmap::width)
    }

    pub fn height(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, Pixmap::height)
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Straight-alpha color at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let c = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some(Rgba::new(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Writes a straight-alpha color at `(x, y)`; out of range writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let opaque = self.format == PixelFormat::Rgb8;
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        if x >= pixmap.width() || y >= pixmap.height() {
            return;
        }
        let color = if opaque { Rgba { a: 255, ..color } } else { color };
        let idx = (y * pixmap.width() + x) as usize;
        let [r, g, b, a] = color.premultiplied();
        pixmap.pixels_mut()[idx] =
            PremultipliedColorU8::from_rgba(r, g, b, a).unwrap_or(PremultipliedColorU8::TRANSPARENT);
    }

    /// Premultiplied RGBA bytes, row-major, `width * 4` bytes per row.
    pub fn pixels(&self) -> &[u8] {
        self.pixmap.as_ref().map(Pixmap::data).unwrap_or_default()
    }

    /// Mutable premultiplied RGBA bytes. Writers must keep each channel `<=` alpha.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        match self.pixmap.as_mut() {
            Some(p) => p.data_mut(),
            None => &mut [],
        }
    }

    /// Straight-alpha copy of the pixels.
    pub fn to_rgba8(&self) -> Option<RgbaImage> {
        let pixmap = self.pixmap.as_ref()?;
        let mut raw = Vec::with_capacity(pixmap.data().len());
        for p in pixmap.pixels() {
            let c = p.demultiply();
            raw.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        RgbaImage::from_raw(pixmap.width(), pixmap.height(), raw)
    }

    pub(crate) fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("format", &self.format)
            .finish()
    }
}
