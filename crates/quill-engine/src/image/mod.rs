//! Images: standalone surfaces and the keyed load-once cache.
//!
//! Decoding and encoding go through the `image` crate; pixels are stored
//! premultiplied so they composite directly onto the backbuffer.

mod cache;
mod handle;

pub use cache::{ImageCache, ImageId, ImageKey};
pub use handle::{Image, PixelFormat};

/// Anything the compositor can draw.
#[derive(Debug, Copy, Clone)]
pub enum ImageRef<'a> {
    Cached(ImageId),
    Standalone(&'a Image),
}

impl From<ImageId> for ImageRef<'_> {
    fn from(id: ImageId) -> Self {
        ImageRef::Cached(id)
    }
}

impl<'a> From<&'a Image> for ImageRef<'a> {
    fn from(image: &'a Image) -> Self {
        ImageRef::Standalone(image)
    }
}

impl<'a> From<&'a mut Image> for ImageRef<'a> {
    fn from(image: &'a mut Image) -> Self {
        ImageRef::Standalone(image)
    }
}
