use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use slotmap::{Key, SlotMap};

use crate::error::ImageError;

use super::handle::Image;

slotmap::new_key_type! {
    /// Handle to an image owned by the [`ImageCache`].
    ///
    /// `ImageId::null()` is the invalid handle returned when loading fails.
    pub struct ImageId;
}

impl ImageId {
    pub fn null() -> Self {
        <Self as Key>::null()
    }

    pub fn is_null(self) -> bool {
        Key::is_null(&self)
    }
}

/// Where a cached image comes from.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ImageKey {
    /// A file on disk, keyed by the path exactly as given.
    Path(PathBuf),
    /// Bytes registered with [`ImageCache::register_resource`].
    Resource(String),
}

impl ImageKey {
    pub fn resource(name: impl Into<String>) -> Self {
        ImageKey::Resource(name.into())
    }
}

impl From<&str> for ImageKey {
    fn from(path: &str) -> Self {
        ImageKey::Path(PathBuf::from(path))
    }
}

impl From<&Path> for ImageKey {
    fn from(path: &Path) -> Self {
        ImageKey::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for ImageKey {
    fn from(path: PathBuf) -> Self {
        ImageKey::Path(path)
    }
}

/// Load-once store of decoded images.
///
/// Images live in a slot-map arena for the cache's whole lifetime; the key map
/// guarantees one [`ImageId`] per [`ImageKey`]. Failed loads are not recorded,
/// so a later call with the same key tries again.
#[derive(Default)]
pub struct ImageCache {
    images: SlotMap<ImageId, Image>,
    keys: HashMap<ImageKey, ImageId>,
    resources: HashMap<String, Cow<'static, [u8]>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers encoded image bytes under `name` for `ImageKey::Resource`.
    ///
    /// Re-registering a name only affects keys that have not been loaded yet.
    pub fn register_resource(&mut self, name: impl Into<String>, bytes: impl Into<Cow<'static, [u8]>>) {
        self.resources.insert(name.into(), bytes.into());
    }

    /// Returns the cached id for `key`, decoding the source on first use.
    pub fn load(&mut self, key: ImageKey) -> Result<ImageId, ImageError> {
        if let Some(&id) = self.keys.get(&key) {
            return Ok(id);
        }

        let image = match &key {
            ImageKey::Path(path) => Image::open(path)?,
            ImageKey::Resource(name) => {
                let bytes = self
                    .resources
                    .get(name)
                    .ok_or_else(|| ImageError::UnknownResource(name.clone()))?;
                Image::from_bytes(bytes)?
            }
        };

        log::debug!("cached {key:?} ({}x{})", image.width(), image.height());
        let id = self.images.insert(image);
        self.keys.insert(key, id);
        Ok(id)
    }

    pub fn get(&self, id: ImageId) -> Option<&Image> {
        self.images.get(id)
    }

    pub fn id_of(&self, key: &ImageKey) -> Option<ImageId> {
        self.keys.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Disposes every cached image. Outstanding ids become dangling and
    /// resolve to nothing.
    pub fn clear(&mut self) {
        if !self.images.is_empty() {
            log::debug!("releasing {} cached image(s)", self.images.len());
        }
        self.images.clear();
        self.keys.clear();
    }
}

impl Drop for ImageCache {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = ::image::RgbaImage::from_pixel(w, h, ::image::Rgba([1, 2, 3, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, ::image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn same_key_returns_same_id_without_redecoding() {
        let mut cache = ImageCache::new();
        cache.register_resource("tile", png_bytes(2, 2));

        let a = cache.load(ImageKey::resource("tile")).unwrap();
        // Swapping the bytes must not matter: the key was already decoded.
        cache.register_resource("tile", png_bytes(9, 9));
        let b = cache.load(ImageKey::resource("tile")).unwrap();

        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(a).map(Image::width), Some(2));
    }

    #[test]
    fn distinct_keys_get_distinct_ids() {
        let mut cache = ImageCache::new();
        cache.register_resource("a", png_bytes(1, 1));
        cache.register_resource("b", png_bytes(1, 1));

        let a = cache.load(ImageKey::resource("a")).unwrap();
        let b = cache.load(ImageKey::resource("b")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn failures_are_not_cached() {
        let mut cache = ImageCache::new();
        assert!(matches!(
            cache.load(ImageKey::resource("later")),
            Err(ImageError::UnknownResource(_))
        ));
        assert!(cache.is_empty());

        cache.register_resource("later", png_bytes(1, 1));
        assert!(cache.load(ImageKey::resource("later")).is_ok());
    }

    #[test]
    fn missing_path_fails_with_io() {
        let mut cache = ImageCache::new();
        let err = cache.load(ImageKey::from("/nonexistent/quill/x.png")).unwrap_err();
        assert!(matches!(err, ImageError::Io { .. }));
    }

    #[test]
    fn clear_invalidates_ids() {
        let mut cache = ImageCache::new();
        cache.register_resource("a", png_bytes(1, 1));
        let id = cache.load(ImageKey::resource("a")).unwrap();
        assert_eq!(cache.id_of(&ImageKey::resource("a")), Some(id));
        assert_eq!(cache.id_of(&ImageKey::resource("b")), None);

        cache.clear();
        assert!(cache.get(id).is_none());
        assert_eq!(cache.id_of(&ImageKey::resource("a")), None);
        assert!(ImageId::null().is_null());
        assert!(!id.is_null());
    }
}
