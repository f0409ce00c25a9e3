//! Error taxonomy.
//!
//! - [`InitError`]: session startup failed; nothing is drawable.
//! - [`ImageError`]: an image source is missing, undecodable or unwritable.
//! - [`DrawError`]: a call was made against state that cannot serve it.
//! - [`PresentError`]: the visible surface refused the backbuffer.

use std::path::PathBuf;

use thiserror::Error;

/// Session, window or backbuffer creation failed.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("window size must be non-zero, got {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("platform never resumed the event loop; no window was created")]
    NotResumed,

    #[error("failed to bind drawing surface: {0}")]
    Surface(String),

    #[error("failed to allocate a {width}x{height} backbuffer")]
    Backbuffer { width: u32, height: u32 },
}

/// An image could not be loaded, created or saved.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image: {0}")]
    Decode(#[source] ::image::ImageError),

    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },

    #[error("no resource registered under \"{0}\"")]
    UnknownResource(String),

    #[error("invalid image dimensions {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("image has been closed")]
    Closed,
}

/// A draw, text or image call was issued against unusable state.
///
/// The public drawing API logs these and carries on; the `try_*` forms return
/// them to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DrawError {
    #[error("drawing before the backbuffer was initialized")]
    NotInitialized,

    #[error("image handle has already been released")]
    ReleasedImage,

    #[error("image handle is null or unknown to the cache")]
    InvalidImage,

    #[error("pixel buffer holds {len} pixels, {width}x{height} needs {needed}")]
    BadPixelBuffer { len: usize, width: u32, height: u32, needed: usize },

    #[error("no font is registered for family \"{0}\"")]
    NoFont(String),
}

/// The visible surface could not take the backbuffer.
#[derive(Debug, Error)]
pub enum PresentError {
    #[error("surface error: {0}")]
    Surface(String),
}

/// A font could not be registered.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font: {0}")]
    Parse(&'static str),
}
