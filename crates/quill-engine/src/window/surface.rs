use std::num::NonZeroU32;
use std::rc::Rc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::canvas::Canvas;
use crate::error::{InitError, PresentError};

/// CPU surface bound to a native window.
///
/// Frames are `0x00RRGGBB`; the canvas is blitted in on every present.
pub(crate) struct WindowSurface {
    surface: softbuffer::Surface<Rc<Window>, Rc<Window>>,
    _context: softbuffer::Context<Rc<Window>>,
    size: PhysicalSize<u32>,
}

impl WindowSurface {
    pub(crate) fn new(window: Rc<Window>) -> Result<Self, InitError> {
        let context = softbuffer::Context::new(window.clone()).map_err(|e| InitError::Surface(e.to_string()))?;
        let surface = softbuffer::Surface::new(&context, window.clone()).map_err(|e| InitError::Surface(e.to_string()))?;

        let mut this = Self {
            surface,
            _context: context,
            size: PhysicalSize::new(0, 0),
        };
        this.resize(window.inner_size());
        Ok(this)
    }

    /// Tracks the client size. A zero-sized (minimized) window keeps the old
    /// buffer and skips presents until it is restored.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        let (Some(w), Some(h)) = (NonZeroU32::new(new_size.width), NonZeroU32::new(new_size.height)) else {
            return;
        };
        if let Err(e) = self.surface.resize(w, h) {
            log::warn!("surface resize to {}x{} failed: {e}", new_size.width, new_size.height);
        }
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub(crate) fn present(&mut self, canvas: &Canvas) -> Result<(), PresentError> {
        let PhysicalSize { width, height } = self.size;
        if width == 0 || height == 0 {
            return Ok(());
        }

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| PresentError::Surface(e.to_string()))?;
        canvas.blit(&mut buffer, width, height);
        buffer.present().map_err(|e| PresentError::Surface(e.to_string()))
    }
}
