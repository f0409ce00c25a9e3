use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::error::OsError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::canvas::Canvas;
use crate::error::{InitError, PresentError};
use crate::paint::Rgba;

use super::config::{WindowConfig, WindowStyle};
use super::surface::WindowSurface;
use super::translate::{EventTranslator, PlatformEvent};

/// Pump rounds allowed for the platform to resume and create the window.
const BOOTSTRAP_ROUNDS: usize = 100;
const BOOTSTRAP_WAIT: Duration = Duration::from_millis(10);

/// Where presents go and where platform events come from.
pub(crate) enum Platform {
    /// Window and event loop owned by the session.
    Native(NativeWindow),
    /// Window owned by a host application that forwards its events.
    Hosted(HostedWindow),
    /// No window; presents copy into an in-memory front buffer.
    Offscreen(FrontBuffer),
}

pub(crate) struct NativeWindow {
    surface: WindowSurface,
    window: Rc<Window>,
    translator: EventTranslator,
    event_loop: EventLoop<()>,
}

pub(crate) struct HostedWindow {
    surface: WindowSurface,
    window: Rc<Window>,
    translator: EventTranslator,
}

pub(crate) struct FrontBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl FrontBuffer {
    fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize],
            width,
            height,
        }
    }
}

impl Platform {
    pub(crate) fn create(config: &WindowConfig) -> Result<Self, InitError> {
        match config.style {
            WindowStyle::Backbuffer => Ok(Platform::Offscreen(FrontBuffer::new(config.width, config.height))),
            _ => NativeWindow::create(config).map(Platform::Native),
        }
    }

    pub(crate) fn hosted(window: Rc<Window>) -> Result<Self, InitError> {
        let surface = WindowSurface::new(window.clone())?;
        Ok(Platform::Hosted(HostedWindow {
            surface,
            window,
            translator: EventTranslator::default(),
        }))
    }

    pub(crate) fn is_offscreen(&self) -> bool {
        matches!(self, Platform::Offscreen(_))
    }

    pub(crate) fn window(&self) -> Option<&Rc<Window>> {
        match self {
            Platform::Native(n) => Some(&n.window),
            Platform::Hosted(h) => Some(&h.window),
            Platform::Offscreen(_) => None,
        }
    }

    /// Collects pending platform events into `out`, waiting at most `timeout`
    /// (`None`: until something arrives).
    ///
    /// Hosted windows never block here; their host drives the loop.
    pub(crate) fn pump(&mut self, timeout: Option<Duration>, out: &mut VecDeque<PlatformEvent>) {
        match self {
            Platform::Native(native) => native.pump(timeout, out),
            Platform::Hosted(_) => {}
            Platform::Offscreen(_) => {
                // Nothing can arrive; only a timer deadline is worth waiting for.
                if let Some(wait) = timeout.filter(|d| !d.is_zero()) {
                    std::thread::sleep(wait);
                }
            }
        }
    }

    /// Feeds a host-delivered window event through the translator.
    pub(crate) fn translate(&mut self, event: &WindowEvent, out: &mut VecDeque<PlatformEvent>) {
        match self {
            Platform::Native(n) => n.translator.translate(event, out),
            Platform::Hosted(h) => h.translator.translate(event, out),
            Platform::Offscreen(_) => log::debug!("offscreen session ignored {event:?}"),
        }
    }

    pub(crate) fn present(&mut self, canvas: &Canvas) -> Result<(), PresentError> {
        match self {
            Platform::Native(NativeWindow { surface, .. }) | Platform::Hosted(HostedWindow { surface, .. }) => {
                surface.present(canvas)
            }
            Platform::Offscreen(front) => {
                canvas.blit(&mut front.pixels, front.width, front.height);
                Ok(())
            }
        }
    }

    /// Follows a client-area size change reported by the platform.
    pub(crate) fn resized(&mut self, width: u32, height: u32) {
        match self {
            Platform::Native(NativeWindow { surface, .. }) | Platform::Hosted(HostedWindow { surface, .. }) => {
                surface.resize(PhysicalSize::new(width, height));
            }
            Platform::Offscreen(front) => *front = FrontBuffer::new(width, height),
        }
    }

    /// Asks for a new client size. Platforms that apply it synchronously are
    /// followed immediately; others report back through a resize event.
    pub(crate) fn request_size(&mut self, width: u32, height: u32) {
        let applied = match self.window() {
            Some(window) => window.request_inner_size(PhysicalSize::new(width, height)),
            None => Some(PhysicalSize::new(width, height)),
        };
        if let Some(size) = applied {
            self.resized(size.width, size.height);
        }
    }

    pub(crate) fn client_size(&self) -> (u32, u32) {
        match self {
            Platform::Native(NativeWindow { surface, .. }) | Platform::Hosted(HostedWindow { surface, .. }) => {
                let size = surface.size();
                (size.width, size.height)
            }
            Platform::Offscreen(front) => (front.width, front.height),
        }
    }

    pub(crate) fn set_title(&self, title: &str) {
        if let Some(window) = self.window() {
            window.set_title(title);
        }
    }

    pub(crate) fn set_fullscreen(&self, on: bool) {
        if let Some(window) = self.window() {
            window.set_fullscreen(on.then_some(Fullscreen::Borderless(None)));
        }
    }

    /// Schedules a platform redraw. Returns `false` when the platform has no
    /// window to redraw and the caller must queue the paint itself.
    pub(crate) fn request_redraw(&self) -> bool {
        match self.window() {
            Some(window) => {
                window.request_redraw();
                true
            }
            None => false,
        }
    }

    /// Reads the offscreen front buffer.
    pub(crate) fn front_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let Platform::Offscreen(front) = self else {
            return None;
        };
        if x >= front.width || y >= front.height {
            return None;
        }
        let v = front.pixels[(y * front.width + x) as usize];
        Some(Rgba::from_argb(v | 0xFF00_0000))
    }
}

impl NativeWindow {
    fn create(config: &WindowConfig) -> Result<Self, InitError> {
        let mut event_loop = EventLoop::new()?;

        let mut attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(config.style == WindowStyle::Sizeable)
            .with_visible(config.visible);
        if let Some((x, y)) = config.position {
            attrs = attrs.with_position(PhysicalPosition::new(x, y));
        }
        if config.style == WindowStyle::Fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        // Windows can only be created from inside the loop once it has resumed.
        let mut boot = Bootstrap {
            attrs: Some(attrs),
            window: None,
        };
        for _ in 0..BOOTSTRAP_ROUNDS {
            if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(BOOTSTRAP_WAIT), &mut boot) {
                log::warn!("event loop exited with {code} before the window was created");
                break;
            }
            if boot.window.is_some() {
                break;
            }
        }
        let window = Rc::new(boot.window.ok_or(InitError::NotResumed)??);
        let surface = WindowSurface::new(window.clone())?;

        log::info!(
            "window \"{}\" created ({}x{}, {:?})",
            config.title,
            surface.size().width,
            surface.size().height,
            config.style
        );

        Ok(Self {
            surface,
            window,
            translator: EventTranslator::default(),
            event_loop,
        })
    }

    fn pump(&mut self, timeout: Option<Duration>, out: &mut VecDeque<PlatformEvent>) {
        let mut handler = Forward {
            window_id: self.window.id(),
            translator: &mut self.translator,
            out: &mut *out,
        };
        if let PumpStatus::Exit(code) = self.event_loop.pump_app_events(timeout, &mut handler) {
            log::debug!("event loop exited with {code}");
            out.push_back(PlatformEvent::CloseRequested);
        }
    }
}

/// Creates the window on the first `resumed`.
struct Bootstrap {
    attrs: Option<WindowAttributes>,
    window: Option<Result<Window, OsError>>,
}

impl ApplicationHandler for Bootstrap {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(attrs) = self.attrs.take() {
            self.window = Some(event_loop.create_window(attrs));
        }
    }

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        log::trace!("dropped pre-session event {event:?}");
    }
}

/// Translates events for the session window into the session queue.
struct Forward<'a> {
    window_id: WindowId,
    translator: &'a mut EventTranslator,
    out: &'a mut VecDeque<PlatformEvent>,
}

impl ApplicationHandler for Forward<'_> {
    fn resumed(&mut self, _: &ActiveEventLoop) {}

    fn window_event(&mut self, _: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if window_id == self.window_id {
            self.translator.translate(&event, self.out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offscreen_front_buffer_tracks_size() {
        let mut p = Platform::create(&WindowConfig::headless(4, 3)).unwrap();
        assert!(p.is_offscreen());
        assert_eq!(p.client_size(), (4, 3));
        assert_eq!(p.front_pixel(3, 2), Some(Rgba::BLACK));
        assert_eq!(p.front_pixel(4, 0), None);

        p.request_size(8, 8);
        assert_eq!(p.client_size(), (8, 8));
        assert!(!p.request_redraw());
    }
}
