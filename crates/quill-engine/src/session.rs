use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use winit::event::WindowEvent;
use winit::window::Window;

use crate::canvas::Canvas;
use crate::error::{InitError, PresentError};
use crate::events::{Command, Dispatcher, Event, EventCtx, MouseEvent, RuntimeCtx};
use crate::input::{InputEvent, InputState, Key, KeyState, MouseButtonState};
use crate::paint::Rgba;
use crate::time::{FrameClock, FrameTime, IntervalTimer};
use crate::window::{Platform, PlatformEvent, WindowConfig, WindowStyle};

/// One window, its backbuffer and the callbacks that draw into it.
///
/// The session is driven cooperatively: call [`Session::do_events`] or
/// [`Session::wait_events`] in a loop (or [`Session::run`]) and draw from the
/// registered callbacks. Once a close or exit is observed the pump returns
/// `false` forever and no callback fires again.
pub struct Session {
    // Field order is teardown order: canvas (and its image cache) before the window.
    canvas: Canvas,
    dispatcher: Dispatcher,
    input: InputState,
    queue: VecDeque<PlatformEvent>,
    runtime: RuntimeCtx,
    timer: IntervalTimer,
    clock: FrameClock,
    terminated: bool,
    platform: Platform,
}

impl Session {
    /// Creates the window and a backbuffer matching its client area.
    pub fn init(config: WindowConfig) -> Result<Self, InitError> {
        if config.width == 0 || config.height == 0 {
            return Err(InitError::InvalidSize {
                width: config.width,
                height: config.height,
            });
        }

        let platform = Platform::create(&config)?;
        let (width, height) = match platform.client_size() {
            (0, _) | (_, 0) => (config.width, config.height),
            size => size,
        };
        let canvas = Canvas::new(width, height)?;
        log::debug!("session started at {width}x{height}");
        Ok(Self::assemble(platform, canvas))
    }

    pub fn init_with(title: impl Into<String>, width: u32, height: u32, style: WindowStyle) -> Result<Self, InitError> {
        Self::init(WindowConfig::new(title, width, height).style(style))
    }

    /// Windowless session presenting into an in-memory front buffer.
    pub fn headless(width: u32, height: u32) -> Result<Self, InitError> {
        Self::init(WindowConfig::headless(width, height))
    }

    /// Embeds into a window owned by a host event loop.
    ///
    /// The host forwards its events through [`Session::handle_window_event`];
    /// `do_events` then drains them.
    pub fn attach(window: Rc<Window>, width: u32, height: u32) -> Result<Self, InitError> {
        if width == 0 || height == 0 {
            return Err(InitError::InvalidSize { width, height });
        }
        let platform = Platform::hosted(window)?;
        let canvas = Canvas::new(width, height)?;
        Ok(Self::assemble(platform, canvas))
    }

    fn assemble(platform: Platform, canvas: Canvas) -> Self {
        // The first paint is always queued here: offscreen platforms never ask
        // for one, and a native window may ask before the session exists.
        Self {
            canvas,
            dispatcher: Dispatcher::new(),
            input: InputState::default(),
            queue: VecDeque::from([PlatformEvent::Redraw]),
            runtime: RuntimeCtx::default(),
            timer: IntervalTimer::default(),
            clock: FrameClock::new(),
            terminated: false,
            platform,
        }
    }

    /// Tears the session down: canvas and image cache first, then the window.
    pub fn quit(self) {
        let Session { canvas, platform, .. } = self;
        drop(canvas);
        drop(platform);
        log::debug!("session closed");
    }

    // ── pump ────────────────────────────────────────────────────────────────

    /// Processes whatever is pending without blocking. Returns `false` once
    /// the session has terminated.
    pub fn do_events(&mut self) -> bool {
        self.pump(Some(Duration::ZERO))
    }

    /// Blocks until a platform event arrives or the timer is due, then
    /// processes like [`Session::do_events`].
    pub fn wait_events(&mut self) -> bool {
        let timeout = if self.queue.is_empty() {
            self.timer
                .deadline()
                .map(|deadline| deadline.saturating_duration_since(Instant::now()))
        } else {
            Some(Duration::ZERO)
        };
        self.pump(timeout)
    }

    /// Pumps until the session terminates. Returns the process exit code.
    ///
    /// A headless session also returns once it is idle with no timer armed,
    /// since nothing could ever wake it again.
    pub fn run(&mut self) -> i32 {
        while self.wait_events() {
            if self.starved() {
                log::debug!("headless session idle with no timer; leaving run loop");
                break;
            }
        }
        0
    }

    fn starved(&self) -> bool {
        self.platform.is_offscreen() && self.queue.is_empty() && !self.timer.is_armed()
    }

    fn pump(&mut self, timeout: Option<Duration>) -> bool {
        if self.terminated {
            return false;
        }

        self.platform.pump(timeout, &mut self.queue);
        if self.timer.poll(Instant::now()) {
            self.queue.push_back(PlatformEvent::Timer);
        }

        while let Some(event) = self.queue.pop_front() {
            self.handle(event);
            if self.terminated {
                self.queue.clear();
                return false;
            }
        }
        true
    }

    fn handle(&mut self, event: PlatformEvent) {
        match event {
            PlatformEvent::Input(ev) => {
                self.input.apply_event(&ev);
                if let Some(event) = self.to_event(&ev) {
                    self.dispatch(event, None);
                }
            }
            PlatformEvent::Redraw => {
                let time = self.clock.tick();
                self.dispatch(Event::Paint, Some(time));
                if let Err(e) = self.present() {
                    log::warn!("present failed: {e}");
                }
            }
            PlatformEvent::Resized { width, height } => {
                log::trace!("client area resized to {width}x{height}");
                self.platform.resized(width, height);
            }
            PlatformEvent::Timer => self.dispatch(Event::Timer, None),
            PlatformEvent::CloseRequested => {
                log::debug!("close requested");
                self.terminated = true;
            }
        }
    }

    fn to_event(&self, ev: &InputEvent) -> Option<Event> {
        let event = match ev {
            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => Event::KeyDown(*key),
                KeyState::Released => Event::KeyUp(*key),
            },
            InputEvent::Char(ch) => Event::KeyPress(*ch),
            InputEvent::PointerButton { button, state, x, y } => {
                let m = MouseEvent {
                    x: *x,
                    y: *y,
                    button: Some(*button),
                };
                match state {
                    MouseButtonState::Pressed => Event::MouseDown(m),
                    MouseButtonState::Released => Event::MouseUp(m),
                }
            }
            InputEvent::PointerMoved { x, y } => Event::MouseMove(MouseEvent {
                x: *x,
                y: *y,
                button: self.input.primary_button(),
            }),
            InputEvent::ModifiersChanged(_) | InputEvent::PointerLeft | InputEvent::Focused(_) => return None,
        };
        Some(event)
    }

    fn dispatch(&mut self, event: Event, time: Option<FrameTime>) {
        let mut ctx = EventCtx {
            canvas: &mut self.canvas,
            input: &self.input,
            time,
            runtime: &mut self.runtime,
        };
        self.dispatcher.dispatch(event, &mut ctx);
        self.apply_commands();
    }

    fn apply_commands(&mut self) {
        let mut runtime = std::mem::take(&mut self.runtime);
        for command in runtime.drain() {
            match command {
                Command::Exit => self.terminated = true,
                Command::SetTimer(ms) => self.start_timer(ms),
                Command::SetTitle(title) => self.platform.set_title(&title),
                Command::Redraw => self.request_redraw(),
            }
        }
    }

    // ── control ─────────────────────────────────────────────────────────────

    /// Copies the backbuffer to the visible surface.
    pub fn present(&mut self) -> Result<(), PresentError> {
        self.platform.present(&self.canvas)
    }

    /// Arms the interval timer; `0` disarms it.
    pub fn start_timer(&mut self, interval_ms: u32) {
        self.timer.set_interval(interval_ms, Instant::now());
    }

    pub fn stop_timer(&mut self) {
        self.timer.disarm();
    }

    /// Requests a new client size and re-establishes the viewport over it.
    pub fn reshape(&mut self, width: u32, height: u32) -> Result<(), InitError> {
        self.platform.request_size(width, height);
        self.canvas.viewport(0, 0, width, height)
    }

    /// Reallocates the backbuffer. See [`Canvas::viewport`].
    pub fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32) -> Result<(), InitError> {
        self.canvas.viewport(x, y, width, height)
    }

    pub fn set_title(&mut self, title: &str) {
        self.platform.set_title(title);
    }

    pub fn fullscreen(&mut self, on: bool) {
        self.platform.set_fullscreen(on);
    }

    pub fn client_size(&self) -> (u32, u32) {
        self.platform.client_size()
    }

    pub fn is_headless(&self) -> bool {
        self.platform.is_offscreen()
    }

    /// Ends the session on the next pump, as a window close would.
    pub fn request_quit(&mut self) {
        self.queue.push_back(PlatformEvent::CloseRequested);
    }

    /// Schedules a paint event.
    pub fn request_redraw(&mut self) {
        if !self.platform.request_redraw() {
            self.queue.push_back(PlatformEvent::Redraw);
        }
    }

    /// Feeds an event from a host-owned loop. Only meaningful for attached sessions.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        self.platform.translate(event, &mut self.queue);
    }

    /// Injects an input event as if the platform had delivered it.
    pub fn post(&mut self, event: InputEvent) {
        self.queue.push_back(PlatformEvent::Input(event));
    }

    // ── accessors ───────────────────────────────────────────────────────────

    pub fn window(&self) -> Option<&Rc<Window>> {
        self.platform.window()
    }

    pub fn keystate(&self, key: Key) -> bool {
        self.input.key_down(key)
    }

    /// Samples the visible front buffer of a headless session.
    pub fn front_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.platform.front_pixel(x, y)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn events(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn is_running(&self) -> bool {
        !self.terminated
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("canvas", &self.canvas)
            .field("dispatcher", &self.dispatcher)
            .field("queued", &self.queue.len())
            .field("timer", &self.timer)
            .field("terminated", &self.terminated)
            .field("headless", &self.platform.is_offscreen())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::input::MouseButton;

    const RED: Rgba = Rgba::rgb(255, 0, 0);

    fn counter() -> (Rc<RefCell<u32>>, Rc<RefCell<u32>>) {
        let c = Rc::new(RefCell::new(0));
        (c.clone(), c)
    }

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            code: 0,
            repeat: false,
        }
    }

    // ── init ────────────────────────────────────────────────────────────────

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            Session::headless(0, 10),
            Err(InitError::InvalidSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn headless_session_has_backbuffer() {
        let s = Session::headless(64, 48).unwrap();
        assert!(s.is_headless());
        assert!(s.canvas().is_initialized());
        assert_eq!(s.client_size(), (64, 48));
        assert!(s.window().is_none());
    }

    // ── double buffer ───────────────────────────────────────────────────────

    #[test]
    fn draws_stay_offscreen_until_present() {
        let mut s = Session::headless(800, 600).unwrap();
        let canvas = s.canvas_mut();
        canvas.clear(Rgba::BLACK);
        canvas.fill_color(RED);
        canvas.fill_rect(10.0, 10.0, 50.0, 50.0);

        assert_eq!(s.front_pixel(30, 30), Some(Rgba::BLACK));

        s.present().unwrap();
        assert_eq!(s.front_pixel(30, 30), Some(RED));
        assert_eq!(s.front_pixel(700, 500), Some(Rgba::BLACK));
    }

    #[test]
    fn first_paint_is_queued_at_startup() {
        let s = Session::headless(8, 8).unwrap();
        assert_eq!(s.queue.iter().collect::<Vec<_>>(), vec![&PlatformEvent::Redraw]);
    }

    #[test]
    fn viewport_then_present_shows_backbuffer() {
        let mut s = Session::headless(800, 600).unwrap();
        s.viewport(100, 50, 400, 300).unwrap();
        assert_eq!((s.canvas().width(), s.canvas().height()), (400, 300));

        let canvas = s.canvas_mut();
        canvas.clear(Rgba::WHITE);
        canvas.fill_color(RED);
        canvas.fill_rect(10.0, 10.0, 50.0, 50.0);
        assert_eq!(s.front_pixel(130, 80), Some(Rgba::BLACK));

        s.present().unwrap();
        assert_eq!(s.front_pixel(130, 80), Some(RED));
        assert_eq!(s.front_pixel(300, 200), Some(Rgba::WHITE));
        // Outside the viewport the client area stays black.
        assert_eq!(s.front_pixel(50, 20), Some(Rgba::BLACK));
        assert_eq!(s.front_pixel(700, 500), Some(Rgba::BLACK));
    }

    #[test]
    fn paint_presents_automatically() {
        let mut s = Session::headless(32, 32).unwrap();
        s.events().on_paint(|ctx| {
            assert!(ctx.time.is_some());
            ctx.canvas.clear(RED);
        });

        // The initial paint is queued by init.
        assert!(s.do_events());
        assert_eq!(s.front_pixel(5, 5), Some(RED));
    }

    // ── termination ─────────────────────────────────────────────────────────

    #[test]
    fn quit_stops_dispatch_for_good() {
        let mut s = Session::headless(16, 16).unwrap();
        let (hits, h) = counter();
        s.events().on_key_down(move |_, _| *h.borrow_mut() += 1);

        s.post(key(Key::A, KeyState::Pressed));
        s.request_quit();
        s.post(key(Key::B, KeyState::Pressed));

        assert!(!s.do_events());
        assert!(!s.do_events());
        assert!(!s.is_running());
        assert_eq!(*hits.borrow(), 1);

        s.post(key(Key::C, KeyState::Pressed));
        assert!(!s.wait_events());
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn exit_from_callback_ends_session() {
        let mut s = Session::headless(16, 16).unwrap();
        s.events().on_key_press(|ctx, ch| {
            if ch == 'q' {
                ctx.exit();
            }
        });
        s.post(InputEvent::Char('x'));
        assert!(s.do_events());
        s.post(InputEvent::Char('q'));
        assert!(!s.do_events());
        assert_eq!(s.run(), 0);
    }

    // ── input ───────────────────────────────────────────────────────────────

    #[test]
    fn key_events_reach_callbacks_and_keystate() {
        let mut s = Session::headless(16, 16).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let down = seen.clone();
        s.events().on_key_down(move |ctx, k| down.borrow_mut().push((k, ctx.keystate(k))));
        let up = seen.clone();
        s.events().on_key_up(move |ctx, k| up.borrow_mut().push((k, ctx.keystate(k))));

        s.post(key(Key::Space, KeyState::Pressed));
        assert!(s.do_events());
        assert!(s.keystate(Key::Space));

        s.post(key(Key::Space, KeyState::Released));
        assert!(s.do_events());
        assert!(!s.keystate(Key::Space));

        assert_eq!(*seen.borrow(), vec![(Key::Space, true), (Key::Space, false)]);
    }

    #[test]
    fn mouse_moves_report_held_button() {
        let mut s = Session::headless(16, 16).unwrap();
        let moves = Rc::new(RefCell::new(Vec::new()));
        let m = moves.clone();
        s.events().on_mouse_move(move |_, ev| m.borrow_mut().push(ev));

        s.post(InputEvent::PointerButton {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            x: 1.0,
            y: 2.0,
        });
        s.post(InputEvent::PointerMoved { x: 3.0, y: 4.0 });
        assert!(s.do_events());

        assert_eq!(
            *moves.borrow(),
            vec![MouseEvent {
                x: 3.0,
                y: 4.0,
                button: Some(MouseButton::Left)
            }]
        );
    }

    #[test]
    fn idle_headless_run_returns() {
        let mut s = Session::headless(8, 8).unwrap();
        let (paints, p) = counter();
        s.events().on_paint(move |_| *p.borrow_mut() += 1);

        assert_eq!(s.run(), 0);
        assert_eq!(*paints.borrow(), 1);
        assert!(s.is_running());
    }

    // ── timer ───────────────────────────────────────────────────────────────

    #[test]
    fn timer_fires_from_wait_events() {
        let mut s = Session::headless(16, 16).unwrap();
        let (ticks, t) = counter();
        s.events().on_timer(move |ctx| {
            *t.borrow_mut() += 1;
            ctx.set_timer(0);
        });
        s.start_timer(5);

        // First pump drains the initial paint; the next waits out the deadline.
        assert!(s.do_events());
        assert!(s.wait_events());
        assert_eq!(*ticks.borrow(), 1);

        // Disarmed from inside the callback.
        std::thread::sleep(Duration::from_millis(10));
        assert!(s.do_events());
        assert_eq!(*ticks.borrow(), 1);
    }

    #[test]
    fn reshape_reallocates_backbuffer() {
        let mut s = Session::headless(16, 16).unwrap();
        s.reshape(40, 30).unwrap();
        assert_eq!(s.client_size(), (40, 30));
        assert_eq!((s.canvas().width(), s.canvas().height()), (40, 30));
    }
}
