use crate::input::Key;

use super::{Event, EventCtx, EventKind, MouseEvent};

type Slot<T> = Option<Box<dyn FnMut(&mut EventCtx<'_>, T)>>;
type BareSlot = Option<Box<dyn FnMut(&mut EventCtx<'_>)>>;

/// One callback slot per event kind.
///
/// Registering replaces whatever the slot held; dispatching to an empty slot
/// does nothing.
#[derive(Default)]
pub struct Dispatcher {
    key_down: Slot<Key>,
    key_up: Slot<Key>,
    key_press: Slot<char>,
    mouse_down: Slot<MouseEvent>,
    mouse_up: Slot<MouseEvent>,
    mouse_move: Slot<MouseEvent>,
    timer: BareSlot,
    paint: BareSlot,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_key_down(&mut self, f: impl FnMut(&mut EventCtx<'_>, Key) + 'static) {
        self.key_down = Some(Box::new(f));
    }

    pub fn on_key_up(&mut self, f: impl FnMut(&mut EventCtx<'_>, Key) + 'static) {
        self.key_up = Some(Box::new(f));
    }

    pub fn on_key_press(&mut self, f: impl FnMut(&mut EventCtx<'_>, char) + 'static) {
        self.key_press = Some(Box::new(f));
    }

    pub fn on_mouse_down(&mut self, f: impl FnMut(&mut EventCtx<'_>, MouseEvent) + 'static) {
        self.mouse_down = Some(Box::new(f));
    }

    pub fn on_mouse_up(&mut self, f: impl FnMut(&mut EventCtx<'_>, MouseEvent) + 'static) {
        self.mouse_up = Some(Box::new(f));
    }

    pub fn on_mouse_move(&mut self, f: impl FnMut(&mut EventCtx<'_>, MouseEvent) + 'static) {
        self.mouse_move = Some(Box::new(f));
    }

    pub fn on_timer(&mut self, f: impl FnMut(&mut EventCtx<'_>) + 'static) {
        self.timer = Some(Box::new(f));
    }

    pub fn on_paint(&mut self, f: impl FnMut(&mut EventCtx<'_>) + 'static) {
        self.paint = Some(Box::new(f));
    }

    /// Empties the slot for `kind`.
    pub fn clear(&mut self, kind: EventKind) {
        match kind {
            EventKind::KeyDown => self.key_down = None,
            EventKind::KeyUp => self.key_up = None,
            EventKind::KeyPress => self.key_press = None,
            EventKind::MouseDown => self.mouse_down = None,
            EventKind::MouseUp => self.mouse_up = None,
            EventKind::MouseMove => self.mouse_move = None,
            EventKind::Timer => self.timer = None,
            EventKind::Paint => self.paint = None,
        }
    }

    pub fn is_set(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::KeyDown => self.key_down.is_some(),
            EventKind::KeyUp => self.key_up.is_some(),
            EventKind::KeyPress => self.key_press.is_some(),
            EventKind::MouseDown => self.mouse_down.is_some(),
            EventKind::MouseUp => self.mouse_up.is_some(),
            EventKind::MouseMove => self.mouse_move.is_some(),
            EventKind::Timer => self.timer.is_some(),
            EventKind::Paint => self.paint.is_some(),
        }
    }

    /// Runs the callback registered for `event`, if any. Returns whether one ran.
    pub fn dispatch(&mut self, event: Event, ctx: &mut EventCtx<'_>) -> bool {
        fn call<T>(slot: &mut Slot<T>, ctx: &mut EventCtx<'_>, payload: T) -> bool {
            slot.as_mut().map(|f| f(ctx, payload)).is_some()
        }

        match event {
            Event::KeyDown(key) => call(&mut self.key_down, ctx, key),
            Event::KeyUp(key) => call(&mut self.key_up, ctx, key),
            Event::KeyPress(ch) => call(&mut self.key_press, ctx, ch),
            Event::MouseDown(m) => call(&mut self.mouse_down, ctx, m),
            Event::MouseUp(m) => call(&mut self.mouse_up, ctx, m),
            Event::MouseMove(m) => call(&mut self.mouse_move, ctx, m),
            Event::Timer => self.timer.as_mut().map(|f| f(ctx)).is_some(),
            Event::Paint => self.paint.as_mut().map(|f| f(ctx)).is_some(),
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds = [
            EventKind::KeyDown,
            EventKind::KeyUp,
            EventKind::KeyPress,
            EventKind::MouseDown,
            EventKind::MouseUp,
            EventKind::MouseMove,
            EventKind::Timer,
            EventKind::Paint,
        ];
        f.debug_set()
            .entries(kinds.into_iter().filter(|k| self.is_set(*k)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::canvas::Canvas;
    use crate::events::{Command, RuntimeCtx};
    use crate::input::InputState;

    fn with_ctx<R>(f: impl FnOnce(&mut EventCtx<'_>) -> R) -> (R, RuntimeCtx) {
        let mut canvas = Canvas::uninitialized();
        let input = InputState::default();
        let mut runtime = RuntimeCtx::default();
        let mut ctx = EventCtx {
            canvas: &mut canvas,
            input: &input,
            time: None,
            runtime: &mut runtime,
        };
        let r = f(&mut ctx);
        (r, runtime)
    }

    #[test]
    fn last_registration_wins() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut d = Dispatcher::new();

        let l = log.clone();
        d.on_key_down(move |_, k| l.borrow_mut().push(format!("first {k}")));
        let l = log.clone();
        d.on_key_down(move |_, k| l.borrow_mut().push(format!("second {k}")));

        let (ran, _) = with_ctx(|ctx| d.dispatch(Event::KeyDown(Key::A), ctx));
        assert!(ran);
        assert_eq!(*log.borrow(), vec!["second A".to_string()]);
    }

    #[test]
    fn cleared_slot_is_a_no_op() {
        let hits = Rc::new(RefCell::new(0));
        let mut d = Dispatcher::new();
        let h = hits.clone();
        d.on_timer(move |_| *h.borrow_mut() += 1);
        d.clear(EventKind::Timer);

        assert!(!d.is_set(EventKind::Timer));
        let (ran, _) = with_ctx(|ctx| d.dispatch(Event::Timer, ctx));
        assert!(!ran);
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn commands_are_buffered_in_order() {
        let mut d = Dispatcher::new();
        d.on_mouse_down(|ctx, m| {
            ctx.set_title(format!("{}x{}", m.x, m.y));
            ctx.exit();
        });
        let event = Event::MouseDown(MouseEvent {
            x: 3.0,
            y: 4.0,
            button: None,
        });
        let (_, mut runtime) = with_ctx(|ctx| d.dispatch(event, ctx));
        let commands: Vec<_> = runtime.drain().collect();
        assert_eq!(commands, vec![Command::SetTitle("3x4".into()), Command::Exit]);
    }

    #[test]
    fn event_kinds_match_payloads() {
        assert_eq!(Event::KeyPress('x').kind(), EventKind::KeyPress);
        assert_eq!(Event::Paint.kind(), EventKind::Paint);
    }
}
