//! Event dispatch.
//!
//! The pump turns platform input into [`Event`]s and hands each one to the
//! [`Dispatcher`], which holds at most one callback per [`EventKind`].
//! Callbacks draw through [`EventCtx`] and ask for side effects (exit, timer,
//! title) through buffered commands that the session applies once the
//! callback has returned.

mod ctx;
mod dispatcher;

pub use ctx::{EventCtx, RuntimeCtx};
pub(crate) use ctx::Command;
pub use dispatcher::Dispatcher;

use crate::input::{Key, MouseButton};

/// Pointer payload for mouse events.
///
/// `button` is the button that changed for down/up, and the first held
/// button (if any) for moves.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseEvent {
    pub x: f32,
    pub y: f32,
    pub button: Option<MouseButton>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EventKind {
    KeyDown,
    KeyUp,
    KeyPress,
    MouseDown,
    MouseUp,
    MouseMove,
    Timer,
    Paint,
}

/// A dispatchable event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Event {
    KeyDown(Key),
    KeyUp(Key),
    /// A character produced by a key press.
    KeyPress(char),
    MouseDown(MouseEvent),
    MouseUp(MouseEvent),
    MouseMove(MouseEvent),
    Timer,
    Paint,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::KeyDown(_) => EventKind::KeyDown,
            Event::KeyUp(_) => EventKind::KeyUp,
            Event::KeyPress(_) => EventKind::KeyPress,
            Event::MouseDown(_) => EventKind::MouseDown,
            Event::MouseUp(_) => EventKind::MouseUp,
            Event::MouseMove(_) => EventKind::MouseMove,
            Event::Timer => EventKind::Timer,
            Event::Paint => EventKind::Paint,
        }
    }
}
