use crate::canvas::Canvas;
use crate::input::{InputState, Key};
use crate::time::FrameTime;

/// Side effects requested from inside a callback.
///
/// Commands are buffered and applied after the current callback returns, so a
/// callback never re-enters the pump.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    /// Ends the session; the pump returns `false` from now on.
    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    /// Re-arms the interval timer; `0` stops it.
    pub fn set_timer(&mut self, interval_ms: u32) {
        self.commands.push(Command::SetTimer(interval_ms));
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.commands.push(Command::SetTitle(title.into()));
    }

    /// Queues a paint event.
    pub fn request_redraw(&mut self) {
        self.commands.push(Command::Redraw);
    }

    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, Command> {
        self.commands.drain(..)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum Command {
    Exit,
    SetTimer(u32),
    SetTitle(String),
    Redraw,
}

/// What a callback gets to work with.
pub struct EventCtx<'a> {
    pub canvas: &'a mut Canvas,
    pub input: &'a InputState,
    /// Frame timing; set for paint events only.
    pub time: Option<FrameTime>,
    pub runtime: &'a mut RuntimeCtx,
}

impl EventCtx<'_> {
    pub fn keystate(&self, key: Key) -> bool {
        self.input.key_down(key)
    }

    pub fn exit(&mut self) {
        self.runtime.exit();
    }

    pub fn set_timer(&mut self, interval_ms: u32) {
        self.runtime.set_timer(interval_ms);
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.runtime.set_title(title);
    }

    pub fn request_redraw(&mut self) {
        self.runtime.request_redraw();
    }
}
