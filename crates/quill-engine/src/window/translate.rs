//! winit → engine event translation.

use std::collections::VecDeque;

use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use crate::input::{InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState};

/// What the pump hands the session, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlatformEvent {
    Input(InputEvent),
    Redraw,
    Resized { width: u32, height: u32 },
    Timer,
    CloseRequested,
}

/// Stateful translator for one window.
///
/// winit reports button presses without a position, so the last cursor
/// position is tracked here. Positions are physical pixels, the same space as
/// the backbuffer.
#[derive(Debug, Default)]
pub(crate) struct EventTranslator {
    cursor: (f32, f32),
}

impl EventTranslator {
    /// Appends the engine events for `event` to `out`; unrepresented events add nothing.
    pub(crate) fn translate(&mut self, event: &WindowEvent, out: &mut VecDeque<PlatformEvent>) {
        let input = PlatformEvent::Input;

        match event {
            WindowEvent::ModifiersChanged(m) => {
                out.push_back(input(InputEvent::ModifiersChanged(map_modifiers(m.state()))));
            }

            WindowEvent::Focused(f) => out.push_back(input(InputEvent::Focused(*f))),

            WindowEvent::CursorLeft { .. } => out.push_back(input(InputEvent::PointerLeft)),

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                let (x, y) = self.cursor;
                out.push_back(input(InputEvent::PointerMoved { x, y }));
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let (x, y) = self.cursor;
                out.push_back(input(InputEvent::PointerButton {
                    button: map_mouse_button(*button),
                    state: match state {
                        ElementState::Pressed => MouseButtonState::Pressed,
                        ElementState::Released => MouseButtonState::Released,
                    },
                    x,
                    y,
                }));
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let (key, code) = map_key(event.physical_key);
                let state = match event.state {
                    ElementState::Pressed => KeyState::Pressed,
                    ElementState::Released => KeyState::Released,
                };
                out.push_back(input(InputEvent::Key {
                    key,
                    state,
                    code,
                    repeat: event.repeat,
                }));

                if state == KeyState::Pressed {
                    for ch in event.text.iter().flat_map(|t| t.chars()) {
                        out.push_back(input(InputEvent::Char(ch)));
                    }
                }
            }

            WindowEvent::Resized(size) => out.push_back(PlatformEvent::Resized {
                width: size.width,
                height: size.height,
            }),

            WindowEvent::RedrawRequested => out.push_back(PlatformEvent::Redraw),

            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                out.push_back(PlatformEvent::CloseRequested);
            }

            _ => {}
        }
    }
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

/// Maps a physical key to `(Key, platform code)`.
fn map_key(pk: PhysicalKey) -> (Key, u32) {
    let PhysicalKey::Code(code) = pk else {
        return (Key::Unknown(0), 0);
    };
    let raw = code as u32;
    let key = letter(code)
        .or_else(|| digit(code))
        .or_else(|| function(code))
        .unwrap_or(match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Space => Key::Space,

            KeyCode::Insert => Key::Insert,
            KeyCode::Delete => Key::Delete,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,

            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,

            KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
            KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
            KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
            KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

            _ => Key::Unknown(raw),
        });
    (key, raw)
}

fn letter(code: KeyCode) -> Option<Key> {
    const LETTERS: [(KeyCode, Key); 26] = [
        (KeyCode::KeyA, Key::A),
        (KeyCode::KeyB, Key::B),
        (KeyCode::KeyC, Key::C),
        (KeyCode::KeyD, Key::D),
        (KeyCode::KeyE, Key::E),
        (KeyCode::KeyF, Key::F),
        (KeyCode::KeyG, Key::G),
        (KeyCode::KeyH, Key::H),
        (KeyCode::KeyI, Key::I),
        (KeyCode::KeyJ, Key::J),
        (KeyCode::KeyK, Key::K),
        (KeyCode::KeyL, Key::L),
        (KeyCode::KeyM, Key::M),
        (KeyCode::KeyN, Key::N),
        (KeyCode::KeyO, Key::O),
        (KeyCode::KeyP, Key::P),
        (KeyCode::KeyQ, Key::Q),
        (KeyCode::KeyR, Key::R),
        (KeyCode::KeyS, Key::S),
        (KeyCode::KeyT, Key::T),
        (KeyCode::KeyU, Key::U),
        (KeyCode::KeyV, Key::V),
        (KeyCode::KeyW, Key::W),
        (KeyCode::KeyX, Key::X),
        (KeyCode::KeyY, Key::Y),
        (KeyCode::KeyZ, Key::Z),
    ];
    LETTERS.iter().find(|(c, _)| *c == code).map(|(_, k)| *k)
}

fn digit(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Digit0 | KeyCode::Numpad0 => Key::Digit0,
        KeyCode::Digit1 | KeyCode::Numpad1 => Key::Digit1,
        KeyCode::Digit2 | KeyCode::Numpad2 => Key::Digit2,
        KeyCode::Digit3 | KeyCode::Numpad3 => Key::Digit3,
        KeyCode::Digit4 | KeyCode::Numpad4 => Key::Digit4,
        KeyCode::Digit5 | KeyCode::Numpad5 => Key::Digit5,
        KeyCode::Digit6 | KeyCode::Numpad6 => Key::Digit6,
        KeyCode::Digit7 | KeyCode::Numpad7 => Key::Digit7,
        KeyCode::Digit8 | KeyCode::Numpad8 => Key::Digit8,
        KeyCode::Digit9 | KeyCode::Numpad9 => Key::Digit9,
        _ => return None,
    };
    Some(key)
}

fn function(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_digits_and_numpad_map() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyQ)).0, Key::Q);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Numpad7)).0, Key::Digit7);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::F11)).0, Key::F11);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ShiftRight)).0, Key::Shift);
    }

    #[test]
    fn unmapped_codes_keep_platform_value() {
        let (key, code) = map_key(PhysicalKey::Code(KeyCode::CapsLock));
        assert_eq!(key, Key::Unknown(code));
    }

    #[test]
    fn lifecycle_events_pass_through() {
        let mut t = EventTranslator::default();
        let mut out = VecDeque::new();
        t.cursor = (12.0, 34.0);
        t.translate(&WindowEvent::RedrawRequested, &mut out);
        t.translate(&WindowEvent::CloseRequested, &mut out);
        assert_eq!(out.pop_front(), Some(PlatformEvent::Redraw));
        assert_eq!(out.pop_front(), Some(PlatformEvent::CloseRequested));
        assert_eq!(t.cursor, (12.0, 34.0));
    }
}
