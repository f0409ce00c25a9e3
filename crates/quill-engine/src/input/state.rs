use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState};

/// Instantaneous input state as seen by the pump.
///
/// Backs `keystate` queries and supplies the pointer position for button events.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    pub pointer_pos: Option<(f32, f32)>,
    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Folds `ev` into the current state.
    ///
    /// Returns `false` for a key press that is an auto-repeat of a key already
    /// held, so callers can tell first presses apart.
    pub fn apply_event(&mut self, ev: &InputEvent) -> bool {
        match ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered while unfocused.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => self.pointer_pos = Some((*x, *y)),

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => return self.keys_down.insert(*key),
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::PointerButton { button, state, x, y } => {
                self.pointer_pos = Some((*x, *y));
                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(*button);
                    }
                    MouseButtonState::Released => {
                        self.buttons_down.remove(button);
                    }
                }
            }

            InputEvent::Char(_) => {}
        }
        true
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    /// First held button in a stable priority order, for move events.
    pub fn primary_button(&self) -> Option<MouseButton> {
        [MouseButton::Left, MouseButton::Right, MouseButton::Middle]
            .into_iter()
            .find(|b| self.buttons_down.contains(b))
            .or_else(|| self.buttons_down.iter().next().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, code: 0, repeat: false }
    }

    #[test]
    fn key_press_and_release_track_held_set() {
        let mut s = InputState::default();
        assert!(s.apply_event(&key(Key::Space, KeyState::Pressed)));
        assert!(s.key_down(Key::Space));
        assert!(!s.apply_event(&key(Key::Space, KeyState::Pressed)));
        s.apply_event(&key(Key::Space, KeyState::Released));
        assert!(!s.key_down(Key::Space));
    }

    #[test]
    fn focus_loss_clears_held_keys_and_buttons() {
        let mut s = InputState::default();
        s.apply_event(&key(Key::A, KeyState::Pressed));
        s.apply_event(&InputEvent::PointerButton {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            x: 1.0,
            y: 2.0,
        });
        s.apply_event(&InputEvent::Focused(false));
        assert!(!s.key_down(Key::A));
        assert!(!s.button_down(MouseButton::Left));
    }

    #[test]
    fn primary_button_prefers_left() {
        let mut s = InputState::default();
        for button in [MouseButton::Right, MouseButton::Left] {
            s.apply_event(&InputEvent::PointerButton {
                button,
                state: MouseButtonState::Pressed,
                x: 0.0,
                y: 0.0,
            });
        }
        assert_eq!(s.primary_button(), Some(MouseButton::Left));
    }
}
