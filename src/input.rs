//! Terminal events to game `Input`.
//!
//! Terminals without the keyboard enhancement protocol never report key
//! releases.  `HeldKeys` remembers the frame a direction key was last seen
//! so the loop can release it once presses and repeats stop arriving.

use std::collections::HashMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::compute::{Input, Key};

/// A direction key counts as released once this many frames pass without a
/// press or repeat event.  OS key-repeat runs at ≥ 15 Hz, so 4 frames
/// (≈133 ms) is refreshed while the key is really down.
pub const HOLD_WINDOW: u64 = 4;

pub fn is_direction(key: Key) -> bool {
    matches!(key, Key::Left | Key::Right)
}

pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Key::Quit),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::Play),
        _ => None,
    }
}

/// Direction key → the frame it was last seen (press or repeat).
#[derive(Clone, Debug, Default)]
pub struct HeldKeys {
    last_seen: HashMap<Key, u64>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch(&mut self, key: Key, frame: u64) {
        self.last_seen.insert(key, frame);
    }

    pub fn release(&mut self, key: Key) {
        self.last_seen.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.last_seen.contains_key(&key)
    }

    /// Forget and return every key not seen for more than `HOLD_WINDOW`
    /// frames.
    pub fn expire(&mut self, frame: u64) -> Vec<Key> {
        let expired: Vec<Key> = self
            .last_seen
            .iter()
            .filter(|(_, &last)| frame.saturating_sub(last) > HOLD_WINDOW)
            .map(|(&key, _)| key)
            .collect();
        for key in &expired {
            self.last_seen.remove(key);
        }
        expired
    }
}

/// Translate one terminal event seen during `frame`.  Returns `None` for
/// events the game ignores.
pub fn translate_event(event: Event, frame: u64, held: &mut HeldKeys) -> Option<Input> {
    match event {
        Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) => {
            let key = map_key(code, modifiers)?;
            match kind {
                KeyEventKind::Press => {
                    if is_direction(key) {
                        held.touch(key, frame);
                    }
                    Some(Input::KeyDown(key))
                }
                // Repeat only keeps a held direction alive
                KeyEventKind::Repeat if is_direction(key) => {
                    held.touch(key, frame);
                    Some(Input::KeyDown(key))
                }
                KeyEventKind::Repeat => None,
                KeyEventKind::Release => {
                    held.release(key);
                    Some(Input::KeyUp(key))
                }
            }
        }
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(Input::Click {
            x: column as i32,
            y: row as i32,
        }),
        _ => None,
    }
}
