use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use alien_invasion::compute::{Input, Key};
use alien_invasion::input::*;

fn key(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

// ── map_key ───────────────────────────────────────────────────────────────────

#[test]
fn arrows_and_letters_steer() {
    let none = KeyModifiers::NONE;
    assert_eq!(map_key(KeyCode::Left, none), Some(Key::Left));
    assert_eq!(map_key(KeyCode::Char('a'), none), Some(Key::Left));
    assert_eq!(map_key(KeyCode::Char('A'), none), Some(Key::Left));
    assert_eq!(map_key(KeyCode::Right, none), Some(Key::Right));
    assert_eq!(map_key(KeyCode::Char('d'), none), Some(Key::Right));
    assert_eq!(map_key(KeyCode::Char(' '), none), Some(Key::Fire));
}

#[test]
fn quit_and_play_keys() {
    let none = KeyModifiers::NONE;
    assert_eq!(map_key(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Key::Quit));
    assert_eq!(map_key(KeyCode::Char('q'), none), Some(Key::Quit));
    assert_eq!(map_key(KeyCode::Esc, none), Some(Key::Quit));
    assert_eq!(map_key(KeyCode::Char('p'), none), Some(Key::Play));
    assert_eq!(map_key(KeyCode::Char('P'), none), Some(Key::Play));
}

#[test]
fn plain_c_and_unbound_keys_ignored() {
    let none = KeyModifiers::NONE;
    assert_eq!(map_key(KeyCode::Char('c'), none), None);
    assert_eq!(map_key(KeyCode::Char('x'), none), None);
    assert_eq!(map_key(KeyCode::Enter, none), None);
}

// ── HeldKeys ──────────────────────────────────────────────────────────────────

#[test]
fn held_key_expires_after_hold_window() {
    let mut held = HeldKeys::new();
    held.touch(Key::Left, 10);

    assert!(held.expire(10 + HOLD_WINDOW).is_empty());
    assert!(held.is_held(Key::Left));

    assert_eq!(held.expire(10 + HOLD_WINDOW + 1), vec![Key::Left]);
    assert!(!held.is_held(Key::Left));
    // Reported once only
    assert!(held.expire(100).is_empty());
}

#[test]
fn touching_again_refreshes_the_window() {
    let mut held = HeldKeys::new();
    held.touch(Key::Right, 1);
    held.touch(Key::Right, 4);
    assert!(held.expire(4 + HOLD_WINDOW).is_empty());
    assert_eq!(held.expire(5 + HOLD_WINDOW), vec![Key::Right]);
}

#[test]
fn expire_only_drops_stale_keys() {
    let mut held = HeldKeys::new();
    held.touch(Key::Left, 0);
    held.touch(Key::Right, 8);
    assert_eq!(held.expire(10), vec![Key::Left]);
    assert!(held.is_held(Key::Right));
}

#[test]
fn release_forgets_key() {
    let mut held = HeldKeys::new();
    held.touch(Key::Left, 0);
    held.release(Key::Left);
    assert!(held.expire(1_000).is_empty());
}

// ── translate_event ───────────────────────────────────────────────────────────

#[test]
fn direction_press_is_tracked() {
    let mut held = HeldKeys::new();
    let input = translate_event(key(KeyCode::Left, KeyEventKind::Press), 3, &mut held);
    assert_eq!(input, Some(Input::KeyDown(Key::Left)));
    assert!(held.is_held(Key::Left));
}

#[test]
fn fire_press_is_not_tracked() {
    let mut held = HeldKeys::new();
    let input = translate_event(key(KeyCode::Char(' '), KeyEventKind::Press), 3, &mut held);
    assert_eq!(input, Some(Input::KeyDown(Key::Fire)));
    assert!(!held.is_held(Key::Fire));
}

#[test]
fn repeat_keeps_direction_alive() {
    let mut held = HeldKeys::new();
    translate_event(key(KeyCode::Right, KeyEventKind::Press), 1, &mut held);
    let input = translate_event(key(KeyCode::Right, KeyEventKind::Repeat), 4, &mut held);
    assert_eq!(input, Some(Input::KeyDown(Key::Right)));

    assert!(held.expire(1 + HOLD_WINDOW + 1).is_empty());
    assert_eq!(held.expire(4 + HOLD_WINDOW + 1), vec![Key::Right]);
}

#[test]
fn repeat_of_fire_is_ignored() {
    let mut held = HeldKeys::new();
    let input = translate_event(key(KeyCode::Char(' '), KeyEventKind::Repeat), 1, &mut held);
    assert_eq!(input, None);
}

#[test]
fn release_becomes_key_up() {
    let mut held = HeldKeys::new();
    translate_event(key(KeyCode::Left, KeyEventKind::Press), 1, &mut held);
    let input = translate_event(key(KeyCode::Left, KeyEventKind::Release), 2, &mut held);
    assert_eq!(input, Some(Input::KeyUp(Key::Left)));
    assert!(!held.is_held(Key::Left));
}

#[test]
fn left_click_becomes_click() {
    let mut held = HeldKeys::new();
    let input = translate_event(mouse(MouseEventKind::Down(MouseButton::Left), 36, 12), 1, &mut held);
    assert_eq!(input, Some(Input::Click { x: 36, y: 12 }));
}

#[test]
fn other_events_ignored() {
    let mut held = HeldKeys::new();
    let right = mouse(MouseEventKind::Down(MouseButton::Right), 36, 12);
    assert_eq!(translate_event(right, 1, &mut held), None);
    assert_eq!(translate_event(mouse(MouseEventKind::Moved, 1, 1), 1, &mut held), None);
    assert_eq!(translate_event(Event::Resize(80, 24), 1, &mut held), None);
    assert_eq!(translate_event(key(KeyCode::Char('x'), KeyEventKind::Press), 1, &mut held), None);
}
