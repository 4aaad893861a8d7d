//! Raw terminal events → one `InputSnapshot` per frame.
//!
//! Fire is Space, `F`, or the left mouse button.  Keyboard-enhancement
//! terminals (kitty protocol) send proper release events; classic terminals
//! only send presses and OS key-repeats, so a key counts as held while its
//! last press/repeat is within `hold_window` frames.

use std::collections::HashMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::entities::InputSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Source {
    Key(KeyCode),
    Mouse,
}

#[derive(Debug)]
pub struct InputTracker {
    hold_window: u64,
    /// Each live source → the frame it was last seen (press or repeat).
    last_seen: HashMap<Source, u64>,
    fire_pressed: bool,
    quit_pressed: bool,
}

fn is_fire_key(code: &KeyCode) -> bool {
    matches!(code, KeyCode::Char(' ') | KeyCode::Char('f') | KeyCode::Char('F'))
}

fn is_quit_key(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl InputTracker {
    pub fn new(hold_window: u64) -> Self {
        InputTracker {
            hold_window,
            last_seen: HashMap::new(),
            fire_pressed: false,
            quit_pressed: false,
        }
    }

    /// Feed one terminal event received during `frame`.
    pub fn handle_event(&mut self, event: &Event, frame: u64) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) => match kind {
                KeyEventKind::Press => {
                    if is_quit_key(code, *modifiers) {
                        self.quit_pressed = true;
                    } else if is_fire_key(code) {
                        // A press while already held is an OS key-repeat.
                        if !self.fire_held(frame) {
                            self.fire_pressed = true;
                        }
                        self.last_seen.insert(Source::Key(*code), frame);
                    }
                }
                KeyEventKind::Repeat => {
                    if is_fire_key(code) {
                        self.last_seen.insert(Source::Key(*code), frame);
                    }
                }
                KeyEventKind::Release => {
                    self.last_seen.remove(&Source::Key(*code));
                }
            },
            Event::Mouse(MouseEvent { kind, .. }) => match kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    if !self.fire_held(frame) {
                        self.fire_pressed = true;
                    }
                    self.last_seen.insert(Source::Mouse, frame);
                }
                MouseEventKind::Drag(MouseButton::Left) => {
                    self.last_seen.insert(Source::Mouse, frame);
                }
                MouseEventKind::Up(MouseButton::Left) => {
                    self.last_seen.remove(&Source::Mouse);
                }
                _ => {}
            },
            _ => {}
        }
    }

    /// A held mouse button never expires; keys expire after the hold window.
    fn fire_held(&self, frame: u64) -> bool {
        self.last_seen.iter().any(|(source, &last)| match source {
            Source::Mouse => true,
            Source::Key(_) => frame.saturating_sub(last) <= self.hold_window,
        })
    }

    /// State for `frame`; clears the one-shot "just pressed" flags.
    pub fn snapshot(&mut self, frame: u64) -> InputSnapshot {
        let window = self.hold_window;
        self.last_seen.retain(|source, last| match source {
            Source::Mouse => true,
            Source::Key(_) => frame.saturating_sub(*last) <= window,
        });
        let snapshot = InputSnapshot {
            fire_held: self.fire_held(frame),
            fire_pressed: self.fire_pressed,
            quit_pressed: self.quit_pressed,
        };
        self.fire_pressed = false;
        self.quit_pressed = false;
        snapshot
    }
}
