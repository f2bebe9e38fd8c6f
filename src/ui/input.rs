/// Keyboard input.
///
/// Drains every pending terminal event once per tick. Directions are
/// edge-triggered (a press queues a turn, the player keeps going on its
/// own), so only the last recognized direction of the tick matters.
///
///   Arrows / WASD      →  Turn
///   q / Esc / Ctrl+C   →  Quit
///
/// Anything else is ignored.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::entity::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyAction {
    Turn(Direction),
    Quit,
}

/// What the keyboard asked for during one drain.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct InputFrame {
    pub direction: Option<Direction>,
    pub quit: bool,
    pub any_key: bool,
}

impl InputFrame {
    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(dir) => self.direction = Some(dir),
            KeyAction::Quit => self.quit = true,
        }
    }
}

pub struct InputState {
    /// Raw key events collected during the last drain.
    pub raw_events: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { raw_events: Vec::with_capacity(8) }
    }

    /// Drain all pending terminal events without blocking.
    /// Call this once per frame, before the simulation tick.
    pub fn drain_events(&mut self) -> InputFrame {
        self.raw_events.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if key.kind != KeyEventKind::Release {
                    self.raw_events.push(key);
                }
            }
        }

        frame_from(&self.raw_events)
    }
}

/// Fold a tick's key presses into one frame; later directions win.
pub fn frame_from(keys: &[KeyEvent]) -> InputFrame {
    let mut frame = InputFrame { any_key: !keys.is_empty(), ..InputFrame::default() };
    for action in keys.iter().filter_map(map_key) {
        frame.apply(action);
    }
    frame
}

pub fn map_key(key: &KeyEvent) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(KeyAction::Quit),
            _ => None,
        };
    }
    let action = match key.code {
        KeyCode::Up => KeyAction::Turn(Direction::Up),
        KeyCode::Down => KeyAction::Turn(Direction::Down),
        KeyCode::Left => KeyAction::Turn(Direction::Left),
        KeyCode::Right => KeyAction::Turn(Direction::Right),
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => KeyAction::Turn(Direction::Up),
            's' => KeyAction::Turn(Direction::Down),
            'a' => KeyAction::Turn(Direction::Left),
            'd' => KeyAction::Turn(Direction::Right),
            'q' => KeyAction::Quit,
            _ => return None,
        },
        _ => return None,
    };
    Some(action)
}
