use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Horizontal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Horizontal),
    Jump,
    Pause,
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Left => KeyAction::Move(Horizontal::Left),
            KeyCode::Right => KeyAction::Move(Horizontal::Right),
            KeyCode::Up => KeyAction::Jump,

            // Movement - WASD + Space
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Move(Horizontal::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Move(Horizontal::Right),
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char(' ') => KeyAction::Jump,

            // Controls
            KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::Pause,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
