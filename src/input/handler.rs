use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// WASD steers player one, arrow keys steer player two
    Steer(Player, Direction),
    Confirm,
    Back,
    Restart,
    Quit,
    None,
}

impl KeyAction {
    /// Any key that counts as a press for "press any key" prompts
    pub fn is_press(&self) -> bool {
        !matches!(self, KeyAction::None | KeyAction::Quit | KeyAction::Back)
    }
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
            // Player one - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Player::One, Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::Steer(Player::One, Direction::Down)
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Steer(Player::One, Direction::Left)
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Steer(Player::One, Direction::Right)
            }

            // Player two - Arrow keys
            KeyCode::Up => KeyAction::Steer(Player::Two, Direction::Up),
            KeyCode::Down => KeyAction::Steer(Player::Two, Direction::Down),
            KeyCode::Left => KeyAction::Steer(Player::Two, Direction::Left),
            KeyCode::Right => KeyAction::Steer(Player::Two, Direction::Right),

            // Controls
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Confirm,
            KeyCode::Esc => KeyAction::Back,
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
