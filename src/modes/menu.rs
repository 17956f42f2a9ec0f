use ratatui::Frame;

use crate::game::{Direction, MatchMode};
use crate::input::KeyAction;
use crate::render::{MenuView, Renderer};

use super::scene::{Scene, Transition};

/// Highlighted entry in a vertical list, clamped at both ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cursor {
    selected: usize,
    len: usize,
}

impl Cursor {
    fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    /// Returns true if the key moved the cursor
    fn navigate(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Steer(_, Direction::Up) => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            KeyAction::Steer(_, Direction::Down) => {
                self.selected = (self.selected + 1).min(self.len.saturating_sub(1));
                true
            }
            _ => false,
        }
    }
}

const MAIN_OPTIONS: [&str; 2] = ["PLAY", "QUIT GAME"];

pub struct MainMenu {
    cursor: Cursor,
}

impl MainMenu {
    pub fn new() -> Self {
        Self {
            cursor: Cursor::new(MAIN_OPTIONS.len()),
        }
    }

    pub fn selected(&self) -> usize {
        self.cursor.selected
    }
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for MainMenu {
    fn name(&self) -> &'static str {
        "MainMenu"
    }

    fn on_enter(&mut self) {
        self.cursor = Cursor::new(MAIN_OPTIONS.len());
    }

    fn handle_key(&mut self, action: KeyAction) -> Transition {
        if self.cursor.navigate(action) {
            return Transition::Stay;
        }
        match action {
            KeyAction::Confirm => match self.cursor.selected {
                0 => Transition::ModeSelect,
                _ => Transition::Quit,
            },
            KeyAction::Back | KeyAction::Quit => Transition::Quit,
            _ => Transition::Stay,
        }
    }

    fn render(&self, frame: &mut Frame, renderer: &Renderer) {
        renderer.render_menu(
            frame,
            &MenuView {
                title: "COMPETITIVE SNAKE",
                options: &MAIN_OPTIONS,
                selected: self.cursor.selected,
                hint: "Use W/S or UP/DOWN to select, ENTER to confirm",
            },
        );
    }
}

const MODES: [MatchMode; 3] = [
    MatchMode::PlayerVsPlayer,
    MatchMode::PlayerVsAi,
    MatchMode::AiVsAi,
];

pub struct ModeSelect {
    cursor: Cursor,
}

impl ModeSelect {
    pub fn new() -> Self {
        Self {
            cursor: Cursor::new(MODES.len()),
        }
    }

    pub fn selected_mode(&self) -> MatchMode {
        MODES[self.cursor.selected]
    }
}

impl Default for ModeSelect {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for ModeSelect {
    fn name(&self) -> &'static str {
        "ModeSelect"
    }

    fn on_enter(&mut self) {
        self.cursor = Cursor::new(MODES.len());
    }

    fn handle_key(&mut self, action: KeyAction) -> Transition {
        if self.cursor.navigate(action) {
            return Transition::Stay;
        }
        match action {
            KeyAction::Confirm => Transition::StartMatch(self.selected_mode()),
            KeyAction::Back => Transition::MainMenu,
            KeyAction::Quit => Transition::Quit,
            _ => Transition::Stay,
        }
    }

    fn render(&self, frame: &mut Frame, renderer: &Renderer) {
        let titles = MODES.map(MatchMode::title);
        renderer.render_menu(
            frame,
            &MenuView {
                title: "SELECT GAME MODE",
                options: &titles,
                selected: self.cursor.selected,
                hint: "ENTER to start, ESC to go back",
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    const UP: KeyAction = KeyAction::Steer(Player::One, Direction::Up);
    const DOWN: KeyAction = KeyAction::Steer(Player::Two, Direction::Down);

    #[test]
    fn test_main_menu_navigation() {
        let mut menu = MainMenu::new();
        assert_eq!(menu.handle_key(KeyAction::Confirm), Transition::ModeSelect);

        assert_eq!(menu.handle_key(DOWN), Transition::Stay);
        assert_eq!(menu.handle_key(DOWN), Transition::Stay);
        assert_eq!(menu.selected(), 1);
        assert_eq!(menu.handle_key(KeyAction::Confirm), Transition::Quit);

        assert_eq!(menu.handle_key(UP), Transition::Stay);
        assert_eq!(menu.handle_key(UP), Transition::Stay);
        assert_eq!(menu.selected(), 0);
    }

    #[test]
    fn test_main_menu_escape_quits() {
        let mut menu = MainMenu::new();
        assert_eq!(menu.handle_key(KeyAction::Back), Transition::Quit);
        assert_eq!(menu.handle_key(KeyAction::Restart), Transition::Stay);
    }

    #[test]
    fn test_mode_select() {
        let mut select = ModeSelect::new();
        assert_eq!(select.selected_mode(), MatchMode::PlayerVsPlayer);

        select.handle_key(DOWN);
        assert_eq!(
            select.handle_key(KeyAction::Confirm),
            Transition::StartMatch(MatchMode::PlayerVsAi)
        );

        select.handle_key(DOWN);
        select.handle_key(DOWN);
        assert_eq!(select.selected_mode(), MatchMode::AiVsAi);

        select.on_enter();
        assert_eq!(select.selected_mode(), MatchMode::PlayerVsPlayer);
        assert_eq!(select.handle_key(KeyAction::Back), Transition::MainMenu);
    }
}
