//! Screen lifecycle shared by every front-end screen

use ratatui::Frame;

use crate::game::MatchMode;
use crate::input::KeyAction;
use crate::render::Renderer;

use super::menu::{MainMenu, ModeSelect};
use super::play::PlayScreen;

/// Edge in the screen state machine requested by the active screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    MainMenu,
    ModeSelect,
    StartMatch(MatchMode),
    Quit,
}

/// Lifecycle hooks every screen implements
pub trait Scene {
    fn name(&self) -> &'static str;

    fn on_enter(&mut self) {}

    fn handle_key(&mut self, action: KeyAction) -> Transition;

    /// Called once per frame with the seconds since the previous frame
    fn tick(&mut self, _elapsed: f32) -> Transition {
        Transition::Stay
    }

    fn render(&self, frame: &mut Frame, renderer: &Renderer);

    fn on_exit(&mut self) {}
}

/// The one active screen
pub enum Screen {
    MainMenu(MainMenu),
    ModeSelect(ModeSelect),
    Match(PlayScreen),
}

impl Screen {
    pub fn scene(&self) -> &dyn Scene {
        match self {
            Screen::MainMenu(menu) => menu,
            Screen::ModeSelect(select) => select,
            Screen::Match(play) => play,
        }
    }

    pub fn scene_mut(&mut self) -> &mut dyn Scene {
        match self {
            Screen::MainMenu(menu) => menu,
            Screen::ModeSelect(select) => select,
            Screen::Match(play) => play,
        }
    }
}
