use ratatui::Frame;
use tracing::info;

use crate::audio::{AudioCues, Cue};
use crate::game::{MatchConfig, MatchController, MatchEvent, Phase, Player, TickResult};
use crate::input::KeyAction;
use crate::metrics::MatchMetrics;
use crate::render::{MatchView, Renderer};

use super::scene::{Scene, Transition};

/// A match in progress: ready screen, running board and round-over screen
pub struct PlayScreen {
    controller: MatchController,
    metrics: MatchMetrics,
    sound: bool,
    audio: Option<AudioCues>,
}

impl PlayScreen {
    pub fn new(config: MatchConfig, sound: bool) -> Self {
        Self {
            controller: MatchController::new(config),
            metrics: MatchMetrics::new(),
            sound,
            audio: None,
        }
    }

    pub fn controller(&self) -> &MatchController {
        &self.controller
    }

    pub fn metrics(&self) -> &MatchMetrics {
        &self.metrics
    }

    /// Keys meant for a computer-controlled snake steer the human one instead,
    /// so a lone player may use either WASD or the arrows.
    fn route(&self, player: Player) -> Option<Player> {
        let mode = self.controller.config().mode;
        if mode.is_human(player) {
            Some(player)
        } else if mode.is_human(player.other()) {
            Some(player.other())
        } else {
            None
        }
    }

    fn apply_events(&mut self, result: &TickResult) {
        for event in &result.events {
            match event {
                MatchEvent::RoundStarted => self.metrics.on_round_start(),
                MatchEvent::FoodEaten(_) => self.play(Cue::Consumption),
                MatchEvent::RoundEnded(outcome) => {
                    self.metrics.on_round_over(outcome);
                    self.play(Cue::Death);
                }
                MatchEvent::Collision(..) => {}
            }
        }
    }

    fn play(&mut self, cue: Cue) {
        if let Some(audio) = self.audio.as_mut() {
            audio.play(cue);
        }
    }
}

impl Scene for PlayScreen {
    fn name(&self) -> &'static str {
        "Match"
    }

    fn on_enter(&mut self) {
        self.audio = Some(AudioCues::acquire(self.sound));
        self.metrics.on_round_start();
        info!(mode = ?self.controller.config().mode, "match screen entered");
    }

    fn handle_key(&mut self, action: KeyAction) -> Transition {
        match action {
            KeyAction::Back => return Transition::ModeSelect,
            KeyAction::Quit => return Transition::Quit,
            _ => {}
        }

        if let Phase::RoundOver(_) = self.controller.phase() {
            if action.is_press() {
                self.controller.acknowledge();
            }
            return Transition::Stay;
        }

        match action {
            KeyAction::Steer(player, direction) => {
                if let Some(player) = self.route(player) {
                    self.controller.propose_direction(player, direction);
                }
            }
            KeyAction::Restart => self.controller.reset_round(),
            _ => {}
        }
        Transition::Stay
    }

    fn tick(&mut self, elapsed: f32) -> Transition {
        self.metrics.update();
        let result = self.controller.tick(elapsed);
        self.apply_events(&result);
        Transition::Stay
    }

    fn render(&self, frame: &mut Frame, renderer: &Renderer) {
        renderer.render_match(
            frame,
            &MatchView {
                board: &self.controller.board_state(),
                mode: self.controller.config().mode,
                metrics: &self.metrics,
                countdown: self.controller.countdown_remaining(),
            },
        );
    }

    fn on_exit(&mut self) {
        self.audio = None;
        info!(rounds = self.metrics.rounds_played, "match screen left");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, MatchMode, Position};
    use std::time::Duration;

    fn screen(mode: MatchMode) -> PlayScreen {
        let mut screen = PlayScreen::new(MatchConfig::new(mode).with_seed(5), false);
        screen.on_enter();
        screen
    }

    #[test]
    fn test_arrows_steer_lone_human() {
        let mut play = screen(MatchMode::PlayerVsAi);
        let action = KeyAction::Steer(Player::Two, Direction::Up);
        assert_eq!(play.handle_key(action), Transition::Stay);
        assert_eq!(play.controller().phase(), Phase::Running);
        assert_eq!(play.controller().snake(Player::One).direction, Direction::Up);
    }

    #[test]
    fn test_round_start_resets_timer() {
        let mut play = screen(MatchMode::PlayerVsAi);
        play.metrics.round_start -= Duration::from_secs(90);
        play.handle_key(KeyAction::Steer(Player::One, Direction::Up));
        play.tick(0.05);
        assert_eq!(play.controller().phase(), Phase::Running);
        assert!(play.metrics().elapsed_time < Duration::from_secs(1));
    }

    #[test]
    fn test_ai_vs_ai_ignores_steering() {
        let mut play = screen(MatchMode::AiVsAi);
        play.handle_key(KeyAction::Steer(Player::One, Direction::Up));
        assert_eq!(play.controller().phase(), Phase::WaitingToStart);

        play.tick(2.5);
        assert_eq!(play.controller().phase(), Phase::Running);
    }

    #[test]
    fn test_escape_leaves_match() {
        let mut play = screen(MatchMode::PlayerVsPlayer);
        assert_eq!(play.handle_key(KeyAction::Back), Transition::ModeSelect);
        assert_eq!(play.handle_key(KeyAction::Quit), Transition::Quit);
    }

    #[test]
    fn test_round_over_needs_a_key() {
        let mut play = screen(MatchMode::PlayerVsPlayer);
        play.handle_key(KeyAction::Steer(Player::One, Direction::Up));
        play.handle_key(KeyAction::Steer(Player::Two, Direction::Down));
        assert_eq!(play.controller().phase(), Phase::Running);

        // Player one heads up from (6, 9) and leaves the board within ten steps.
        for _ in 0..12 {
            play.tick(0.25);
        }
        assert!(matches!(play.controller().phase(), Phase::RoundOver(_)));
        assert_eq!(play.metrics().rounds_played, 1);

        play.handle_key(KeyAction::Confirm);
        assert_eq!(play.controller().phase(), Phase::WaitingToStart);
        assert_eq!(play.controller().snake(Player::One).head(), Position::new(6, 9));
    }

    #[test]
    fn test_restart_returns_to_ready_screen() {
        let mut play = screen(MatchMode::PlayerVsAi);
        play.handle_key(KeyAction::Steer(Player::One, Direction::Down));
        play.tick(0.3);
        play.handle_key(KeyAction::Restart);
        assert_eq!(play.controller().phase(), Phase::WaitingToStart);
        assert_eq!(play.controller().board_state().scores, [0, 0]);
    }
}
