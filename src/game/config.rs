use serde::{Deserialize, Serialize};

use super::action::{Direction, Player};
use super::grid::{GridBounds, Position};
use super::snake::Spawn;

/// Cells along each side of the square board
pub const GRID_CELLS: i32 = 25;

/// Seconds between simulation steps
pub const TICK_INTERVAL: f32 = 0.2;

/// Seconds the AI-vs-AI ready screen waits before starting
pub const AI_START_DELAY: f32 = 2.0;

pub const BOUNDS: GridBounds = GridBounds::square(GRID_CELLS);

/// Who steers a snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    Human,
    Ai,
}

/// Which pairing of humans and AIs plays the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    PlayerVsPlayer,
    PlayerVsAi,
    AiVsAi,
}

impl MatchMode {
    pub fn controller(self, player: Player) -> Controller {
        match (self, player) {
            (MatchMode::PlayerVsPlayer, _) => Controller::Human,
            (MatchMode::PlayerVsAi, Player::One) => Controller::Human,
            (MatchMode::PlayerVsAi, Player::Two) => Controller::Ai,
            (MatchMode::AiVsAi, _) => Controller::Ai,
        }
    }

    pub fn is_human(self, player: Player) -> bool {
        self.controller(player) == Controller::Human
    }

    pub fn title(self) -> &'static str {
        match self {
            MatchMode::PlayerVsPlayer => "PLAYER vs PLAYER",
            MatchMode::PlayerVsAi => "PLAYER vs AI",
            MatchMode::AiVsAi => "AI vs AI",
        }
    }

    /// Score label shown next to each snake
    pub fn label(self, player: Player) -> &'static str {
        match (self, player) {
            (MatchMode::PlayerVsPlayer, Player::One) => "P1",
            (MatchMode::PlayerVsPlayer, Player::Two) => "P2",
            (MatchMode::PlayerVsAi, Player::One) => "PLAYER",
            (MatchMode::PlayerVsAi, Player::Two) => "AI",
            (MatchMode::AiVsAi, Player::One) => "AI 1",
            (MatchMode::AiVsAi, Player::Two) => "AI 2",
        }
    }
}

/// Spawn points for both snakes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnConfig {
    pub spawns: [Spawn; 2],
}

impl SpawnConfig {
    pub fn new(one: Spawn, two: Spawn) -> Self {
        Self { spawns: [one, two] }
    }

    pub fn spawn(&self, player: Player) -> Spawn {
        self.spawns[player.index()]
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self::new(
            Spawn::new(Position::new(6, 9), Direction::Right),
            Spawn::new(Position::new(18, 15), Direction::Left),
        )
    }
}

/// Configuration for a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    pub mode: MatchMode,
    /// Declare a winner when a round ends. Off means any collision just restarts.
    pub winner_tracking: bool,
    pub spawns: SpawnConfig,
    /// Seconds between simulation steps
    pub tick_interval: f32,
    /// Seconds before an AI-vs-AI round starts on its own
    pub start_delay: f32,
    /// Seed for food placement; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mode: MatchMode::PlayerVsPlayer,
            winner_tracking: true,
            spawns: SpawnConfig::default(),
            tick_interval: TICK_INTERVAL,
            start_delay: AI_START_DELAY,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Create a new configuration for the given mode
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if !(self.tick_interval > 0.0) {
            return Err(format!(
                "tick_interval must be positive, got {}",
                self.tick_interval
            ));
        }

        if !(self.start_delay >= 0.0) {
            return Err(format!(
                "start_delay must be non-negative, got {}",
                self.start_delay
            ));
        }

        for player in Player::BOTH {
            let spawn = self.spawns.spawn(player);
            let (dx, dy) = spawn.direction.delta();
            let tail = spawn.position.moved_by(-2 * dx, -2 * dy);
            if !BOUNDS.contains(spawn.position) || !BOUNDS.contains(tail) {
                return Err(format!(
                    "spawn for {:?} at {:?} does not fit on the board",
                    player, spawn.position
                ));
            }
        }

        Ok(())
    }
}
