use serde::{Deserialize, Serialize};

use super::action::Player;
use super::collision::CollisionType;
use super::grid::Position;

/// Who took the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player(Player),
    Tie,
}

/// How a finished round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// `None` when winners are not tracked
    pub winner: Option<Winner>,
    /// Scores at the moment the round ended, before they were cleared
    pub final_scores: [u32; 2],
}

/// Where the match controller is in its round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Snakes sit at their spawns until the start inputs arrive
    WaitingToStart,
    Running,
    /// Holds the finished round's outcome until acknowledged
    RoundOver(RoundOutcome),
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    RoundStarted,
    FoodEaten(Player),
    /// `player` collided; one event per collision type
    Collision(Player, CollisionType),
    RoundEnded(RoundOutcome),
}

/// Result of a call to `MatchController::tick`
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub still_running: bool,
    /// Set on the tick that ended a round
    pub outcome: Option<RoundOutcome>,
    /// Whether a simulation step happened during this call
    pub stepped: bool,
    pub events: Vec<MatchEvent>,
}

impl TickResult {
    pub(crate) fn idle(still_running: bool) -> Self {
        Self {
            still_running,
            outcome: None,
            stepped: false,
            events: Vec::new(),
        }
    }
}

/// Read-only view of the board for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Head-first bodies, indexed by `Player::index`
    pub snakes: [Vec<Position>; 2],
    pub food: Position,
    pub scores: [u32; 2],
    pub phase: Phase,
    /// Outcome of the most recent round, kept until a new round starts
    pub last_outcome: Option<RoundOutcome>,
}

impl BoardSnapshot {
    pub fn snake(&self, player: Player) -> &[Position] {
        &self.snakes[player.index()]
    }

    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    pub fn head(&self, player: Player) -> Option<Position> {
        self.snake(player).first().copied()
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}
