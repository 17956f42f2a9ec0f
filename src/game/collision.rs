//! Per-tick collision detection and round outcome resolution

use serde::{Deserialize, Serialize};

use super::action::Player;
use super::grid::{GridBounds, Position};
use super::snake::Snake;
use super::state::Winner;

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Head left the grid
    Wall,
    /// Head ran into its own body
    SelfCollision,
    /// Head ran into the other snake's body
    OpponentBody,
    /// Both heads landed on the same cell
    HeadToHead,
}

/// Collisions attributable to one snake
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Faults {
    pub wall: bool,
    pub self_collision: bool,
    pub opponent_body: bool,
}

impl Faults {
    pub fn any(&self) -> bool {
        self.wall || self.self_collision || self.opponent_body
    }

    pub fn causes(&self) -> impl Iterator<Item = CollisionType> {
        [
            (self.wall, CollisionType::Wall),
            (self.self_collision, CollisionType::SelfCollision),
            (self.opponent_body, CollisionType::OpponentBody),
        ]
        .into_iter()
        .filter_map(|(hit, kind)| hit.then_some(kind))
    }
}

/// Everything that went wrong on one tick, detected after both snakes moved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub faults: [Faults; 2],
    pub head_to_head: bool,
}

impl CollisionReport {
    /// Check both post-move snakes against the walls, themselves and each other
    pub fn detect(one: &Snake, two: &Snake, bounds: GridBounds) -> Self {
        Self {
            faults: [faults_of(one, two, bounds), faults_of(two, one, bounds)],
            head_to_head: one.head() == two.head(),
        }
    }

    pub fn faults(&self, player: Player) -> Faults {
        self.faults[player.index()]
    }

    pub fn at_fault(&self, player: Player) -> bool {
        self.faults(player).any()
    }

    /// Nothing collided this tick
    pub fn is_clear(&self) -> bool {
        !self.head_to_head && !self.at_fault(Player::One) && !self.at_fault(Player::Two)
    }

    /// All collision types seen by `player`, head-to-head included
    pub fn collisions(&self, player: Player) -> Vec<CollisionType> {
        let mut kinds: Vec<_> = self.faults(player).causes().collect();
        if self.head_to_head {
            kinds.push(CollisionType::HeadToHead);
        }
        kinds
    }
}

fn faults_of(snake: &Snake, opponent: &Snake, bounds: GridBounds) -> Faults {
    let head = snake.head();
    Faults {
        wall: !bounds.contains(head),
        self_collision: snake.collides_with_body(head),
        opponent_body: opponent.collides_with_body(head),
    }
}

/// Which snakes' heads sit on the food. Both are checked against the same
/// position, so a shared capture credits both.
pub fn food_captures(one: &Snake, two: &Snake, food: Position) -> [bool; 2] {
    [one.head() == food, two.head() == food]
}

/// What the resolver decided for a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    /// The round is over; `winner` is `None` when winners are not tracked
    RoundOver { winner: Option<Winner> },
}

/// Turn a collision report into a single authoritative verdict.
///
/// With winner tracking, a lone culprit loses; when both are at fault or the
/// heads met, the higher score wins and equal scores tie. Without winner
/// tracking any collision ends the round with no winner.
pub fn resolve(report: &CollisionReport, scores: [u32; 2], winner_tracking: bool) -> Verdict {
    if report.is_clear() {
        return Verdict::Continue;
    }

    if !winner_tracking {
        return Verdict::RoundOver { winner: None };
    }

    let one = report.at_fault(Player::One);
    let two = report.at_fault(Player::Two);

    let winner = if report.head_to_head || (one && two) {
        by_score(scores)
    } else if one {
        Winner::Player(Player::Two)
    } else {
        Winner::Player(Player::One)
    };

    Verdict::RoundOver {
        winner: Some(winner),
    }
}

fn by_score(scores: [u32; 2]) -> Winner {
    match scores[0].cmp(&scores[1]) {
        std::cmp::Ordering::Greater => Winner::Player(Player::One),
        std::cmp::Ordering::Less => Winner::Player(Player::Two),
        std::cmp::Ordering::Equal => Winner::Tie,
    }
}
