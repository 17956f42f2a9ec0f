use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::ai;
use super::grid::{GridBounds, Position};

/// Segments in a freshly spawned snake
pub const SPAWN_LENGTH: usize = 3;

/// Where a snake appears and which way it faces at round start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub position: Position,
    pub direction: Direction,
}

impl Spawn {
    pub const fn new(position: Position, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// Canonical body: head at `position`, trailing backward against `direction`
    fn body(&self) -> VecDeque<Position> {
        let (dx, dy) = self.direction.delta();
        (0..SPAWN_LENGTH as i32)
            .map(|i| self.position.moved_by(-dx * i, -dy * i))
            .collect()
    }
}

/// A snake on the board. The body is head-first and never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    /// Direction applied on the next move
    pub direction: Direction,
    grow_pending: bool,
    spawn: Spawn,
}

impl Snake {
    pub fn new(spawn: Spawn) -> Self {
        Self {
            body: spawn.body(),
            direction: spawn.direction,
            grow_pending: false,
            spawn,
        }
    }

    /// Build a snake with an arbitrary body, head first.
    ///
    /// The spawn is taken from the head and `direction`, so a later
    /// [`Snake::reset_to_spawn`] produces the canonical body at that head.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Self {
        let body: VecDeque<Position> = segments.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one segment");
        let spawn = Spawn::new(body[0], direction);
        Self {
            body,
            direction,
            grow_pending: false,
            spawn,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn segments(&self) -> impl Iterator<Item = &Position> + '_ {
        self.body.iter()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept alongside `len` for API symmetry
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn spawn(&self) -> Spawn {
        self.spawn
    }

    pub fn is_growing(&self) -> bool {
        self.grow_pending
    }

    /// Keep the tail on the next move
    pub fn grow(&mut self) {
        self.grow_pending = true;
    }

    /// True if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.iter().skip(1).any(|&segment| segment == pos)
    }

    /// Direction of the last move, read from the head and the segment behind it.
    ///
    /// `None` for a one-segment snake or a body whose first two segments are not
    /// adjacent.
    pub fn effective_direction(&self) -> Option<Direction> {
        let neck = self.body.get(1)?;
        let head = self.head();
        Direction::from_delta(head.x - neck.x, head.y - neck.y)
    }

    /// Effective direction when it can be derived, the stored direction otherwise
    pub fn heading(&self) -> Direction {
        self.effective_direction().unwrap_or(self.direction)
    }

    /// Where the head lands on the next move
    pub fn next_head(&self) -> Position {
        self.head().moved_in_direction(self.direction)
    }

    /// Push a new head in the current direction and drop the tail unless growth
    /// is pending. No bounds or collision checks happen here.
    pub fn advance(&mut self) {
        let new_head = self.next_head();
        self.body.push_front(new_head);

        if self.grow_pending {
            self.grow_pending = false;
        } else {
            self.body.pop_back();
        }
    }

    /// Respawn at `spawn` and remember it for later resets
    pub fn reset(&mut self, spawn: Spawn) {
        self.spawn = spawn;
        self.reset_to_spawn();
    }

    pub fn reset_to_spawn(&mut self) {
        self.body = self.spawn.body();
        self.direction = self.spawn.direction;
        self.grow_pending = false;
    }

    /// Greedy food-seeking direction for this snake, see [`ai::greedy_direction`]
    pub fn ai_direction(
        &self,
        food: Position,
        opponent: &Snake,
        bounds: GridBounds,
    ) -> Option<Direction> {
        ai::greedy_direction(self, self.heading(), food, opponent, bounds)
    }
}
