use rand::Rng;
use rand::seq::IteratorRandom;
use tracing::warn;

use super::grid::{GridBounds, Position};
use super::snake::Snake;

/// The single food pellet on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Place a pellet on a random free cell
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, snakes: &[&Snake], bounds: GridBounds) -> Self {
        let position =
            random_free_cell(rng, snakes, bounds).unwrap_or(Position::new(0, 0));
        Self { position }
    }

    /// Move the pellet to a random free cell. A full board leaves it in place.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        snakes: &[&Snake],
        bounds: GridBounds,
    ) {
        match random_free_cell(rng, snakes, bounds) {
            Some(position) => self.position = position,
            None => warn!(
                "no free cell left for food, keeping it at {:?}",
                self.position
            ),
        }
    }
}

/// Uniformly random cell inside `bounds` not covered by any segment of `snakes`.
///
/// Rejection sampling first; after a bounded number of misses the free cells are
/// enumerated and one is picked uniformly. `None` only when the board is full.
pub fn random_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    snakes: &[&Snake],
    bounds: GridBounds,
) -> Option<Position> {
    let occupied = |pos: Position| snakes.iter().any(|snake| snake.occupies(pos));

    if bounds.cell_count() == 0 {
        return None;
    }

    let max_attempts = bounds.cell_count().saturating_mul(2).max(8);
    for _ in 0..max_attempts {
        let pos = Position::new(
            rng.gen_range(0..bounds.width),
            rng.gen_range(0..bounds.height),
        );
        if !occupied(pos) {
            return Some(pos);
        }
    }

    bounds.cells().filter(|&pos| !occupied(pos)).choose(rng)
}
