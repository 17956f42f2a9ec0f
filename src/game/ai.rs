//! Greedy one-step direction policy for computer-controlled snakes

use super::action::Direction;
use super::grid::{GridBounds, Position};
use super::snake::Snake;

/// Pick the safe direction that brings `own`'s head closest to `food`.
///
/// Candidates are scanned in [`Direction::ALL`] order. The reversal of `current`
/// is never considered. A candidate is unsafe when its cell is off the grid or on
/// any segment of either snake, heads included. Ties on Manhattan distance keep
/// the earlier candidate.
///
/// Returns `None` when every candidate is unsafe; the caller keeps the current
/// direction in that case.
pub fn greedy_direction(
    own: &Snake,
    current: Direction,
    food: Position,
    opponent: &Snake,
    bounds: GridBounds,
) -> Option<Direction> {
    let head = own.head();

    let mut best: Option<(Direction, u32)> = None;
    for candidate in safe_moves(own, current, opponent, bounds) {
        let distance = head.moved_in_direction(candidate).manhattan_distance(food);
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((candidate, distance));
        }
    }

    best.map(|(direction, _)| direction)
}

/// Directions from `own`'s head that neither reverse nor die on the next step
pub fn safe_moves<'a>(
    own: &'a Snake,
    current: Direction,
    opponent: &'a Snake,
    bounds: GridBounds,
) -> impl Iterator<Item = Direction> + 'a {
    let head = own.head();
    Direction::ALL
        .into_iter()
        .filter(move |candidate| !candidate.is_opposite(current))
        .filter(move |&candidate| {
            let next = head.moved_in_direction(candidate);
            bounds.contains(next) && !own.occupies(next) && !opponent.occupies(next)
        })
}
