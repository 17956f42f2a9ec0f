//! Core match logic for two-snake Snake
//!
//! This module contains the simulation without any I/O or rendering dependencies:
//! movement, food, collision resolution, the greedy AI and the round controller.
//! A front end drives it by proposing directions and calling `tick` every frame.

pub mod action;
pub mod ai;
pub mod collision;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Player};
pub use collision::{CollisionReport, CollisionType, Verdict};
pub use config::{BOUNDS, Controller, GRID_CELLS, MatchConfig, MatchMode, SpawnConfig};
pub use engine::MatchController;
pub use food::Food;
pub use grid::{GridBounds, Position};
pub use snake::{Snake, Spawn};
pub use state::{BoardSnapshot, MatchEvent, Phase, RoundOutcome, TickResult, Winner};
