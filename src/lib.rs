//! Snake Duel - two snakes competing for food on one grid
//!
//! This library provides:
//! - Core match rules, collision resolution and the greedy AI (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Per-session statistics (metrics module)
//! - Menus and the match screen (modes module)
//! - Terminal-bell audio cues (audio module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
