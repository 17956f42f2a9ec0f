pub mod renderer;

pub use renderer::{MatchView, MenuView, Renderer};
