pub mod app;
pub mod menu;
pub mod play;
pub mod scene;

pub use app::{App, AppSettings};
pub use menu::{MainMenu, ModeSelect};
pub use play::PlayScreen;
pub use scene::{Scene, Screen, Transition};
