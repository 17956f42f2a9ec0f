use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{MatchConfig, MatchMode};
use crate::input::InputHandler;
use crate::render::Renderer;

use super::menu::{MainMenu, ModeSelect};
use super::play::PlayScreen;
use super::scene::{Screen, Transition};

/// Settings applied to every match started from the menus
#[derive(Debug, Clone, Copy)]
pub struct AppSettings {
    pub winner_tracking: bool,
    pub seed: Option<u64>,
    pub sound: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            winner_tracking: true,
            seed: None,
            sound: true,
        }
    }
}

impl AppSettings {
    pub fn match_config(&self, mode: MatchMode) -> MatchConfig {
        let mut config = MatchConfig::new(mode);
        config.winner_tracking = self.winner_tracking;
        config.seed = self.seed;
        config
    }
}

pub struct App {
    screen: Screen,
    settings: AppSettings,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl App {
    /// Starts at the main menu
    pub fn new(settings: AppSettings) -> Self {
        Self::with_screen(Screen::MainMenu(MainMenu::new()), settings)
    }

    /// Skips the menus and opens a match straight away
    pub fn with_match(config: MatchConfig, settings: AppSettings) -> Self {
        Self::with_screen(Screen::Match(PlayScreen::new(config, settings.sound)), settings)
    }

    fn with_screen(mut screen: Screen, settings: AppSettings) -> Self {
        screen.scene_mut().on_enter();
        Self {
            screen,
            settings,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn transition(&mut self, transition: Transition) {
        let next = match transition {
            Transition::Stay => return,
            Transition::Quit => {
                info!(from = self.screen.scene().name(), "quitting");
                self.screen.scene_mut().on_exit();
                self.should_quit = true;
                return;
            }
            Transition::MainMenu => Screen::MainMenu(MainMenu::new()),
            Transition::ModeSelect => Screen::ModeSelect(ModeSelect::new()),
            Transition::StartMatch(mode) => Screen::Match(PlayScreen::new(
                self.settings.match_config(mode),
                self.settings.sound,
            )),
        };

        self.screen.scene_mut().on_exit();
        let from = self.screen.scene().name();
        self.screen = next;
        self.screen.scene_mut().on_enter();
        info!(from, to = self.screen.scene().name(), "screen transition");
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS; matches advance on their own fixed interval
        let mut frame_timer = interval(Duration::from_millis(33));
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    let elapsed = now.duration_since(last_frame).as_secs_f32();
                    last_frame = now;

                    let transition = self.screen.scene_mut().tick(elapsed);
                    self.transition(transition);

                    if !self.should_quit {
                        terminal.draw(|frame| {
                            self.screen.scene().render(frame, &self.renderer);
                        }).context("Failed to draw frame")?;
                    }
                }

                _ = tokio::signal::ctrl_c() => {
                    self.transition(Transition::Quit);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            debug!(?action, screen = self.screen.scene().name(), "key");
            let transition = self.screen.scene_mut().handle_key(action);
            self.transition(transition);
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
