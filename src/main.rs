use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use snake_duel::game::MatchMode;
use snake_duel::modes::{App, AppSettings};

#[derive(Parser)]
#[command(name = "snake_duel")]
#[command(version, about = "Two-snake competitive Snake in the terminal")]
struct Cli {
    /// Start at the menu or jump straight into a match
    #[arg(long, default_value = "menu")]
    mode: Mode,

    /// Any collision ends the round with no winner
    #[arg(long)]
    legacy_rules: bool,

    /// Seed for food placement, for reproducible matches
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Disable terminal bell cues
    #[arg(long)]
    no_sound: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Main menu
    Menu,
    /// Player vs player
    Pvp,
    /// Player vs AI
    Pva,
    /// AI vs AI
    Ava,
}

impl Mode {
    fn match_mode(self) -> Option<MatchMode> {
        match self {
            Mode::Menu => None,
            Mode::Pvp => Some(MatchMode::PlayerVsPlayer),
            Mode::Pva => Some(MatchMode::PlayerVsAi),
            Mode::Ava => Some(MatchMode::AiVsAi),
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "snake_duel=info".to_owned()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let settings = AppSettings {
        winner_tracking: !cli.legacy_rules,
        seed: cli.seed,
        sound: !cli.no_sound,
    };

    let mut app = match cli.mode.match_mode() {
        None => App::new(settings),
        Some(mode) => {
            let config = settings.match_config(mode);
            config
                .validate()
                .map_err(|err| anyhow!("Invalid match configuration: {err}"))?;
            App::with_match(config, settings)
        }
    };

    app.run().await
}
