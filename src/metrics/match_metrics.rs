use std::time::{Duration, Instant};

use crate::game::{Player, RoundOutcome, Winner};

/// Session statistics shown in the match header
pub struct MatchMetrics {
    pub round_start: Instant,
    pub elapsed_time: Duration,
    pub rounds_played: u32,
    /// Rounds won, indexed by `Player::index`
    pub wins: [u32; 2],
    pub ties: u32,
    pub best_score: u32,
}

impl MatchMetrics {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            rounds_played: 0,
            wins: [0, 0],
            ties: 0,
            best_score: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.round_start.elapsed();
    }

    pub fn on_round_start(&mut self) {
        self.round_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_round_over(&mut self, outcome: &RoundOutcome) {
        self.rounds_played += 1;
        match outcome.winner {
            Some(Winner::Player(player)) => self.wins[player.index()] += 1,
            Some(Winner::Tie) => self.ties += 1,
            None => {}
        }
        let best = outcome.final_scores.iter().copied().max().unwrap_or(0);
        if best > self.best_score {
            self.best_score = best;
        }
    }

    pub fn wins(&self, player: Player) -> u32 {
        self.wins[player.index()]
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for MatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}
