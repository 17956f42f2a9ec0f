use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{
    BoardSnapshot, GRID_CELLS, MatchMode, Phase, Player, Position, RoundOutcome, Winner,
};
use crate::metrics::MatchMetrics;

/// A vertical list of options with one highlighted
pub struct MenuView<'a> {
    pub title: &'a str,
    pub options: &'a [&'a str],
    pub selected: usize,
    pub hint: &'a str,
}

/// Everything drawn on a match screen
pub struct MatchView<'a> {
    pub board: &'a BoardSnapshot,
    pub mode: MatchMode,
    pub metrics: &'a MatchMetrics,
    /// Seconds left before an all-AI round starts
    pub countdown: f32,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn snake_color(player: Player, mode: MatchMode) -> Color {
        match (player, mode) {
            (Player::One, _) => Color::Green,
            (Player::Two, MatchMode::PlayerVsPlayer) => Color::LightBlue,
            (Player::Two, _) => Color::Red,
        }
    }

    pub fn render_menu(&self, frame: &mut Frame, menu: &MenuView<'_>) {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                menu.title.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (i, option) in menu.options.iter().enumerate() {
            let line = if i == menu.selected {
                Span::styled(
                    format!("> {option} <"),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(option.to_string(), Style::default().fg(Color::Gray))
            };
            lines.push(Line::from(line));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            menu.hint.to_string(),
            Style::default().fg(Color::DarkGray),
        )));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .title(" Snake ");
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            frame.area(),
        );
    }

    pub fn render_match(&self, frame: &mut Frame, view: &MatchView<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_scores(view), chunks[0]);

        let game_area = centered(
            chunks[1],
            (GRID_CELLS as u16) * 2 + 2,
            GRID_CELLS as u16 + 2,
        );

        let body = match view.board.phase {
            Phase::WaitingToStart => self.render_ready(view),
            Phase::Running => self.render_grid(view),
            Phase::RoundOver(outcome) => self.render_round_over(view.mode, &outcome),
        };
        frame.render_widget(body, game_area);

        frame.render_widget(self.render_controls(view.mode), chunks[2]);
    }

    fn render_grid(&self, view: &MatchView<'_>) -> Paragraph<'static> {
        let board = view.board;
        let mut lines = Vec::with_capacity(GRID_CELLS as usize);

        for y in 0..GRID_CELLS {
            let mut spans = Vec::with_capacity(GRID_CELLS as usize);

            for x in 0..GRID_CELLS {
                let pos = Position::new(x, y);
                spans.push(self.render_cell(board, view.mode, pos));
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White)),
        )
    }

    fn render_cell(&self, board: &BoardSnapshot, mode: MatchMode, pos: Position) -> Span<'static> {
        for player in Player::BOTH {
            let body = board.snake(player);
            let color = Self::snake_color(player, mode);
            if body.first() == Some(&pos) {
                return Span::styled(
                    "■ ",
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                );
            }
            if body.contains(&pos) {
                return Span::styled("□ ", Style::default().fg(color));
            }
        }

        if pos == board.food {
            Span::styled(
                "● ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(". ", Style::default().fg(Color::DarkGray))
        }
    }

    fn render_scores(&self, view: &MatchView<'_>) -> Paragraph<'static> {
        let mut spans = Vec::new();
        for player in Player::BOTH {
            spans.push(Span::styled(
                format!("{}: ", view.mode.label(player)),
                Style::default().fg(Self::snake_color(player, view.mode)),
            ));
            spans.push(Span::styled(
                view.board.score(player).to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw("    "));
        }
        spans.push(Span::styled("Round: ", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw((view.metrics.rounds_played + 1).to_string()));
        spans.push(Span::raw("    "));
        spans.push(Span::styled("Wins: ", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(
            "{}-{}",
            view.metrics.wins(Player::One),
            view.metrics.wins(Player::Two)
        )));
        spans.push(Span::raw("    "));
        spans.push(Span::styled("Best: ", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(view.metrics.best_score.to_string()));
        spans.push(Span::raw("    "));
        spans.push(Span::styled("Time: ", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(view.metrics.format_time()));

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_ready(&self, view: &MatchView<'_>) -> Paragraph<'static> {
        let mode = view.mode;
        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                mode.title(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        let prompt = match mode {
            MatchMode::PlayerVsPlayer => {
                text.push(Line::from(Span::styled(
                    "PLAYER 1: W A S D",
                    Style::default().fg(Self::snake_color(Player::One, mode)),
                )));
                text.push(Line::from(Span::styled(
                    "PLAYER 2: ARROW KEYS",
                    Style::default().fg(Self::snake_color(Player::Two, mode)),
                )));
                "BOTH PLAYERS PRESS A DIRECTION TO START".to_string()
            }
            MatchMode::PlayerVsAi => {
                text.push(Line::from("CONTROLS: W A S D or ARROW KEYS"));
                text.push(Line::from(Span::styled(
                    "vs SMART AI",
                    Style::default().fg(Self::snake_color(Player::Two, mode)),
                )));
                "PRESS A DIRECTION TO START".to_string()
            }
            MatchMode::AiVsAi => {
                text.push(Line::from(vec![
                    Span::styled("GREEN AI", Style::default().fg(Color::Green)),
                    Span::raw("  vs  "),
                    Span::styled("RED AI", Style::default().fg(Color::Red)),
                ]));
                format!("STARTING IN {:.1}...", view.countdown)
            }
        };

        if let Some(outcome) = view.board.last_outcome {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(
                format!(
                    "Last round: {} - {}",
                    outcome.final_scores[0], outcome.final_scores[1]
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            prompt,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_round_over(&self, mode: MatchMode, outcome: &RoundOutcome) -> Paragraph<'static> {
        let (headline, color) = match outcome.winner {
            Some(Winner::Player(player)) => (
                format!("{} WINS!", mode.label(player)),
                Self::snake_color(player, mode),
            ),
            Some(Winner::Tie) => ("TIE!".to_string(), Color::Yellow),
            None => ("GAME OVER".to_string(), Color::Red),
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!(
                        "{} {}  -  {} {}",
                        mode.label(Player::One),
                        outcome.final_scores[0],
                        mode.label(Player::Two),
                        outcome.final_scores[1]
                    ),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to continue",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, mode: MatchMode) -> Paragraph<'static> {
        let steer = match mode {
            MatchMode::PlayerVsPlayer => "P1 WASD | P2 ↑↓←→",
            MatchMode::PlayerVsAi => "WASD or ↑↓←→",
            MatchMode::AiVsAi => "watching",
        };
        let text = vec![Line::from(vec![
            Span::styled(steer, Style::default().fg(Color::Cyan)),
            Span::raw(" | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("ESC", Style::default().fg(Color::Yellow)),
            Span::raw(" menu | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
