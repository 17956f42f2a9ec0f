use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::{
    action::{Direction, Player},
    collision::{CollisionReport, Verdict, food_captures, resolve},
    config::{BOUNDS, MatchConfig, SpawnConfig},
    food::Food,
    grid::Position,
    snake::Snake,
    state::{BoardSnapshot, MatchEvent, Phase, RoundOutcome, TickResult, Winner},
};

/// Owns both snakes, the food and the scores, and advances the match one
/// fixed-interval step at a time.
pub struct MatchController {
    config: MatchConfig,
    snakes: [Snake; 2],
    food: Food,
    scores: [u32; 2],
    phase: Phase,
    last_outcome: Option<RoundOutcome>,
    /// At most one buffered direction change per snake per step
    pending: [Option<Direction>; 2],
    /// Seconds accumulated toward the next step
    accumulator: f32,
    /// Seconds spent waiting on an all-AI ready screen
    countdown: f32,
    /// Events raised outside `tick`, delivered with the next `TickResult`
    queued: Vec<MatchEvent>,
    rng: ChaCha8Rng,
}

impl MatchController {
    /// Create a controller; food placement is seeded from `config.seed` when set
    pub fn new(config: MatchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: MatchConfig, mut rng: ChaCha8Rng) -> Self {
        let snakes = [
            Snake::new(config.spawns.spawn(Player::One)),
            Snake::new(config.spawns.spawn(Player::Two)),
        ];
        let food = Food::spawn(&mut rng, &[&snakes[0], &snakes[1]], BOUNDS);

        Self {
            config,
            snakes,
            food,
            scores: [0, 0],
            phase: Phase::WaitingToStart,
            last_outcome: None,
            pending: [None, None],
            accumulator: 0.0,
            countdown: 0.0,
            queued: Vec::new(),
            rng,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn snake(&self, player: Player) -> &Snake {
        &self.snakes[player.index()]
    }

    pub fn food(&self) -> Position {
        self.food.position
    }

    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    pub fn last_outcome(&self) -> Option<RoundOutcome> {
        self.last_outcome
    }

    /// Seconds left on the all-AI start countdown
    pub fn countdown_remaining(&self) -> f32 {
        (self.config.start_delay - self.countdown).max(0.0)
    }

    /// Put both snakes on `spawns` and wait for a new start. Clears scores,
    /// buffered input and the previous outcome.
    pub fn start_round(&mut self, spawns: SpawnConfig) {
        self.config.spawns = spawns;
        for player in Player::BOTH {
            self.snakes[player.index()].reset(spawns.spawn(player));
        }
        self.relocate_food();
        self.scores = [0, 0];
        self.pending = [None, None];
        self.accumulator = 0.0;
        self.countdown = 0.0;
        self.phase = Phase::WaitingToStart;
        self.last_outcome = None;
        self.queued.clear();
        debug!(mode = ?self.config.mode, "round reset");
    }

    /// Restart with the current spawn configuration
    pub fn reset_round(&mut self) {
        self.start_round(self.config.spawns);
    }

    /// Record a direction change for `player`, applied on the next step.
    ///
    /// Rejected for AI-controlled snakes, when it reverses the snake's effective
    /// direction, or when a change is already buffered. A running snake's current
    /// heading is not a change and leaves the buffer free. While waiting to start,
    /// the proposal also counts as that player being ready; the round begins once
    /// every human player is.
    pub fn propose_direction(&mut self, player: Player, direction: Direction) -> bool {
        if !self.config.mode.is_human(player) {
            return false;
        }

        match self.phase {
            Phase::RoundOver(_) => return false,
            Phase::WaitingToStart | Phase::Running => {}
        }

        let idx = player.index();
        let heading = self.snakes[idx].heading();
        if self.phase == Phase::Running && direction == heading {
            return false;
        }
        if self.pending[idx].is_some() {
            debug!(?player, ?direction, "direction change already buffered");
            return false;
        }
        if direction.is_opposite(heading) {
            debug!(?player, ?direction, "reversal rejected");
            return false;
        }

        self.pending[idx] = Some(direction);

        if self.phase == Phase::WaitingToStart && self.humans_ready() {
            self.begin();
        }
        true
    }

    /// Leave the round-over screen. Returns false if there was nothing to acknowledge.
    pub fn acknowledge(&mut self) -> bool {
        if let Phase::RoundOver(_) = self.phase {
            self.phase = Phase::WaitingToStart;
            true
        } else {
            false
        }
    }

    /// Advance the fixed-interval clock by `elapsed` seconds and run at most one
    /// simulation step.
    pub fn tick(&mut self, elapsed: f32) -> TickResult {
        let mut result = self.advance_clock(elapsed);
        let mut events = std::mem::take(&mut self.queued);
        events.append(&mut result.events);
        result.events = events;
        result
    }

    fn advance_clock(&mut self, elapsed: f32) -> TickResult {
        match self.phase {
            Phase::RoundOver(_) => TickResult::idle(false),
            Phase::WaitingToStart => {
                if self.has_humans() {
                    return TickResult::idle(false);
                }
                self.countdown += elapsed;
                if self.countdown < self.config.start_delay {
                    return TickResult::idle(false);
                }
                self.begin();
                TickResult::idle(true)
            }
            Phase::Running => {
                self.accumulator += elapsed;
                if self.accumulator < self.config.tick_interval {
                    return TickResult::idle(true);
                }
                self.accumulator = 0.0;
                self.step()
            }
        }
    }

    /// One simulation step: AI decisions on the pre-step board, buffered
    /// intents, movement, then food and collision resolution.
    pub fn step(&mut self) -> TickResult {
        if self.phase != Phase::Running {
            return TickResult::idle(false);
        }

        let decisions = Player::BOTH.map(|player| self.ai_decision(player));

        for player in Player::BOTH {
            let idx = player.index();
            let snake = &mut self.snakes[idx];
            if let Some(direction) = self.pending[idx].take() {
                if !direction.is_opposite(snake.heading()) {
                    snake.direction = direction;
                }
            }
            if let Some(direction) = decisions[idx] {
                snake.direction = direction;
            }
        }

        for snake in &mut self.snakes {
            snake.advance();
        }

        let mut events = Vec::new();
        self.resolve_food(&mut events);

        let report = CollisionReport::detect(&self.snakes[0], &self.snakes[1], BOUNDS);
        for player in Player::BOTH {
            for kind in report.collisions(player) {
                events.push(MatchEvent::Collision(player, kind));
            }
        }

        match resolve(&report, self.scores, self.config.winner_tracking) {
            Verdict::Continue => TickResult {
                still_running: true,
                outcome: None,
                stepped: true,
                events,
            },
            Verdict::RoundOver { winner } => {
                let outcome = self.end_round(winner);
                events.push(MatchEvent::RoundEnded(outcome));
                TickResult {
                    still_running: false,
                    outcome: Some(outcome),
                    stepped: true,
                    events,
                }
            }
        }
    }

    /// Snapshot of everything a renderer needs
    pub fn board_state(&self) -> BoardSnapshot {
        BoardSnapshot {
            snakes: [
                self.snakes[0].segments().copied().collect(),
                self.snakes[1].segments().copied().collect(),
            ],
            food: self.food.position,
            scores: self.scores,
            phase: self.phase,
            last_outcome: self.last_outcome,
        }
    }

    fn has_humans(&self) -> bool {
        Player::BOTH
            .iter()
            .any(|&player| self.config.mode.is_human(player))
    }

    fn humans_ready(&self) -> bool {
        Player::BOTH
            .iter()
            .filter(|&&player| self.config.mode.is_human(player))
            .all(|player| self.pending[player.index()].is_some())
    }

    /// Start the round: humans take their ready direction, AIs their spawn direction
    fn begin(&mut self) {
        for player in Player::BOTH {
            let idx = player.index();
            let snake = &mut self.snakes[idx];
            snake.direction = match self.pending[idx].take() {
                Some(direction) => direction,
                None => snake.spawn().direction,
            };
        }
        self.accumulator = 0.0;
        self.countdown = 0.0;
        self.last_outcome = None;
        self.phase = Phase::Running;
        self.queued.push(MatchEvent::RoundStarted);
        info!(mode = ?self.config.mode, "round started");
    }

    fn ai_decision(&self, player: Player) -> Option<Direction> {
        if self.config.mode.is_human(player) {
            return None;
        }
        let own = &self.snakes[player.index()];
        let opponent = &self.snakes[player.other().index()];
        let decision = own.ai_direction(self.food.position, opponent, BOUNDS);
        if decision.is_none() {
            debug!(?player, head = ?own.head(), "ai has no safe move");
        }
        decision
    }

    /// Both snakes are checked against the same pre-step food position; the
    /// food moves once even if both heads landed on it.
    fn resolve_food(&mut self, events: &mut Vec<MatchEvent>) {
        let captures = food_captures(&self.snakes[0], &self.snakes[1], self.food.position);
        for player in Player::BOTH {
            if captures[player.index()] {
                self.snakes[player.index()].grow();
                self.scores[player.index()] += 1;
                events.push(MatchEvent::FoodEaten(player));
                debug!(?player, score = self.scores[player.index()], "food eaten");
            }
        }
        if captures.iter().any(|&captured| captured) {
            self.relocate_food();
        }
    }

    fn end_round(&mut self, winner: Option<Winner>) -> RoundOutcome {
        let outcome = RoundOutcome {
            winner,
            final_scores: self.scores,
        };

        for snake in &mut self.snakes {
            snake.reset_to_spawn();
        }
        self.relocate_food();
        self.scores = [0, 0];
        self.pending = [None, None];
        self.accumulator = 0.0;
        self.countdown = 0.0;
        self.last_outcome = Some(outcome);
        self.phase = if self.config.winner_tracking {
            Phase::RoundOver(outcome)
        } else {
            Phase::WaitingToStart
        };

        info!(?winner, scores = ?outcome.final_scores, "round over");
        outcome
    }

    fn relocate_food(&mut self) {
        let [one, two] = &self.snakes;
        self.food.relocate(&mut self.rng, &[one, two], BOUNDS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::collision::CollisionType;
    use crate::game::config::MatchMode;
    use crate::game::snake::Spawn;

    fn controller(mode: MatchMode) -> MatchController {
        MatchController::new(MatchConfig::new(mode).with_seed(42))
    }

    fn running(mode: MatchMode) -> MatchController {
        let mut game = controller(mode);
        game.phase = Phase::Running;
        game
    }

    fn place(
        game: &mut MatchController,
        player: Player,
        segments: &[(i32, i32)],
        direction: Direction,
    ) {
        game.snakes[player.index()] = Snake::from_segments(
            segments.iter().map(|&(x, y)| Position::new(x, y)),
            direction,
        );
    }

    #[test]
    fn test_new_match_waits_for_players() {
        let game = controller(MatchMode::PlayerVsPlayer);
        assert_eq!(game.phase(), Phase::WaitingToStart);
        assert_eq!(game.score(Player::One), 0);
        assert_eq!(game.snake(Player::One).len(), 3);
        assert_eq!(game.snake(Player::Two).head(), Position::new(18, 15));
        assert!(!game.snake(Player::One).occupies(game.food()));
        assert!(!game.snake(Player::Two).occupies(game.food()));
    }

    #[test]
    fn test_pvp_needs_both_players_to_start() {
        let mut game = controller(MatchMode::PlayerVsPlayer);

        assert!(game.propose_direction(Player::One, Direction::Up));
        assert_eq!(game.phase(), Phase::WaitingToStart);
        let result = game.tick(1.0);
        assert!(!result.still_running);
        assert!(!result.stepped);

        assert!(game.propose_direction(Player::Two, Direction::Down));
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.snake(Player::One).direction, Direction::Up);
        assert_eq!(game.snake(Player::Two).direction, Direction::Down);
    }

    #[test]
    fn test_start_rejects_reversal_into_own_body() {
        let mut game = controller(MatchMode::PlayerVsPlayer);
        // Player one spawns facing right, player two facing left.
        assert!(!game.propose_direction(Player::One, Direction::Left));
        assert!(!game.propose_direction(Player::Two, Direction::Right));
        assert_eq!(game.phase(), Phase::WaitingToStart);
    }

    #[test]
    fn test_pva_starts_on_single_key() {
        let mut game = controller(MatchMode::PlayerVsAi);
        assert!(!game.propose_direction(Player::Two, Direction::Up));
        assert!(game.propose_direction(Player::One, Direction::Down));
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.snake(Player::One).direction, Direction::Down);
        assert_eq!(game.snake(Player::Two).direction, Direction::Left);
    }

    #[test]
    fn test_ai_vs_ai_countdown() {
        let mut game = controller(MatchMode::AiVsAi);
        assert!(!game.propose_direction(Player::One, Direction::Up));

        let result = game.tick(1.0);
        assert!(!result.still_running);
        assert_eq!(game.phase(), Phase::WaitingToStart);
        assert_eq!(game.countdown_remaining(), 1.0);

        let result = game.tick(1.0);
        assert!(result.still_running);
        assert_eq!(result.events, vec![MatchEvent::RoundStarted]);
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.snake(Player::One).direction, Direction::Right);
        assert_eq!(game.snake(Player::Two).direction, Direction::Left);
    }

    #[test]
    fn test_fixed_interval_stepping() {
        let mut game = running(MatchMode::PlayerVsPlayer);
        let head = game.snake(Player::One).head();

        let result = game.tick(0.15);
        assert!(result.still_running);
        assert!(!result.stepped);
        assert_eq!(game.snake(Player::One).head(), head);

        let result = game.tick(0.15);
        assert!(result.stepped);
        assert_eq!(game.snake(Player::One).head(), Position::new(7, 9));

        // A long frame still only runs one step.
        let result = game.tick(5.0);
        assert!(result.stepped);
        assert_eq!(game.snake(Player::One).head(), Position::new(8, 9));
        assert!(!game.tick(0.01).stepped);
    }

    #[test]
    fn test_one_buffered_change_per_step() {
        let mut game = running(MatchMode::PlayerVsPlayer);

        assert!(game.propose_direction(Player::One, Direction::Up));
        assert!(!game.propose_direction(Player::One, Direction::Left));
        game.step();
        assert_eq!(game.snake(Player::One).head(), Position::new(6, 8));

        assert!(game.propose_direction(Player::One, Direction::Left));
        game.step();
        assert_eq!(game.snake(Player::One).head(), Position::new(5, 8));
    }

    #[test]
    fn test_current_heading_leaves_buffer_free() {
        let mut game = running(MatchMode::PlayerVsPlayer);

        // Auto-repeat of the key the snake is already following.
        assert!(!game.propose_direction(Player::One, Direction::Right));
        assert!(!game.propose_direction(Player::One, Direction::Right));
        assert!(game.propose_direction(Player::One, Direction::Up));
        game.step();
        assert_eq!(game.snake(Player::One).head(), Position::new(6, 8));
    }

    #[test]
    fn test_human_start_reports_round_started() {
        let mut game = controller(MatchMode::PlayerVsAi);
        assert!(game.propose_direction(Player::One, Direction::Up));
        assert_eq!(game.phase(), Phase::Running);

        let result = game.tick(0.05);
        assert_eq!(result.events, vec![MatchEvent::RoundStarted]);
        assert!(game.tick(0.05).events.is_empty());
    }

    #[test]
    fn test_reset_drops_undelivered_round_start() {
        let mut game = controller(MatchMode::PlayerVsAi);
        assert!(game.propose_direction(Player::One, Direction::Up));
        game.reset_round();
        assert!(game.tick(0.05).events.is_empty());
    }

    #[test]
    fn test_reversal_checked_against_effective_direction() {
        let mut game = running(MatchMode::PlayerVsPlayer);
        // Stored direction is stale; the snake actually last moved right.
        game.snakes[0].direction = Direction::Up;
        assert!(!game.propose_direction(Player::One, Direction::Left));
        assert!(game.propose_direction(Player::One, Direction::Down));
    }

    #[test]
    fn test_ai_snake_ignores_proposals() {
        let mut game = running(MatchMode::PlayerVsAi);
        assert!(!game.propose_direction(Player::Two, Direction::Up));
    }

    #[test]
    fn test_food_capture_scenario() {
        let mut game = running(MatchMode::PlayerVsPlayer);
        place(
            &mut game,
            Player::One,
            &[(5, 5), (4, 5), (3, 5)],
            Direction::Right,
        );
        game.food.position = Position::new(6, 5);

        let result = game.step();

        assert!(result.still_running);
        assert_eq!(result.events, vec![MatchEvent::FoodEaten(Player::One)]);
        let snake = game.snake(Player::One);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert!(snake.is_growing());
        assert_eq!(game.score(Player::One), 1);
        assert_ne!(game.food(), Position::new(6, 5));
        assert!(!snake.occupies(game.food()));
        assert!(!game.snake(Player::Two).occupies(game.food()));

        game.step();
        assert_eq!(game.snake(Player::One).len(), 4);
    }

    #[test]
    fn test_wall_scenario_ends_round() {
        let mut game = running(MatchMode::PlayerVsPlayer);
        place(
            &mut game,
            Player::One,
            &[(24, 10), (23, 10), (22, 10)],
            Direction::Right,
        );
        game.food.position = Position::new(0, 0);
        game.scores = [3, 1];

        let result = game.step();

        assert!(!result.still_running);
        let outcome = result.outcome.expect("round should end");
        assert_eq!(outcome.winner, Some(Winner::Player(Player::Two)));
        assert_eq!(outcome.final_scores, [3, 1]);
        assert!(result
            .events
            .contains(&MatchEvent::Collision(Player::One, CollisionType::Wall)));
        assert_eq!(game.phase(), Phase::RoundOver(outcome));

        // Everything is back at the spawns with cleared scores.
        assert_eq!(game.snake(Player::One).head(), Position::new(6, 9));
        assert_eq!(game.snake(Player::Two).head(), Position::new(18, 15));
        assert_eq!(game.score(Player::One), 0);
        assert_eq!(game.score(Player::Two), 0);
        assert!(!game.snake(Player::One).occupies(game.food()));
    }

    #[test]
    fn test_round_over_acknowledge() {
        let mut game = running(MatchMode::PlayerVsPlayer);
        place(
            &mut game,
            Player::One,
            &[(24, 10), (23, 10), (22, 10)],
            Direction::Right,
        );
        game.step();

        assert!(!game.propose_direction(Player::One, Direction::Up));
        assert!(!game.tick(1.0).still_running);

        assert!(game.acknowledge());
        assert_eq!(game.phase(), Phase::WaitingToStart);
        assert!(!game.acknowledge());

        assert!(game.propose_direction(Player::One, Direction::Up));
        assert!(game.propose_direction(Player::Two, Direction::Up));
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.last_outcome(), None);
    }

    #[test]
    fn test_legacy_rules_return_to_waiting() {
        let mut config = MatchConfig::new(MatchMode::PlayerVsPlayer).with_seed(1);
        config.winner_tracking = false;
        let mut game = MatchController::new(config);
        game.phase = Phase::Running;
        place(
            &mut game,
            Player::Two,
            &[(0, 3), (1, 3), (2, 3)],
            Direction::Left,
        );

        let result = game.step();

        let outcome = result.outcome.expect("round should end");
        assert_eq!(outcome.winner, None);
        assert_eq!(game.phase(), Phase::WaitingToStart);
    }

    #[test]
    fn test_head_to_head_on_food_ties_on_equal_scores() {
        let mut game = running(MatchMode::PlayerVsPlayer);
        place(
            &mut game,
            Player::One,
            &[(9, 10), (8, 10), (7, 10)],
            Direction::Right,
        );
        place(
            &mut game,
            Player::Two,
            &[(11, 10), (12, 10), (13, 10)],
            Direction::Left,
        );
        game.food.position = Position::new(10, 10);

        let result = game.step();

        assert!(result.events.contains(&MatchEvent::FoodEaten(Player::One)));
        assert!(result.events.contains(&MatchEvent::FoodEaten(Player::Two)));
        let outcome = result.outcome.expect("heads met");
        assert_eq!(outcome.final_scores, [1, 1]);
        assert_eq!(outcome.winner, Some(Winner::Tie));
    }

    #[test]
    fn test_head_to_head_higher_score_wins() {
        let mut game = running(MatchMode::PlayerVsPlayer);
        place(
            &mut game,
            Player::One,
            &[(9, 10), (8, 10), (7, 10)],
            Direction::Right,
        );
        place(
            &mut game,
            Player::Two,
            &[(11, 10), (12, 10), (13, 10)],
            Direction::Left,
        );
        game.food.position = Position::new(0, 0);
        game.scores = [5, 3];

        let outcome = game.step().outcome.expect("heads met");
        assert_eq!(outcome.winner, Some(Winner::Player(Player::One)));
    }

    #[test]
    fn test_ai_steers_toward_food() {
        let mut game = running(MatchMode::PlayerVsAi);
        place(
            &mut game,
            Player::Two,
            &[(10, 10), (11, 10), (12, 10)],
            Direction::Left,
        );
        game.food.position = Position::new(10, 3);

        game.step();
        assert_eq!(game.snake(Player::Two).head(), Position::new(10, 9));
        assert_eq!(game.snake(Player::Two).direction, Direction::Up);
    }

    #[test]
    fn test_board_state_is_idempotent() {
        let mut game = running(MatchMode::AiVsAi);
        game.step();
        let first = game.board_state();
        let second = game.board_state();
        assert_eq!(first, second);
        let body: Vec<Position> = game.snake(Player::One).segments().copied().collect();
        assert_eq!(first.snake(Player::One), body.as_slice());
        assert_eq!(first.food, game.food());
    }

    #[test]
    fn test_seeded_ai_matches_replay() {
        let mut a = controller(MatchMode::AiVsAi);
        let mut b = controller(MatchMode::AiVsAi);
        for _ in 0..300 {
            a.tick(0.1);
            b.tick(0.1);
            if let Phase::RoundOver(_) = a.phase() {
                a.acknowledge();
                b.acknowledge();
            }
            assert_eq!(a.board_state(), b.board_state());
        }
    }

    #[test]
    fn test_reset_round_clears_everything() {
        let mut game = running(MatchMode::PlayerVsPlayer);
        game.step();
        game.scores = [4, 2];
        game.pending = [Some(Direction::Up), None];

        game.reset_round();

        assert_eq!(game.phase(), Phase::WaitingToStart);
        assert_eq!(game.board_state().scores, [0, 0]);
        assert_eq!(game.pending, [None, None]);
        assert_eq!(game.snake(Player::One).head(), Position::new(6, 9));
    }

    #[test]
    fn test_start_round_with_new_spawns() {
        let mut game = controller(MatchMode::PlayerVsPlayer);
        let spawns = SpawnConfig::new(
            Spawn::new(Position::new(3, 3), Direction::Down),
            Spawn::new(Position::new(20, 20), Direction::Up),
        );
        game.start_round(spawns);

        assert_eq!(game.snake(Player::One).head(), Position::new(3, 3));
        assert_eq!(game.snake(Player::One).tail(), Position::new(3, 1));
        assert_eq!(game.snake(Player::Two).direction, Direction::Up);
        assert_eq!(game.config().spawns, spawns);
    }
}
