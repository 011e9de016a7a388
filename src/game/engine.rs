use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::{
    action::Direction,
    config::GameConfig,
    error::GameError,
    food::Food,
    grid::{Grid, Occupant, Palette},
    lifecycle::{GameManager, GameStatus},
    state::{CollisionType, Position, Snake},
};
use crate::leaderboard::ScoreSink;
use crate::metrics::ScoreTracker;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Collision(CollisionType),
    /// The snake covers every cell, so no food can be placed
    BoardFilled,
}

/// Final numbers of a finished session
#[derive(Debug, Clone, PartialEq)]
pub struct GameOver {
    pub reason: EndReason,
    pub score: u32,
    pub elapsed: Duration,
    /// Whether a record went to the leaderboard
    pub submitted: bool,
}

/// What a single tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Not playing, or paused: nothing changed
    Suspended,
    Moved,
    Ate { score: u32 },
    /// The session ended. The driver must cancel its timer and show the menu.
    Over(GameOver),
}

/// One game session: snake, food, lifecycle, score and the board projection
///
/// A fresh session is built for every game. Input only changes the snake's
/// heading; all other state changes happen inside [`Session::tick`].
pub struct Session<S> {
    config: GameConfig,
    snake: Snake,
    food: Food,
    manager: GameManager,
    score: ScoreTracker,
    grid: Grid<S>,
    palette: Palette<S>,
    rng: StdRng,
    elapsed_display: String,
    steps: u64,
}

impl<S: Clone> Session<S> {
    /// Create an idle session. Fails fast on a grid that cannot be played.
    pub fn new(config: GameConfig, palette: Palette<S>) -> Result<Self, GameError> {
        Self::with_rng(config, palette, StdRng::from_entropy())
    }

    /// Create an idle session drawing food positions from `rng`
    pub fn with_rng(
        config: GameConfig,
        palette: Palette<S>,
        rng: StdRng,
    ) -> Result<Self, GameError> {
        config.validate_grid()?;
        let grid = Grid::new(config.grid_width, config.grid_height, palette.empty.clone())?;

        Ok(Self {
            snake: Snake::new(
                config.grid_width,
                config.grid_height,
                config.initial_snake_length,
            ),
            food: Food::new(config.grid_width, config.grid_height),
            manager: GameManager::new(),
            score: ScoreTracker::new(config.points_per_food),
            grid,
            palette,
            rng,
            elapsed_display: "0s".to_string(),
            steps: 0,
            config,
        })
    }

    /// Spawn snake and food, reset the score and begin running
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        self.snake
            .set_boundary(self.config.grid_width, self.config.grid_height);
        self.snake.face(Direction::Right);
        self.snake.set_spawn();

        self.food
            .set_boundary(self.config.grid_width, self.config.grid_height);
        // Config validation leaves at least one free cell at spawn.
        self.food.relocate(&self.snake, &mut self.rng);

        self.score.start_at(now);
        self.elapsed_display = self.score.formatted_elapsed();
        self.steps = 0;
        self.redraw();

        self.manager.start();
        info!(
            player = %self.config.player_name,
            width = self.config.grid_width,
            height = self.config.grid_height,
            speed = self.config.speed,
            "session started"
        );
    }

    /// Record a heading change for the next tick
    pub fn change_heading(&mut self, direction: Direction) {
        self.snake.change_heading(direction);
    }

    /// Toggle pause; returns the new pause flag
    pub fn toggle_pause(&mut self) -> bool {
        self.manager.pause();
        let paused = self.manager.is_paused();
        debug!(paused, "pause toggled");
        paused
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self, sink: &mut dyn ScoreSink) -> TickOutcome {
        self.tick_at(Instant::now(), sink)
    }

    pub fn tick_at(&mut self, now: Instant, sink: &mut dyn ScoreSink) -> TickOutcome {
        if !self.manager.is_active() {
            return TickOutcome::Suspended;
        }

        if let Some(collision) = self.snake.collision() {
            return self.finish(now, EndReason::Collision(collision), sink);
        }

        self.elapsed_display = self.score.sample_elapsed_at(now);

        let outcome = if self.food.matches(self.snake.head()) {
            self.snake.grow();
            if self.food.relocate(&self.snake, &mut self.rng).is_none() {
                self.score.add_points(None);
                self.steps += 1;
                self.redraw();
                return self.finish(now, EndReason::BoardFilled, sink);
            }
            let score = self.score.add_points(None);
            debug!(score, length = self.snake.segment_count(), "food eaten");
            TickOutcome::Ate { score }
        } else {
            self.snake.advance();
            TickOutcome::Moved
        };

        self.steps += 1;
        self.redraw();
        outcome
    }

    fn finish(
        &mut self,
        now: Instant,
        reason: EndReason,
        sink: &mut dyn ScoreSink,
    ) -> TickOutcome {
        self.manager.game_over();
        self.elapsed_display = self.score.sample_elapsed_at(now);
        let submitted = self.score.submit(&self.config.player_name, sink);

        info!(
            ?reason,
            score = self.score.score(),
            elapsed = %self.elapsed_display,
            submitted,
            "game over"
        );

        TickOutcome::Over(GameOver {
            reason,
            score: self.score.score(),
            elapsed: self.score.elapsed(),
            submitted,
        })
    }

    /// Rebuild the board: snake first, head before body, then the food
    fn redraw(&mut self) {
        let snake_style = &self.palette.snake;
        let head = std::iter::once((self.snake.head(), Occupant::SnakeHead, snake_style));
        let body = self
            .snake
            .body()
            .iter()
            .rev()
            .map(|pos| (*pos, Occupant::SnakeBody, snake_style));
        let food = std::iter::once((self.food.position(), Occupant::Food, &self.palette.food));

        self.grid.draw(head.chain(body).chain(food));
    }

    pub fn grid(&self) -> &Grid<S> {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food.position()
    }

    pub fn status(&self) -> GameStatus {
        self.manager.status()
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    /// Play time as last shown to the player
    pub fn elapsed_display(&self) -> &str {
        &self.elapsed_display
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[cfg(test)]
    fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    #[cfg(test)]
    fn food_mut(&mut self) -> &mut Food {
        &mut self.food
    }
}
