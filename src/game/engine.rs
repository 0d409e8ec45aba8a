use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{Bonus, BonusKind, CollisionType, GameState, Position, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use rand_distr::StandardNormal;

/// Inputs kept between two ticks; older ones are dropped
const DIRECTION_BUFFER_LEN: usize = 2;

/// Foods between bonuses are drawn from a normal distribution
const BONUS_GAP_MEAN: f64 = 5.5;
const BONUS_GAP_STD_DEV: f64 = 0.5;

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Points scored by eating a bonus this step
    pub bonus_points: Option<u32>,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Points scored this step
    pub points: u32,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn idle(terminated: bool) -> Self {
        Self {
            points: 0,
            terminated,
            info: StepInfo::default(),
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with a reproducible food and bonus sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state. The new game waits for a direction key.
    pub fn reset(&mut self) -> GameState {
        let width = self.config.grid_width;
        let height = self.config.grid_height;

        let snake = Snake::new(
            Position::new((width / 2) as i32, (height / 2) as i32),
            Direction::Right,
            self.config.initial_snake_length,
            width,
            height,
        );

        // Placeholder food; replaced right below once the snake is in place
        let mut state = GameState::new(snake, Position::new(0, 0), width, height);
        state.is_paused = true;
        state.bonus_countdown = self.roll_bonus_countdown();

        match self.free_cell(&state) {
            Some(food) => state.food = food,
            None => state.is_won = true,
        }

        log::info!(
            "new game: {}x{} grid, snake length {}",
            width,
            height,
            state.snake.len()
        );
        state
    }

    /// Buffer a turn for the next tick and unpause
    pub fn queue_direction(&self, state: &mut GameState, direction: Direction) {
        state.direction_buffer.push_back(direction);
        if state.is_paused {
            log::debug!("resumed by direction input");
        }
        state.is_paused = false;
    }

    pub fn toggle_pause(&self, state: &mut GameState) {
        state.is_paused = !state.is_paused;
        log::info!("game {}", if state.is_paused { "paused" } else { "resumed" });
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if state.is_over() {
            return StepResult::idle(true);
        }

        if let Action::Move(direction) = action {
            self.queue_direction(state, direction);
        }

        if state.is_paused {
            return StepResult::idle(false);
        }

        state.snake.close_mouth();
        self.apply_buffered_direction(state);

        let new_head = self.next_head(state);

        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.is_alive = false;
            state.steps += 1;
            log::info!(
                "game over: {:?} after {} steps, score {}",
                collision_type,
                state.steps,
                state.score
            );

            return StepResult {
                points: 0,
                terminated: true,
                info: StepInfo {
                    collision_type: Some(collision_type),
                    ..Default::default()
                },
            };
        }

        state.snake.advance(new_head);

        let mut info = StepInfo::default();
        let mut points = 0;

        if new_head == state.food {
            state.snake.eat();
            points += self.config.points_per_food();
            state.bonus_countdown = state.bonus_countdown.saturating_sub(1);
            info.ate_food = true;
            log::debug!("food eaten at ({}, {})", new_head.x, new_head.y);

            match self.respawn_food(state) {
                Some(food) => state.food = food,
                None => {
                    state.score = state.score.saturating_add(points);
                    state.is_won = true;
                    state.steps += 1;
                    log::info!("grid filled, game won with score {}", state.score);
                    return StepResult {
                        points,
                        terminated: true,
                        info,
                    };
                }
            }
        }

        if let Some(bonus) = state.bonus.filter(|b| b.overlaps(new_head)) {
            state.snake.eat();
            let bonus_points = self.config.points_per_food().saturating_mul(bonus.timer);
            points = points.saturating_add(bonus_points);
            info.bonus_points = Some(bonus_points);
            state.bonus = None;
            state.bonus_countdown = self.roll_bonus_countdown();
            log::debug!("bonus {:?} eaten for {} points", bonus.kind, bonus_points);
        }

        state.score = state.score.saturating_add(points);

        // Open wide when something edible is right ahead
        let front = self.wrap(state, new_head.moved_in_direction(state.snake.direction));
        if front == state.food || state.bonus.is_some_and(|b| b.overlaps(front)) {
            state.snake.open_mouth();
        }

        if self.config.bonus_enabled {
            self.update_bonus(state);
        }

        state.steps += 1;

        StepResult {
            points,
            terminated: false,
            info,
        }
    }

    /// Take the oldest of the last two buffered inputs. A turn that would
    /// put the head on the neck is dropped, which also catches two quick
    /// turns adding up to a reversal.
    fn apply_buffered_direction(&self, state: &mut GameState) {
        let buffer = &mut state.direction_buffer;
        while buffer.len() > DIRECTION_BUFFER_LEN {
            buffer.pop_front();
        }
        let Some(direction) = buffer.pop_front() else {
            return;
        };

        let target = self.wrap(state, state.snake.head().moved_in_direction(direction));
        if state.snake.neck() == Some(target) {
            return;
        }
        state.snake.direction = direction;
    }

    fn next_head(&self, state: &GameState) -> Position {
        let head = state.snake.head().moved_in_direction(state.snake.direction);
        self.wrap(state, head)
    }

    fn wrap(&self, state: &GameState, pos: Position) -> Position {
        if self.config.wrap_around {
            pos.wrapped(state.grid_width, state.grid_height)
        } else {
            pos
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        // Check wall collision
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // Check self-collision
        if state.snake.would_collide(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn a bonus when the countdown runs out, age and expire an existing one
    fn update_bonus(&mut self, state: &mut GameState) {
        match state.bonus {
            None => {
                if state.bonus_countdown == 0 && state.score > 0 {
                    state.bonus = self.place_bonus(state);
                    if let Some(bonus) = state.bonus {
                        log::debug!(
                            "bonus {:?} at ({}, {})",
                            bonus.kind,
                            bonus.position.x,
                            bonus.position.y
                        );
                    }
                }
            }
            Some(bonus) if bonus.timer == 0 => {
                log::debug!("bonus {:?} expired", bonus.kind);
                state.bonus = None;
                state.bonus_countdown = self.roll_bonus_countdown();
            }
            Some(ref mut bonus) => bonus.timer -= 1,
        }
    }

    /// Pick two free horizontal cells for a bonus, away from the food
    fn place_bonus(&mut self, state: &GameState) -> Option<Bonus> {
        let candidates: Vec<Position> = grid_cells(state)
            .filter(|&pos| {
                let right = pos.moved_in_direction(Direction::Right);
                state.is_free(pos)
                    && state.is_free(right)
                    && pos != state.food
                    && right != state.food
            })
            .collect();

        let position = *candidates.choose(&mut self.rng)?;
        let kind = *BonusKind::ALL.choose(&mut self.rng)?;

        Some(Bonus {
            position,
            timer: self.config.bonus_lifetime,
            kind,
        })
    }

    /// New food after a meal. Cells under a bonus are only given up when
    /// nothing else is left; `None` means the snake fills the grid.
    fn respawn_food(&mut self, state: &mut GameState) -> Option<Position> {
        if let Some(food) = self.free_cell(state) {
            return Some(food);
        }
        let bonus = state.bonus.take()?;
        log::debug!("bonus {:?} cleared to make room for food", bonus.kind);
        state.bonus_countdown = self.roll_bonus_countdown();
        self.free_cell(state)
    }

    /// Spawn food at a random empty position
    fn free_cell(&mut self, state: &GameState) -> Option<Position> {
        let candidates: Vec<Position> = grid_cells(state)
            .filter(|&pos| state.is_free(pos))
            .collect();
        candidates.choose(&mut self.rng).copied()
    }

    /// Foods until the next bonus, truncated toward zero
    fn roll_bonus_countdown(&mut self) -> u32 {
        let z: f64 = self.rng.sample(StandardNormal);
        (BONUS_GAP_MEAN + BONUS_GAP_STD_DEV * z).max(0.0) as u32
    }
}

/// Every cell of the grid, row by row
fn grid_cells(state: &GameState) -> impl Iterator<Item = Position> + use<> {
    let (width, height) = (state.grid_width as i32, state.grid_height as i32);
    (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
}
