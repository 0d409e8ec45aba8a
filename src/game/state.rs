use std::collections::VecDeque;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Fold the position back onto a `width` x `height` grid
    pub fn wrapped(&self, width: usize, height: usize) -> Self {
        Self {
            x: self.x.rem_euclid(width as i32),
            y: self.y.rem_euclid(height as i32),
        }
    }
}

/// One grid cell occupied by the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub position: Position,
    /// Direction of travel when the snake entered this cell
    pub direction: Direction,
    /// The cell holds swallowed food; it grows the snake once it reaches the tail
    pub is_full: bool,
}

impl Section {
    pub fn new(position: Position, direction: Direction) -> Self {
        Self {
            position,
            direction,
            is_full: false,
        }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Sections, with head at the front
    pub sections: VecDeque<Section>,
    /// Current direction of movement
    pub direction: Direction,
    pub mouth_open: bool,
}

impl Snake {
    /// Create a new snake with given starting position and direction.
    /// Body sections trail behind the head and wrap onto the grid.
    pub fn new(
        head: Position,
        direction: Direction,
        length: usize,
        grid_width: usize,
        grid_height: usize,
    ) -> Self {
        let (dx, dy) = direction.delta();
        let sections = (0..length as i32)
            .map(|i| {
                let position = head.moved_by(-dx * i, -dy * i).wrapped(grid_width, grid_height);
                Section::new(position, direction)
            })
            .collect();

        Self {
            sections,
            direction,
            mouth_open: false,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.sections[0].position
    }

    /// Section right behind the head
    pub fn neck(&self) -> Option<Position> {
        self.sections.get(1).map(|s| s.position)
    }

    /// Get the tail section (last segment)
    pub fn tail(&self) -> &Section {
        &self.sections[self.sections.len() - 1]
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.sections.iter().map(|s| s.position)
    }

    /// Check if any section sits on `pos`
    pub fn overlaps(&self, pos: Position) -> bool {
        self.positions().any(|p| p == pos)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn overlaps_body(&self, pos: Position) -> bool {
        self.positions().skip(1).any(|p| p == pos)
    }

    /// Would a head moving onto `pos` hit the snake?
    ///
    /// An empty tail moves away during the same advance, so its cell is free.
    pub fn would_collide(&self, pos: Position) -> bool {
        let keep = if self.tail().is_full {
            self.len()
        } else {
            self.len() - 1
        };
        self.positions().take(keep).any(|p| p == pos)
    }

    /// Push a new head at `new_head`. The tail is dropped unless it is full,
    /// in which case it stays and empties: the snake grows by one.
    pub fn advance(&mut self, new_head: Position) {
        let last = self.sections.len() - 1;
        if self.sections[last].is_full {
            self.sections[last].is_full = false;
        } else {
            self.sections.pop_back();
        }

        self.sections.push_front(Section::new(new_head, self.direction));
        if let Some(neck) = self.sections.get_mut(1) {
            neck.direction = self.direction;
        }
    }

    /// Swallow whatever is at the head
    pub fn eat(&mut self) {
        self.open_mouth();
        self.sections[0].is_full = true;
    }

    pub fn open_mouth(&mut self) {
        self.mouth_open = true;
    }

    pub fn close_mouth(&mut self) {
        self.mouth_open = false;
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Critter shown for a bonus; only changes the sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusKind {
    Mouse,
    Spider,
    Fish,
    Lizard,
}

impl BonusKind {
    pub const ALL: [BonusKind; 4] = [
        BonusKind::Mouse,
        BonusKind::Spider,
        BonusKind::Fish,
        BonusKind::Lizard,
    ];
}

/// A short-lived bonus two cells wide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bonus {
    /// Left cell; the bonus also covers the cell to its right
    pub position: Position,
    /// Ticks left; also the points multiplier when eaten
    pub timer: u32,
    pub kind: BonusKind,
}

impl Bonus {
    pub fn cells(&self) -> [Position; 2] {
        [
            self.position,
            self.position.moved_in_direction(Direction::Right),
        ]
    }

    pub fn overlaps(&self, pos: Position) -> bool {
        self.cells().contains(&pos)
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub bonus: Option<Bonus>,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    pub is_alive: bool,
    pub is_paused: bool,
    /// No free cell was left for the food
    pub is_won: bool,
    /// Turns not yet applied, oldest first
    pub direction_buffer: VecDeque<Direction>,
    /// Foods still to eat before the next bonus shows up
    pub bonus_countdown: u32,
}

impl GameState {
    /// Create a new running game state
    pub fn new(snake: Snake, food: Position, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            food,
            bonus: None,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            is_alive: true,
            is_paused: false,
            is_won: false,
            direction_buffer: VecDeque::new(),
            bonus_countdown: 0,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.overlaps(pos)
    }

    /// In bounds and not covered by the snake or the bonus
    pub fn is_free(&self, pos: Position) -> bool {
        self.is_in_bounds(pos)
            && !self.is_occupied_by_snake(pos)
            && !self.bonus.is_some_and(|b| b.overlaps(pos))
    }

    pub fn is_over(&self) -> bool {
        !self.is_alive || self.is_won
    }
}
