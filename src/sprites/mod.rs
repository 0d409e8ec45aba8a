//! Monochrome bitmap sprites in the style of the Nokia Snake
//!
//! Game sprites are drawn facing right and turned with [`Bitmap::facing`].
//! Rows run top to bottom, columns left to right.

pub mod snake;

use crate::game::{BonusKind, Direction, Position};

pub use snake::snake_sprites;

/// Side of a game sprite, in pixels
pub const SPRITE_SIZE: usize = 4;
/// Width of a HUD digit, in pixels
pub const DIGIT_WIDTH: usize = 4;
/// Height of a HUD digit, in pixels
pub const DIGIT_HEIGHT: usize = 5;

type Tile = [[u8; SPRITE_SIZE]; SPRITE_SIZE];
type Critter = [[u8; 2 * SPRITE_SIZE]; SPRITE_SIZE];
type Digit = [[u8; DIGIT_WIDTH]; DIGIT_HEIGHT];

pub const FOOD: Tile = [
    [0, 1, 0, 0],
    [1, 0, 1, 0],
    [0, 1, 0, 0],
    [0, 0, 0, 0],
];

pub const SNAKE_HEAD: Tile = [
    [1, 0, 0, 0],
    [0, 1, 1, 0],
    [1, 1, 1, 0],
    [0, 0, 0, 0],
];

pub const SNAKE_MOUTH: Tile = [
    [1, 0, 1, 0],
    [0, 1, 0, 0],
    [1, 1, 0, 0],
    [0, 0, 1, 0],
];

pub const SNAKE_BODY: Tile = [
    [0, 0, 0, 0],
    [1, 1, 0, 1],
    [1, 0, 1, 1],
    [0, 0, 0, 0],
];

pub const SNAKE_FULL: Tile = [
    [0, 1, 1, 0],
    [1, 1, 0, 1],
    [1, 0, 1, 1],
    [0, 1, 1, 0],
];

pub const SNAKE_TURN: Tile = [
    [0, 0, 0, 0],
    [0, 0, 1, 1],
    [0, 1, 0, 1],
    [0, 1, 1, 0],
];

pub const SNAKE_TAIL: Tile = [
    [0, 0, 0, 0],
    [0, 0, 0, 1],
    [0, 1, 1, 1],
    [0, 0, 0, 0],
];

pub const MOUSE: Critter = [
    [0, 0, 0, 0, 0, 1, 1, 0],
    [1, 0, 0, 1, 1, 1, 0, 1],
    [0, 1, 1, 1, 1, 1, 1, 1],
    [0, 0, 1, 0, 0, 1, 0, 0],
];

pub const SPIDER: Critter = [
    [1, 0, 1, 0, 0, 1, 0, 1],
    [0, 1, 1, 1, 1, 1, 1, 0],
    [0, 1, 1, 1, 1, 1, 1, 0],
    [1, 0, 1, 0, 0, 1, 0, 1],
];

pub const FISH: Critter = [
    [0, 0, 0, 1, 1, 1, 0, 0],
    [1, 0, 1, 1, 1, 0, 1, 0],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 1, 1, 1, 0, 0],
];

pub const LIZARD: Critter = [
    [0, 1, 0, 0, 0, 1, 0, 0],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [0, 0, 1, 1, 1, 1, 1, 0],
    [0, 1, 0, 0, 0, 1, 0, 0],
];

pub const DIGITS: [Digit; 10] = [
    [[1, 1, 1, 0], [1, 0, 1, 0], [1, 0, 1, 0], [1, 0, 1, 0], [1, 1, 1, 0]],
    [[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 1, 0]],
    [[1, 1, 1, 0], [0, 0, 1, 0], [1, 1, 1, 0], [1, 0, 0, 0], [1, 1, 1, 0]],
    [[1, 1, 1, 0], [0, 0, 1, 0], [0, 1, 1, 0], [0, 0, 1, 0], [1, 1, 1, 0]],
    [[1, 0, 1, 0], [1, 0, 1, 0], [1, 1, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]],
    [[1, 1, 1, 0], [1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0], [1, 1, 1, 0]],
    [[1, 1, 1, 0], [1, 0, 0, 0], [1, 1, 1, 0], [1, 0, 1, 0], [1, 1, 1, 0]],
    [[1, 1, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
    [[1, 1, 1, 0], [1, 0, 1, 0], [1, 1, 1, 0], [1, 0, 1, 0], [1, 1, 1, 0]],
    [[1, 1, 1, 0], [1, 0, 1, 0], [1, 1, 1, 0], [0, 0, 1, 0], [1, 1, 1, 0]],
];

/// A small monochrome image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    /// Row-major
    pixels: Vec<bool>,
}

impl Bitmap {
    pub fn from_rows<const W: usize, const H: usize>(rows: &[[u8; W]; H]) -> Self {
        Self {
            width: W,
            height: H,
            pixels: rows.iter().flatten().map(|&p| p != 0).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.pixels[y * self.width + x]
    }

    fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> bool) -> Self {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Quarter turn counter-clockwise; width and height swap
    pub fn rotated_ccw(&self) -> Self {
        Self::from_fn(self.height, self.width, |x, y| {
            self.get(self.width - 1 - y, x)
        })
    }

    /// Mirror left to right
    pub fn flipped_horizontal(&self) -> Self {
        Self::from_fn(self.width, self.height, |x, y| {
            self.get(self.width - 1 - x, y)
        })
    }

    /// Mirror top to bottom
    pub fn flipped_vertical(&self) -> Self {
        Self::from_fn(self.width, self.height, |x, y| {
            self.get(x, self.height - 1 - y)
        })
    }

    /// Turn a right-facing sprite to face `direction`
    pub fn facing(&self, direction: Direction) -> Self {
        let turns = match direction {
            Direction::Right => 0,
            Direction::Up => 1,
            Direction::Left => 2,
            Direction::Down => 3,
        };
        (0..turns).fold(self.clone(), |bitmap, _| bitmap.rotated_ccw())
    }

    /// Coordinates `(x, y)` of every set pixel
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .map(|(i, _)| (i % self.width, i / self.width))
    }
}

/// A sprite bound to a grid cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedSprite {
    pub bitmap: Bitmap,
    pub position: Position,
}

impl PlacedSprite {
    pub fn new(bitmap: Bitmap, position: Position) -> Self {
        Self { bitmap, position }
    }
}

pub fn food() -> Bitmap {
    Bitmap::from_rows(&FOOD)
}

pub fn bonus(kind: BonusKind) -> Bitmap {
    match kind {
        BonusKind::Mouse => Bitmap::from_rows(&MOUSE),
        BonusKind::Spider => Bitmap::from_rows(&SPIDER),
        BonusKind::Fish => Bitmap::from_rows(&FISH),
        BonusKind::Lizard => Bitmap::from_rows(&LIZARD),
    }
}

/// Sprites for the last `digits` decimal digits of `number`, zero-padded
pub fn digit_sprites(number: u32, digits: usize) -> Vec<Bitmap> {
    let text = format!("{:0width$}", number, width = digits);
    text[text.len() - digits..]
        .bytes()
        .map(|b| Bitmap::from_rows(&DIGITS[usize::from(b - b'0')]))
        .collect()
}
