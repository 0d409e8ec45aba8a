//! Picks and orients the sprite for every section of the snake

use super::{
    Bitmap, PlacedSprite, SNAKE_BODY, SNAKE_FULL, SNAKE_HEAD, SNAKE_MOUTH, SNAKE_TAIL, SNAKE_TURN,
};
use crate::game::{Direction, Section, Snake};

/// Sprites for the whole snake: head first, then body, tail last
pub fn snake_sprites(snake: &Snake) -> Vec<PlacedSprite> {
    let mut sprites = Vec::with_capacity(snake.len());
    sprites.push(head_sprite(snake));

    let sections = &snake.sections;
    for i in 1..sections.len().saturating_sub(1) {
        sprites.push(body_sprite(&sections[i], sections[i + 1].direction));
    }

    sprites.push(tail_sprite(snake.tail()));
    sprites
}

fn head_sprite(snake: &Snake) -> PlacedSprite {
    let head = &snake.sections[0];
    let tile = if snake.mouth_open {
        &SNAKE_MOUTH
    } else {
        &SNAKE_HEAD
    };
    PlacedSprite::new(oriented(tile, head.direction), head.position)
}

fn tail_sprite(tail: &Section) -> PlacedSprite {
    let tile = if tail.is_full { &SNAKE_FULL } else { &SNAKE_TAIL };
    PlacedSprite::new(oriented(tile, tail.direction), tail.position)
}

/// `behind` is the direction of the section one step closer to the tail
fn body_sprite(section: &Section, behind: Direction) -> PlacedSprite {
    if section.direction == behind || section.is_full {
        let tile = if section.is_full {
            &SNAKE_FULL
        } else {
            &SNAKE_BODY
        };
        return PlacedSprite::new(oriented(tile, section.direction), section.position);
    }

    // The turn tile joins its right and bottom edges; a left turn needs it
    // rotated one more quarter
    let facing = if behind.rotated_left() == section.direction {
        section.direction.rotated_left()
    } else {
        section.direction
    };
    PlacedSprite::new(
        Bitmap::from_rows(&SNAKE_TURN).facing(facing),
        section.position,
    )
}

/// Rotate to `direction`, then mirror the way the Nokia phone drew
/// left- and down-facing pieces
fn oriented(tile: &[[u8; 4]; 4], direction: Direction) -> Bitmap {
    let bitmap = Bitmap::from_rows(tile).facing(direction);
    match direction {
        Direction::Left => bitmap.flipped_vertical(),
        Direction::Down => bitmap.flipped_horizontal(),
        Direction::Up | Direction::Right => bitmap,
    }
}
