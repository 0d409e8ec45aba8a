use super::canvas::{Layer, PixelCanvas};
use crate::game::{GameState, Position};
use crate::sprites::{self, snake_sprites};

/// Digits shown for the score
const SCORE_DIGITS: usize = 4;
/// Digits shown for the bonus timer
const BONUS_DIGITS: usize = 2;

/// Draw the frame, HUD and every sprite of `state` onto a fresh canvas
pub fn compose(state: &GameState) -> PixelCanvas {
    let mut canvas = PixelCanvas::for_grid(state.grid_width, state.grid_height);
    canvas.draw_borders();

    for (i, digit) in sprites::digit_sprites(state.score, SCORE_DIGITS)
        .iter()
        .enumerate()
    {
        canvas.draw_sprite(digit, Position::new(i as i32, 0), Layer::Hud, (0, 0));
    }

    if !state.is_won {
        canvas.draw_sprite(&sprites::food(), state.food, Layer::Level, (0, 0));
    }

    for sprite in snake_sprites(&state.snake) {
        canvas.draw_sprite(&sprite.bitmap, sprite.position, Layer::Level, (0, 0));
    }

    if let Some(bonus) = state.bonus {
        let bitmap = sprites::bonus(bonus.kind);
        canvas.draw_sprite(&bitmap, bonus.position, Layer::Level, (0, 0));

        // Critter icon and its countdown in the top-right corner of the HUD
        let width = state.grid_width as i32;
        canvas.draw_sprite(&bitmap, Position::new(width - 4, 0), Layer::Hud, (2, 1));
        for (i, digit) in sprites::digit_sprites(bonus.timer, BONUS_DIGITS)
            .iter()
            .enumerate()
        {
            let slot = Position::new(width - 2 + i as i32, 0);
            canvas.draw_sprite(digit, slot, Layer::Hud, (2, 0));
        }
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Bonus, BonusKind, Direction, Snake};
    use crate::render::canvas::{HUD_BAR, SCREEN_BORDER};

    fn state() -> GameState {
        let snake = Snake::new(Position::new(10, 4), Direction::Right, 7, 20, 9);
        GameState::new(snake, Position::new(2, 2), 20, 9)
    }

    /// Lit pixels inside one level cell
    fn cell_pixels(canvas: &PixelCanvas, cell: Position) -> usize {
        let x0 = SCREEN_BORDER + cell.x as usize * 4;
        let y0 = SCREEN_BORDER + HUD_BAR + cell.y as usize * 4;
        (0..4)
            .flat_map(|dy| (0..4).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| canvas.get(x0 + dx, y0 + dy))
            .count()
    }

    #[test]
    fn test_food_and_snake_drawn() {
        let canvas = compose(&state());

        assert_eq!(cell_pixels(&canvas, Position::new(2, 2)), 4);
        assert!(cell_pixels(&canvas, Position::new(10, 4)) > 0);
        assert!(cell_pixels(&canvas, Position::new(4, 4)) > 0);
        assert_eq!(cell_pixels(&canvas, Position::new(15, 7)), 0);
    }

    #[test]
    fn test_score_changes_hud() {
        let mut scored = state();
        scored.score = 1234;
        assert_ne!(compose(&state()), compose(&scored));
    }

    #[test]
    fn test_bonus_drawn_on_level_and_hud() {
        let plain = compose(&state());

        let mut with_bonus = state();
        with_bonus.bonus = Some(Bonus {
            position: Position::new(14, 7),
            timer: 9,
            kind: BonusKind::Lizard,
        });
        let canvas = compose(&with_bonus);

        assert!(cell_pixels(&canvas, Position::new(14, 7)) > 0);
        assert!(cell_pixels(&canvas, Position::new(15, 7)) > 0);
        // HUD gained the icon and two digits
        assert!(canvas.lit_count() > plain.lit_count() + 2 * 11);
    }
}
