//! Monochrome "fake pixel" buffer laid out like the Nokia screen
//!
//! ```text
//!   score digits           bonus + timer    <- HUD bar
//!  ============================================
//!  ============================================
//!  |                                          |
//!  |               level                      |
//!  |                                          |
//!  ============================================
//! ```

use crate::game::Position;
use crate::sprites::{Bitmap, DIGIT_HEIGHT, DIGIT_WIDTH, SPRITE_SIZE};

/// Empty pixels around the frame
pub const SCREEN_BORDER: usize = 3;
/// Height of the HUD bar above the level
pub const HUD_BAR: usize = 3 + DIGIT_HEIGHT;

/// Where a sprite position is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Grid cells of the level, `SPRITE_SIZE` pixels each
    Level,
    /// Digit slots of the HUD bar
    Hud,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCanvas {
    width: usize,
    height: usize,
    level_width: usize,
    level_height: usize,
    pixels: Vec<bool>,
}

impl PixelCanvas {
    /// Canvas for a grid of `grid_width` x `grid_height` sprites
    pub fn for_grid(grid_width: usize, grid_height: usize) -> Self {
        let level_width = grid_width * SPRITE_SIZE;
        let level_height = grid_height * SPRITE_SIZE;
        let width = level_width + 2 * SCREEN_BORDER;
        let height = level_height + 2 * SCREEN_BORDER + HUD_BAR;

        Self {
            width,
            height,
            level_width,
            level_height,
            pixels: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Level size in pixels
    pub fn level_size(&self) -> (usize, usize) {
        (self.level_width, self.level_height)
    }

    /// Pixels outside the canvas are ignored
    pub fn set(&mut self, x: i32, y: i32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = true;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.pixels[y * self.width + x]
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    /// Draw `bitmap` at a level cell or HUD slot, shifted by `offset` pixels
    pub fn draw_sprite(
        &mut self,
        bitmap: &Bitmap,
        position: Position,
        layer: Layer,
        offset: (i32, i32),
    ) {
        let border = SCREEN_BORDER as i32;
        let (origin_x, origin_y) = match layer {
            Layer::Level => (
                position.x * SPRITE_SIZE as i32 + border,
                position.y * SPRITE_SIZE as i32 + border + HUD_BAR as i32,
            ),
            Layer::Hud => (
                position.x * DIGIT_WIDTH as i32 + border - 2,
                position.y * DIGIT_HEIGHT as i32 + border - 2,
            ),
        };

        for (x, y) in bitmap.pixels() {
            self.set(
                origin_x + offset.0 + x as i32,
                origin_y + offset.1 + y as i32,
            );
        }
    }

    /// The frame: a double rule under the HUD, a bottom rule and two sides,
    /// each one pixel away from the level
    pub fn draw_borders(&mut self) {
        let border = SCREEN_BORDER as i32;
        let hud = HUD_BAR as i32;
        let level_width = self.level_width as i32;
        let level_height = self.level_height as i32;

        for x in border - 2..level_width + border + 2 {
            self.set(x, border + hud - 4);
            self.set(x, border + hud - 2);
            self.set(x, border + hud + level_height + 1);
        }
        for y in border + hud - 1..border + hud + level_height + 1 {
            self.set(border - 2, y);
            self.set(level_width + border + 1, y);
        }
    }

    /// Two pixel rows per text row using half-block characters
    pub fn to_half_block_lines(&self) -> Vec<String> {
        (0..self.height)
            .step_by(2)
            .map(|y| {
                (0..self.width)
                    .map(|x| match (self.get(x, y), self.get(x, y + 1)) {
                        (true, true) => '█',
                        (true, false) => '▀',
                        (false, true) => '▄',
                        (false, false) => ' ',
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprites::{FOOD, food};

    #[test]
    fn test_canvas_dimensions() {
        let canvas = PixelCanvas::for_grid(20, 9);
        assert_eq!(canvas.width(), 86);
        assert_eq!(canvas.height(), 50);
        assert_eq!(canvas.level_size(), (80, 36));
        assert_eq!(canvas.lit_count(), 0);
    }

    #[test]
    fn test_set_ignores_out_of_range() {
        let mut canvas = PixelCanvas::for_grid(2, 2);
        canvas.set(-1, 0);
        canvas.set(0, -1);
        canvas.set(canvas.width() as i32, 0);
        assert_eq!(canvas.lit_count(), 0);

        canvas.set(1, 1);
        assert!(canvas.get(1, 1));
    }

    #[test]
    fn test_level_sprite_origin() {
        let mut canvas = PixelCanvas::for_grid(20, 9);
        canvas.draw_sprite(&food(), Position::new(0, 0), Layer::Level, (0, 0));

        // FOOD has its first pixel at (1, 0)
        assert!(canvas.get(SCREEN_BORDER + 1, SCREEN_BORDER + HUD_BAR));
        assert_eq!(canvas.lit_count(), 4);

        let mut shifted = PixelCanvas::for_grid(20, 9);
        shifted.draw_sprite(&food(), Position::new(2, 1), Layer::Level, (0, 0));
        assert!(shifted.get(SCREEN_BORDER + 8 + 1, SCREEN_BORDER + HUD_BAR + 4));
    }

    #[test]
    fn test_hud_sprite_origin() {
        let mut canvas = PixelCanvas::for_grid(20, 9);
        let bitmap = Bitmap::from_rows(&FOOD);
        canvas.draw_sprite(&bitmap, Position::new(1, 0), Layer::Hud, (2, 1));
        assert!(canvas.get(4 + 1 + 1 + 2, 1 + 1));
    }

    #[test]
    fn test_borders_frame_the_level() {
        let mut canvas = PixelCanvas::for_grid(20, 9);
        canvas.draw_borders();

        let top = SCREEN_BORDER + HUD_BAR - 2;
        let bottom = SCREEN_BORDER + HUD_BAR + 36 + 1;
        assert!(canvas.get(1, top));
        assert!(canvas.get(84, top));
        assert!(canvas.get(40, SCREEN_BORDER + HUD_BAR - 4));
        assert!(canvas.get(40, bottom));
        assert!(canvas.get(1, 20));
        assert!(canvas.get(84, 20));

        // The level itself stays blank
        assert!(!canvas.get(SCREEN_BORDER, SCREEN_BORDER + HUD_BAR));
        assert!(!canvas.get(2, 20));
    }

    #[test]
    fn test_half_block_lines() {
        let mut canvas = PixelCanvas::for_grid(1, 1);
        canvas.set(0, 0);
        canvas.set(1, 1);
        canvas.set(2, 0);
        canvas.set(2, 1);

        let lines = canvas.to_half_block_lines();
        assert_eq!(lines.len(), canvas.height() / 2);
        let first: Vec<char> = lines[0].chars().collect();
        assert_eq!(first.len(), canvas.width());
        assert_eq!(&first[..4], &['▀', '▄', '█', ' ']);
    }
}
