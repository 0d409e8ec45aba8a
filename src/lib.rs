//! Nokia Snake - the classic phone game in the terminal
//!
//! This library provides:
//! - Core game logic: grid, snake, food, bonus and collisions (game module)
//! - Bitmap sprites and the snake orientation rules (sprites module)
//! - Pixel canvas and TUI rendering (render module)
//! - Keyboard and mouse mapping (input module)
//! - Session statistics (metrics module)
//! - The interactive terminal session (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod sprites;
