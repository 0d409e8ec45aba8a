//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The snake is a deque of sections: every tick the head advances, and the tail
//! is dropped unless it carries swallowed food.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use state::{Bonus, BonusKind, CollisionType, GameState, Position, Section, Snake};
