use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest grid side accepted, in sprites
pub const MAX_GRID_SIDE: usize = 1000;
/// Slowest accepted game, in milliseconds per move
pub const MAX_TICK_MS: u64 = 10_000;
/// The HUD shows the bonus timer with two digits
pub const MAX_BONUS_LIFETIME: u32 = 99;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid, in sprites
    pub grid_width: usize,
    /// Height of the game grid, in sprites
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Milliseconds between game updates
    pub tick_ms: u64,
    /// Leaving the grid wraps to the opposite edge instead of killing the snake
    pub wrap_around: bool,
    /// Bonus critters show up every few foods
    pub bonus_enabled: bool,
    /// Ticks a bonus stays on the grid before it vanishes
    pub bonus_lifetime: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 9,
            initial_snake_length: 7,
            tick_ms: 200,
            wrap_around: true,
            bonus_enabled: true,
            bonus_lifetime: 20,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self {
            initial_snake_length: 3,
            ..Self::new(10, 10)
        }
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Points for one food. A faster game pays less per food.
    pub fn points_per_food(&self) -> u32 {
        u32::try_from(self.tick_ms / 100)
            .unwrap_or(u32::MAX)
            .max(1)
    }

    /// Reject configurations the game cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.grid_width < 2 {
            bail!("grid width must be at least 2, got {}", self.grid_width);
        }
        if self.grid_height < 1 {
            bail!("grid height must be at least 1, got {}", self.grid_height);
        }
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            bail!(
                "grid {}x{} is larger than {} per side",
                self.grid_width,
                self.grid_height,
                MAX_GRID_SIDE
            );
        }
        if self.initial_snake_length < 2 {
            bail!(
                "initial snake length must be at least 2, got {}",
                self.initial_snake_length
            );
        }
        let max_length = self.grid_width / 2 + 1;
        if self.initial_snake_length > max_length {
            bail!(
                "initial snake length {} does not fit a grid {} wide (max {})",
                self.initial_snake_length,
                self.grid_width,
                max_length
            );
        }
        if self.tick_ms == 0 {
            bail!("tick interval must be greater than zero");
        }
        if self.tick_ms > MAX_TICK_MS {
            bail!(
                "tick interval {}ms is above the {}ms maximum",
                self.tick_ms,
                MAX_TICK_MS
            );
        }
        if self.bonus_lifetime > MAX_BONUS_LIFETIME {
            bail!(
                "bonus lifetime {} does not fit the two-digit timer (max {})",
                self.bonus_lifetime,
                MAX_BONUS_LIFETIME
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 9);
        assert_eq!(config.initial_snake_length, 7);
        assert!(config.wrap_around);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 15);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 15);
        assert_eq!(config.tick_ms, 200);
    }

    #[test]
    fn test_points_per_food() {
        let mut config = GameConfig::default();
        assert_eq!(config.points_per_food(), 2);

        config.tick_ms = 450;
        assert_eq!(config.points_per_food(), 4);

        config.tick_ms = 50;
        assert_eq!(config.points_per_food(), 1);

        config.tick_ms = u64::MAX;
        assert_eq!(config.points_per_food(), u32::MAX);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(GameConfig::new(1, 9).validate().is_err());
        assert!(GameConfig::new(20, 0).validate().is_err());

        let mut config = GameConfig::default();
        config.initial_snake_length = 1;
        assert!(config.validate().is_err());

        config.initial_snake_length = 12;
        assert!(config.validate().is_err());

        config.initial_snake_length = 11;
        assert!(config.validate().is_ok());

        config.tick_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_values() {
        assert!(GameConfig::new(MAX_GRID_SIDE + 1, 9).validate().is_err());
        assert!(GameConfig::new(20, MAX_GRID_SIDE + 1).validate().is_err());

        let mut config = GameConfig::default();
        config.tick_ms = MAX_TICK_MS;
        assert!(config.validate().is_ok());
        config.tick_ms = MAX_TICK_MS + 1;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.bonus_lifetime = MAX_BONUS_LIFETIME;
        assert!(config.validate().is_ok());
        config.bonus_lifetime = MAX_BONUS_LIFETIME + 1;
        assert!(config.validate().is_err());
        config.bonus_lifetime = u32::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_loaded_huge_lifetime_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "bonus_lifetime": 4294967295 }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_width": 30, "wrap_around": false }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.grid_width, 30);
        assert!(!config.wrap_around);
        assert_eq!(config.grid_height, 9);
        assert_eq!(config.bonus_lifetime, 20);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(GameConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(GameConfig::load(&dir.path().join("nope.json")).is_err());
    }
}
