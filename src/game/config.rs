use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Visible playfield width in pixels
    pub viewport_width: i32,
    /// Visible playfield height in pixels
    pub viewport_height: i32,
    /// Side length of one terrain cell in pixels
    pub tile_size: i32,
    /// Width of one generated chunk in cells
    pub chunk_width: i32,
    /// Height of one generated chunk in cells
    pub chunk_height: i32,
    /// Terrain difficulty scalar (density, height variation, obstacle rate)
    pub difficulty: f32,

    // Physics
    /// Horizontal speed in pixels per tick
    pub move_speed: i32,
    /// Vertical velocity applied on a jump edge (negative = up)
    pub jump_velocity: i32,
    /// Gravity in pixels per tick per tick
    pub gravity: i32,
    /// Terminal fall speed in pixels per tick
    pub max_fall_speed: i32,

    // Player
    /// Maximum (and starting) health
    pub max_health: u32,
    /// Number of jumps permitted before landing again
    pub max_jump_count: u32,
    /// Post-damage window during which further damage is suppressed
    pub invincibility: Duration,
    /// Debug bypass for damage and fall-death
    pub god_mode: bool,

    /// RNG seed for reproducible terrain; entropy-seeded when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800,
            viewport_height: 600,
            tile_size: 40,
            chunk_width: 30,
            chunk_height: 15,
            difficulty: 1.0,
            move_speed: 5,
            jump_velocity: -15,
            gravity: 1,
            max_fall_speed: 10,
            max_health: 3,
            max_jump_count: 2,
            invincibility: Duration::from_millis(1000),
            god_mode: false,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom difficulty
    pub fn with_difficulty(difficulty: f32) -> Self {
        Self {
            difficulty,
            ..Default::default()
        }
    }

    /// Create a seeded configuration for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Check that the configuration can produce a well-formed world
    pub fn validate(&self) -> Result<()> {
        ensure!(self.chunk_width > 0, "chunk width must be positive");
        ensure!(
            self.chunk_height > 2,
            "chunk height must exceed 2 to leave room for the anchor band"
        );
        ensure!(self.tile_size > 0, "tile size must be positive");
        ensure!(
            self.viewport_width > 0 && self.viewport_height > 0,
            "viewport dimensions must be positive"
        );
        ensure!(self.max_health > 0, "max health must be positive");
        ensure!(self.max_jump_count > 0, "max jump count must be positive");
        ensure!(self.max_fall_speed > 0, "terminal fall speed must be positive");
        Ok(())
    }

    /// Row index of the guaranteed spawn platforms
    pub fn spawn_row(&self) -> i32 {
        self.viewport_height / self.tile_size - 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.viewport_width, 800);
        assert_eq!(config.viewport_height, 600);
        assert_eq!(config.tile_size, 40);
        assert_eq!(config.chunk_width, 30);
        assert_eq!(config.chunk_height, 15);
        assert_eq!(config.max_health, 3);
        assert_eq!(config.max_jump_count, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_spawn_row() {
        let config = GameConfig::default();
        assert_eq!(config.spawn_row(), 12);
    }

    #[test]
    fn test_degenerate_dimensions_rejected() {
        let mut config = GameConfig::default();
        config.chunk_width = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.chunk_height = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_seeded_config() {
        let config = GameConfig::seeded(42);
        assert_eq!(config.seed, Some(42));
        assert!(config.validate().is_ok());
    }
}
