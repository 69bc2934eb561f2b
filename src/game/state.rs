use std::time::{Duration, Instant};

use super::entities::{Obstacle, Tile};
use super::player::Player;

/// Complete simulation state
///
/// Tiles and obstacles are plain ordered vectors, appended to as chunks are
/// generated and never removed. Iteration order is insertion order; nothing
/// depends on it semantically.
#[derive(Debug, Clone)]
pub struct GameState {
    pub tiles: Vec<Tile>,
    pub obstacles: Vec<Obstacle>,
    pub player: Player,
    /// Horizontal camera shift; never positive, so the view never goes left
    /// of the origin
    pub scroll_x: i32,
    /// Farthest column the player has reached, in tiles
    pub max_distance: i32,
    /// Number of chunks generated so far
    pub generated_chunks: i32,
    pub game_over: bool,
    started_at: Instant,
}

impl GameState {
    pub fn new(tiles: Vec<Tile>, obstacles: Vec<Obstacle>, player: Player) -> Self {
        Self {
            tiles,
            obstacles,
            player,
            scroll_x: 0,
            max_distance: 0,
            generated_chunks: 1,
            game_over: false,
            started_at: Instant::now(),
        }
    }

    /// Wall-clock time since this episode started
    pub fn survival_time(&self) -> Duration {
        self.started_at.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::GameConfig;

    #[test]
    fn test_new_state() {
        let config = GameConfig::default();
        let state = GameState::new(
            vec![Tile::at_cell(0, 12, 40)],
            Vec::new(),
            Player::new(100, 100, &config),
        );

        assert_eq!(state.scroll_x, 0);
        assert_eq!(state.max_distance, 0);
        assert_eq!(state.generated_chunks, 1);
        assert!(!state.game_over);
        assert_eq!(state.tiles.len(), 1);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_survival_time_advances() {
        let config = GameConfig::default();
        let state = GameState::new(Vec::new(), Vec::new(), Player::new(0, 0, &config));
        std::thread::sleep(Duration::from_millis(10));
        assert!(state.survival_time() >= Duration::from_millis(10));
    }
}
