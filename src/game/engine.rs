use std::time::Instant;

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::action::Intent;
use super::config::GameConfig;
use super::level::{ensure_starting_platforms, generate_chunk};
use super::player::Player;
use super::state::GameState;

/// Spawn position in world pixels
const SPAWN_X: i32 = 100;
const SPAWN_Y: i32 = 100;

/// How close to the right edge of generated terrain the player may get, in
/// columns, before the next chunk is appended
const EXTENSION_MARGIN: i32 = 10;

/// Information about a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepInfo {
    /// The player took a point of damage this tick
    pub took_damage: bool,
    /// The player fell below the playfield and respawned this tick
    pub fell_out: bool,
}

/// Result of one simulation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the game has ended
    pub terminated: bool,
    pub info: StepInfo,
}

/// The game engine that advances the simulation
///
/// Owns the configuration and the RNG. With `GameConfig::seed` set, terrain
/// is fully reproducible across runs.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new engine, validating the configuration up front
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh world: chunk zero, the guaranteed spawn run, and the
    /// player at the spawn point
    pub fn reset(&mut self) -> Result<GameState> {
        let mut chunk = generate_chunk(
            &mut self.rng,
            0,
            self.config.chunk_height,
            self.config.chunk_width,
            self.config.difficulty,
            self.config.tile_size,
        )?;
        ensure_starting_platforms(&mut chunk.tiles, &self.config);

        let player = Player::new(SPAWN_X, SPAWN_Y, &self.config);
        Ok(GameState::new(chunk.tiles, chunk.obstacles, player))
    }

    /// Advance the simulation by one tick
    ///
    /// Applies the intent to the player, extends terrain when the player
    /// nears the generated edge, updates the distance counter and camera,
    /// and raises `game_over` when health is exhausted. Stepping a finished
    /// state is a no-op.
    pub fn step(&mut self, state: &mut GameState, intent: Intent) -> Result<StepResult> {
        if state.game_over {
            return Ok(StepResult {
                terminated: true,
                info: StepInfo::default(),
            });
        }

        let now = Instant::now();
        let events = state
            .player
            .update(intent, &state.tiles, &state.obstacles, &self.config, now);

        // Append a chunk when the player closes in on the generated edge
        let right_edge = (state.generated_chunks * self.config.chunk_width - EXTENSION_MARGIN)
            * self.config.tile_size;
        if state.player.rect.right() > right_edge {
            let chunk = generate_chunk(
                &mut self.rng,
                state.generated_chunks * self.config.chunk_width,
                self.config.chunk_height,
                self.config.chunk_width,
                self.config.difficulty,
                self.config.tile_size,
            )?;
            state.tiles.extend(chunk.tiles);
            state.obstacles.extend(chunk.obstacles);
            state.generated_chunks += 1;
        }

        let distance = state.player.rect.x.div_euclid(self.config.tile_size);
        state.max_distance = state.max_distance.max(distance);

        // Camera follows the player but never shows area left of the origin
        state.scroll_x = (-(state.player.rect.x - self.config.viewport_width / 2)).min(0);

        if state.player.rect.top() > self.config.viewport_height || state.player.health == 0 {
            state.game_over = true;
        }

        Ok(StepResult {
            terminated: state.game_over,
            info: StepInfo {
                took_damage: events.took_damage,
                fell_out: events.fell_out,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Horizontal;
    use crate::game::entities::Obstacle;

    fn seeded_engine(seed: u64) -> GameEngine {
        GameEngine::new(GameConfig::seeded(seed)).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameConfig::default();
        config.chunk_height = 2;
        assert!(GameEngine::new(config).is_err());
    }

    #[test]
    fn test_reset() {
        let mut engine = seeded_engine(1);
        let state = engine.reset().unwrap();

        assert!(!state.game_over);
        assert_eq!(state.player.health, 3);
        assert_eq!(state.player.rect.x, 100);
        assert_eq!(state.player.rect.y, 100);
        assert_eq!(state.generated_chunks, 1);

        // The spawn run is always present
        let cells: Vec<_> = state.tiles.iter().map(|t| t.cell(40)).collect();
        for col in 0..5 {
            assert!(cells.contains(&(col, 12)));
        }
    }

    #[test]
    fn test_seeded_reset_is_deterministic() {
        let first = seeded_engine(99).reset().unwrap();
        let second = seeded_engine(99).reset().unwrap();
        assert_eq!(first.tiles, second.tiles);
        assert_eq!(first.obstacles, second.obstacles);
    }

    #[test]
    fn test_scroll_follows_player_and_clamps() {
        let mut engine = seeded_engine(2);
        let mut state = engine.reset().unwrap();

        // Near the origin the camera stays put
        engine.step(&mut state, Intent::idle()).unwrap();
        assert_eq!(state.scroll_x, 0);

        // Far to the right the camera centers on the player
        state.player.rect.x = 2000;
        engine.step(&mut state, Intent::idle()).unwrap();
        assert_eq!(state.scroll_x, -(state.player.rect.x - 400));
        assert!(state.scroll_x <= 0);
    }

    #[test]
    fn test_terrain_extends_ahead_of_player() {
        let mut engine = seeded_engine(3);
        let mut state = engine.reset().unwrap();
        let tiles_before = state.tiles.len();

        // Park the player past the extension margin of chunk zero
        state.player.rect.x = 25 * 40;
        engine.step(&mut state, Intent::idle()).unwrap();

        assert_eq!(state.generated_chunks, 2);
        assert!(state.tiles.len() > tiles_before);
        assert!(
            state
                .tiles
                .iter()
                .any(|t| { (30..60).contains(&t.cell(40).0) }),
            "no tiles in the second chunk's column range"
        );
    }

    #[test]
    fn test_max_distance_is_monotone() {
        let mut engine = seeded_engine(4);
        let mut state = engine.reset().unwrap();

        let mut previous = state.max_distance;
        for _ in 0..50 {
            engine
                .step(
                    &mut state,
                    Intent {
                        horizontal: Horizontal::Right,
                        jump: false,
                    },
                )
                .unwrap();
            assert!(state.max_distance >= previous);
            previous = state.max_distance;
            if state.game_over {
                break;
            }
        }
    }

    #[test]
    fn test_game_over_on_health_exhausted() {
        let mut engine = seeded_engine(5);
        let mut state = engine.reset().unwrap();
        state.player.health = 1;
        // Obstacle overlapping the space directly under the falling player
        state.obstacles.push(Obstacle::at_cell(2, 3, 40));

        let result = engine.step(&mut state, Intent::idle()).unwrap();

        assert!(result.info.took_damage);
        assert!(result.terminated);
        assert!(state.game_over);
        assert_eq!(state.player.health, 0);
    }

    #[test]
    fn test_step_on_finished_state_is_noop() {
        let mut engine = seeded_engine(6);
        let mut state = engine.reset().unwrap();
        state.game_over = true;
        let position_before = state.player.rect;

        let result = engine.step(&mut state, Intent::idle()).unwrap();

        assert!(result.terminated);
        assert_eq!(result.info, StepInfo::default());
        assert_eq!(state.player.rect, position_before);
    }
}
