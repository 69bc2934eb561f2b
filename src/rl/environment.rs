use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::observation::{Observation, create_observation};
use super::reward::{RewardConfig, RewardShaper};
use crate::game::{Action, GameConfig, GameEngine, GameState};

/// Configuration for the environment adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Episodes end after this many steps even if the player survives
    pub max_episode_steps: u32,
    pub reward: RewardConfig,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            max_episode_steps: 1000,
            reward: RewardConfig::default(),
        }
    }
}

/// Per-step diagnostics handed back alongside the reward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDiagnostics {
    /// Farthest column reached this episode, in tiles
    pub distance: i32,
    pub health: u32,
    pub took_damage: bool,
}

/// Platformer environment for reinforcement learning
///
/// Wraps the game engine behind a reset/step/observe interface:
/// - 8-dimensional observation vector
/// - discrete action space (0=idle, 1=left, 2=right, 3=jump)
/// - shaped scalar rewards with a terminal death penalty
///
/// One environment instance belongs to one caller; there is no internal
/// concurrency or shared state across instances.
pub struct PlatformerEnvironment {
    engine: GameEngine,
    state: GameState,
    shaper: RewardShaper,
    config: EnvConfig,
    steps: u32,
}

impl PlatformerEnvironment {
    /// Create a new environment
    pub fn new(game_config: GameConfig, config: EnvConfig) -> Result<Self> {
        let mut engine = GameEngine::new(game_config)?;
        let state = engine.reset()?;
        let mut shaper = RewardShaper::new(config.reward.clone());
        shaper.reset(&state);
        Ok(Self {
            engine,
            state,
            shaper,
            config,
            steps: 0,
        })
    }

    /// Start a fresh episode and return its initial observation
    pub fn reset(&mut self) -> Result<Observation> {
        self.state = self.engine.reset()?;
        self.shaper.reset(&self.state);
        self.steps = 0;
        Ok(self.observation())
    }

    /// Step the environment with a discrete action index
    ///
    /// The action is translated into exactly one tick's worth of input (the
    /// jump action arrives as a press edge). Out-of-range indices are an
    /// error. Returns `(observation, reward, done, diagnostics)`; `done` is
    /// raised on game over or once the step horizon is exhausted.
    pub fn step(&mut self, action_index: usize) -> Result<(Observation, f32, bool, StepDiagnostics)> {
        let action = Action::from_index(action_index)?;
        let result = self.engine.step(&mut self.state, action.into())?;
        self.steps += 1;

        let died = result.terminated;
        let reward = self.shaper.score(&self.state, &result.info, died);
        let done = died || self.steps >= self.config.max_episode_steps;

        let diagnostics = StepDiagnostics {
            distance: self.state.max_distance,
            health: self.state.player.health,
            took_damage: result.info.took_damage,
        };

        Ok((self.observation(), reward, done, diagnostics))
    }

    /// Current observation without stepping
    pub fn observation(&self) -> Observation {
        create_observation(&self.state, self.engine.config())
    }

    /// Reference to the underlying game state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Steps taken in the current episode
    pub fn steps(&self) -> u32 {
        self.steps
    }
}
