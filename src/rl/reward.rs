//! Reward shaping for the environment adapter
//!
//! Forward progress dominates; small step and airtime penalties keep the
//! agent moving, damage is punished, and hazards passed without harm earn a
//! small bonus. The shaped total is clamped to [-1, 1]; death replaces it
//! with a fixed terminal penalty.

use serde::{Deserialize, Serialize};

use crate::game::{GameState, StepInfo};

/// Tunable reward shaping parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Reward per pixel of forward progress
    pub progress_scale: f32,
    /// Flat penalty applied every tick
    pub step_penalty: f32,
    /// Consecutive airborne ticks tolerated before the airtime penalty
    pub airtime_grace: u32,
    /// Penalty per airborne tick beyond the grace period
    pub airtime_penalty: f32,
    /// Penalty when a point of damage lands
    pub damage_penalty: f32,
    /// Bonus for being near an obstacle without taking damage
    pub proximity_bonus: f32,
    /// Center distance, in pixels, that counts as "near" an obstacle
    pub proximity_radius: i32,
    /// Reward replacing the shaped value on death
    pub terminal_penalty: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            progress_scale: 0.05,
            step_penalty: -0.01,
            airtime_grace: 30,
            airtime_penalty: -0.02,
            damage_penalty: -0.5,
            proximity_bonus: 0.05,
            proximity_radius: 80,
            terminal_penalty: -10.0,
        }
    }
}

/// Stateful reward computation across one episode
#[derive(Debug, Clone)]
pub struct RewardShaper {
    config: RewardConfig,
    prev_x: i32,
    airborne_ticks: u32,
}

impl RewardShaper {
    pub fn new(config: RewardConfig) -> Self {
        Self {
            config,
            prev_x: 0,
            airborne_ticks: 0,
        }
    }

    /// Re-anchor the shaper at the start of an episode
    pub fn reset(&mut self, state: &GameState) {
        self.prev_x = state.player.rect.x;
        self.airborne_ticks = 0;
    }

    /// Score the tick that just happened
    ///
    /// `died` selects the terminal penalty; it should be true for a game
    /// over, not for running out the step horizon.
    pub fn score(&mut self, state: &GameState, info: &StepInfo, died: bool) -> f32 {
        let progress = (state.player.rect.x - self.prev_x).max(0);
        self.prev_x = state.player.rect.x;

        let mut reward = progress as f32 * self.config.progress_scale + self.config.step_penalty;

        if state.player.on_ground {
            self.airborne_ticks = 0;
        } else {
            self.airborne_ticks += 1;
            if self.airborne_ticks > self.config.airtime_grace {
                reward += self.config.airtime_penalty;
            }
        }

        if info.took_damage {
            reward += self.config.damage_penalty;
        } else if self.near_obstacle(state) {
            reward += self.config.proximity_bonus;
        }

        reward = reward.clamp(-1.0, 1.0);

        if died {
            reward = self.config.terminal_penalty;
        }
        reward
    }

    fn near_obstacle(&self, state: &GameState) -> bool {
        let player = &state.player.rect;
        state.obstacles.iter().any(|obstacle| {
            (obstacle.rect.center_x() - player.center_x()).abs() <= self.config.proximity_radius
                && (obstacle.rect.center_y() - player.center_y()).abs()
                    <= self.config.proximity_radius
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameState, Obstacle, Player};

    fn grounded_state(x: i32) -> GameState {
        let config = GameConfig::default();
        let mut player = Player::new(x, 440, &config);
        player.on_ground = true;
        GameState::new(Vec::new(), Vec::new(), player)
    }

    fn shaper_at(x: i32) -> RewardShaper {
        let mut shaper = RewardShaper::new(RewardConfig::default());
        shaper.reset(&grounded_state(x));
        shaper
    }

    #[test]
    fn test_forward_progress_rewarded() {
        let mut shaper = shaper_at(100);
        let state = grounded_state(105);
        let reward = shaper.score(&state, &StepInfo::default(), false);
        assert!((reward - (5.0 * 0.05 - 0.01)).abs() < 1e-6);
    }

    #[test]
    fn test_backward_motion_earns_no_progress() {
        let mut shaper = shaper_at(100);
        let state = grounded_state(90);
        let reward = shaper.score(&state, &StepInfo::default(), false);
        assert!((reward - (-0.01)).abs() < 1e-6);
    }

    #[test]
    fn test_damage_penalty() {
        let mut shaper = shaper_at(100);
        let state = grounded_state(100);
        let info = StepInfo {
            took_damage: true,
            fell_out: false,
        };
        let reward = shaper.score(&state, &info, false);
        assert!((reward - (-0.01 - 0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_airtime_penalty_after_grace() {
        let mut shaper = shaper_at(100);
        let mut state = grounded_state(100);
        state.player.on_ground = false;

        // Inside the grace period: no airtime penalty
        for _ in 0..30 {
            let reward = shaper.score(&state, &StepInfo::default(), false);
            assert!((reward - (-0.01)).abs() < 1e-6);
        }
        // Beyond it: penalized
        let reward = shaper.score(&state, &StepInfo::default(), false);
        assert!((reward - (-0.01 - 0.02)).abs() < 1e-6);

        // Landing resets the counter
        state.player.on_ground = true;
        shaper.score(&state, &StepInfo::default(), false);
        state.player.on_ground = false;
        let reward = shaper.score(&state, &StepInfo::default(), false);
        assert!((reward - (-0.01)).abs() < 1e-6);
    }

    #[test]
    fn test_proximity_bonus_only_without_damage() {
        let mut shaper = shaper_at(100);
        let mut state = grounded_state(100);
        // Obstacle one cell to the player's right
        state.obstacles.push(Obstacle::at_cell(4, 11, 40));

        let reward = shaper.score(&state, &StepInfo::default(), false);
        assert!((reward - (-0.01 + 0.05)).abs() < 1e-6);

        let info = StepInfo {
            took_damage: true,
            fell_out: false,
        };
        let reward = shaper.score(&state, &info, false);
        assert!((reward - (-0.01 - 0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_reward_is_clamped() {
        let mut shaper = shaper_at(0);
        // Absurd forward leap still clamps to 1.0
        let state = grounded_state(10_000);
        let reward = shaper.score(&state, &StepInfo::default(), false);
        assert_eq!(reward, 1.0);
    }

    #[test]
    fn test_terminal_penalty_replaces_shaped_reward() {
        let mut shaper = shaper_at(100);
        let state = grounded_state(500);
        let reward = shaper.score(&state, &StepInfo::default(), true);
        assert_eq!(reward, -10.0);
    }
}
