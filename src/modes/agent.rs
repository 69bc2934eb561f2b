//! Headless agent mode
//!
//! Drives the environment adapter with a policy for a fixed number of
//! episodes, tracking rolling statistics and appending each run to the
//! leaderboard. The default policy is uniform-random exploration; a real
//! learner replaces it through the `Policy` trait.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::game::GameConfig;
use crate::metrics::EpisodeStats;
use crate::persistence::{ScoreEntry, save_high_score};
use crate::rl::{EnvConfig, PlatformerEnvironment, Policy, resolve_policy};

/// Configuration for agent mode
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Number of episodes to run
    pub episodes: usize,

    /// Print a progress line every N episodes
    pub log_frequency: usize,

    /// Optional checkpoint to play with; missing files fall back to the
    /// exploration policy with a warning
    pub model_path: Option<PathBuf>,

    /// Leaderboard file episodes are appended to
    pub scores_path: PathBuf,

    /// Whether episodes are recorded on the leaderboard
    pub save_scores: bool,
}

impl AgentConfig {
    pub fn new(episodes: usize) -> Self {
        Self {
            episodes,
            log_frequency: 10,
            model_path: None,
            scores_path: PathBuf::from("highscores.json"),
            save_scores: true,
        }
    }
}

/// Agent mode: policy-driven rollouts over the environment
pub struct AgentMode {
    env: PlatformerEnvironment,
    policy: Box<dyn Policy>,
    stats: EpisodeStats,
    config: AgentConfig,
    horizon: u32,
    difficulty: f32,
}

impl AgentMode {
    pub fn new(
        game_config: GameConfig,
        env_config: EnvConfig,
        config: AgentConfig,
    ) -> Result<Self> {
        let policy = resolve_policy(config.model_path.as_deref(), game_config.seed);
        let horizon = env_config.max_episode_steps;
        let difficulty = game_config.difficulty;
        let env = PlatformerEnvironment::new(game_config, env_config)?;

        // 100-episode rolling window
        let stats = EpisodeStats::new(100);

        Ok(Self {
            env,
            policy,
            stats,
            config,
            horizon,
            difficulty,
        })
    }

    /// Run all episodes, reporting progress along the way
    pub fn run(&mut self) -> Result<()> {
        self.print_header();

        for episode in 0..self.config.episodes {
            let (reward, steps, distance, survival) = self.run_episode()?;
            self.stats.record_episode(reward, steps, distance);

            if self.config.save_scores {
                let entry = ScoreEntry::new(distance, survival.as_secs(), "agent");
                if let Err(err) = save_high_score(&self.config.scores_path, entry) {
                    log::warn!("failed to record agent score: {err:#}");
                }
            }

            if (episode + 1) % self.config.log_frequency == 0 {
                self.print_progress(episode + 1);
            }
        }

        println!("\nRollout complete!");
        println!("Episodes: {}", self.stats.total_episodes());
        println!("Total steps: {}", self.stats.total_steps());
        println!("{}", self.stats.format_summary());

        Ok(())
    }

    /// Run a single episode to termination
    ///
    /// Returns the accumulated reward, step count, final distance and
    /// survival time.
    fn run_episode(&mut self) -> Result<(f32, usize, i32, Duration)> {
        let mut obs = self.env.reset()?;
        let mut episode_reward = 0.0;
        let mut steps = 0;

        loop {
            let action = self.policy.select_action(&obs);
            let (next_obs, reward, done, diagnostics) = self.env.step(action)?;

            episode_reward += reward;
            steps += 1;
            obs = next_obs;

            if done {
                let survival = self.env.state().survival_time();
                return Ok((episode_reward, steps, diagnostics.distance, survival));
            }
        }
    }

    fn print_header(&self) {
        println!("{}", "=".repeat(70));
        println!("Agent rollout - Pixel Jumper");
        println!("{}", "=".repeat(70));
        println!("Episodes: {}", self.config.episodes);
        println!("Difficulty: {}", self.difficulty);
        println!("Step horizon: {}", self.horizon);
        match &self.config.model_path {
            Some(path) => println!("Checkpoint: {:?}", path),
            None => println!("Policy: uniform-random exploration"),
        }
        println!("Logging: Every {} episodes", self.config.log_frequency);
        println!("Scores: {:?}", self.config.scores_path);
        println!("{}", "=".repeat(70));
        println!();
    }

    fn print_progress(&self, episode: usize) {
        println!(
            "[Episode {}/{}] {}",
            episode,
            self.config.episodes,
            self.stats.format_summary()
        );
    }
}
