//! Rolling statistics for agent rollouts
//!
//! Tracks episode rewards, lengths and distances over a fixed window so
//! progress reports show smoothed values instead of single-episode noise.

use std::collections::VecDeque;

/// Episode statistics tracker with rolling averages
#[derive(Debug, Clone)]
pub struct EpisodeStats {
    /// Episode rewards (rolling window)
    rewards: VecDeque<f32>,

    /// Episode lengths in steps (rolling window)
    lengths: VecDeque<usize>,

    /// Episode distances in tiles (rolling window)
    distances: VecDeque<i32>,

    /// Total number of episodes completed
    total_episodes: usize,

    /// Total number of environment steps taken
    total_steps: usize,

    /// Best distance seen across all episodes
    best_distance: i32,

    /// Window size for rolling averages
    window_size: usize,
}

impl EpisodeStats {
    /// Create a new tracker keeping the last `window_size` episodes
    pub fn new(window_size: usize) -> Self {
        Self {
            rewards: VecDeque::with_capacity(window_size),
            lengths: VecDeque::with_capacity(window_size),
            distances: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            best_distance: 0,
            window_size,
        }
    }

    /// Record the completion of an episode
    pub fn record_episode(&mut self, reward: f32, length: usize, distance: i32) {
        Self::push_deque(&mut self.rewards, reward, self.window_size);
        Self::push_deque(&mut self.lengths, length, self.window_size);
        Self::push_deque(&mut self.distances, distance, self.window_size);
        self.total_episodes += 1;
        self.total_steps += length;
        if distance > self.best_distance {
            self.best_distance = distance;
        }
    }

    pub fn mean_reward(&self) -> f32 {
        if self.rewards.is_empty() {
            return 0.0;
        }
        self.rewards.iter().sum::<f32>() / self.rewards.len() as f32
    }

    pub fn mean_length(&self) -> f32 {
        if self.lengths.is_empty() {
            return 0.0;
        }
        self.lengths.iter().sum::<usize>() as f32 / self.lengths.len() as f32
    }

    pub fn mean_distance(&self) -> f32 {
        if self.distances.is_empty() {
            return 0.0;
        }
        self.distances.iter().sum::<i32>() as f32 / self.distances.len() as f32
    }

    pub fn best_distance(&self) -> i32 {
        self.best_distance
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// One-line summary of the rolling window
    pub fn format_summary(&self) -> String {
        format!(
            "Reward: {:.2} | Steps: {:.1} | Distance: {:.1} | Best: {}",
            self.mean_reward(),
            self.mean_length(),
            self.mean_distance(),
            self.best_distance
        )
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() == window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
