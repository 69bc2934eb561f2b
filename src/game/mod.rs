//! Core game logic
//!
//! Everything in this module is pure simulation with no I/O or rendering
//! dependencies, so it can drive both interactive play and headless agent
//! rollouts.

pub mod action;
pub mod config;
pub mod engine;
pub mod entities;
pub mod level;
pub mod player;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Horizontal, Intent};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use entities::{Obstacle, Rect, Tile};
pub use level::{Chunk, ensure_starting_platforms, generate_chunk};
pub use player::{Player, TickEvents};
pub use state::GameState;
