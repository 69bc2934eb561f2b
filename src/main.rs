use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use pixel_jumper::game::GameConfig;
use pixel_jumper::modes::{AgentConfig, AgentMode, HumanMode};
use pixel_jumper::rl::EnvConfig;

#[derive(Parser)]
#[command(name = "pixel_jumper")]
#[command(version, about = "Side-scrolling platformer with a reinforcement learning environment")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Terrain difficulty
    #[arg(long, default_value_t = 1.0)]
    difficulty: f32,

    /// RNG seed for reproducible terrain
    #[arg(long)]
    seed: Option<u64>,

    /// Debug bypass for damage and fall-death
    #[arg(long)]
    god: bool,

    /// Episodes to run in agent mode
    #[arg(long, default_value_t = 100)]
    episodes: usize,

    /// Agent checkpoint to play with (agent mode)
    #[arg(long)]
    model: Option<PathBuf>,

    /// High-score file
    #[arg(long, default_value = "highscores.json")]
    scores: PathBuf,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play with keyboard controls in the terminal
    Human,
    /// Run policy-driven episodes headlessly
    Agent,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = GameConfig::with_difficulty(cli.difficulty);
    config.seed = cli.seed;
    config.god_mode = cli.god;

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config, cli.scores)?;
            human_mode.run().await?;
        }
        Mode::Agent => {
            let mut agent_config = AgentConfig::new(cli.episodes);
            agent_config.model_path = cli.model;
            agent_config.scores_path = cli.scores;

            let mut agent_mode = AgentMode::new(config, EnvConfig::default(), agent_config)?;
            agent_mode.run()?;
        }
    }

    Ok(())
}
