use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::interval;

use crate::game::{GameConfig, GameEngine, GameState, Horizontal, Intent};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::persistence::{ScoreEntry, load_high_scores, save_high_score};
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    scores_path: PathBuf,
    high_scores: Vec<ScoreEntry>,
    should_quit: bool,
    paused: bool,
    score_saved: bool,
    pending_horizontal: Horizontal,
    pending_jump: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, scores_path: PathBuf) -> Result<Self> {
        let mut engine = GameEngine::new(config)?;
        let state = engine.reset()?;
        let high_scores = load_high_scores(&scores_path);

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            scores_path,
            high_scores,
            should_quit: false,
            paused: false,
            score_saved: false,
            pending_horizontal: Horizontal::Still,
            pending_jump: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Simulation ticks at 60 Hz
        let tick_interval = Duration::from_millis(16);
        let mut tick_timer = interval(tick_interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if !self.paused && !self.state.game_over {
                        self.update_game()?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            &self.state,
                            &self.metrics,
                            self.engine.config(),
                            self.paused,
                            &self.high_scores,
                        );
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Move(direction) => {
                    self.pending_horizontal = direction;
                }
                KeyAction::Jump => {
                    self.pending_jump = true;
                }
                KeyAction::Pause => {
                    if !self.state.game_over {
                        self.paused = !self.paused;
                    }
                }
                KeyAction::Restart => {
                    self.reset_game()?;
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        let intent = Intent {
            horizontal: self.pending_horizontal,
            jump: self.pending_jump,
        };
        self.pending_horizontal = Horizontal::Still;
        self.pending_jump = false;

        let result = self.engine.step(&mut self.state, intent)?;

        if result.terminated {
            self.handle_game_over();
        }

        Ok(())
    }

    fn handle_game_over(&mut self) {
        if self.score_saved {
            return;
        }
        self.score_saved = true;
        self.metrics.on_game_over(self.state.max_distance);

        // God-mode runs never make the leaderboard
        if self.engine.config().god_mode {
            self.high_scores = load_high_scores(&self.scores_path);
            return;
        }

        let entry = ScoreEntry::new(
            self.state.max_distance,
            self.state.survival_time().as_secs(),
            "normal",
        );
        match save_high_score(&self.scores_path, entry) {
            Ok(scores) => self.high_scores = scores,
            Err(err) => {
                log::warn!("failed to save high score: {err:#}");
                self.high_scores = load_high_scores(&self.scores_path);
            }
        }
    }

    fn reset_game(&mut self) -> Result<()> {
        self.state = self.engine.reset()?;
        self.metrics.on_game_start();
        self.paused = false;
        self.score_saved = false;
        self.pending_horizontal = Horizontal::Still;
        self.pending_jump = false;
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
