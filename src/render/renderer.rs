use std::collections::HashSet;
use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameConfig, GameState};
use crate::metrics::GameMetrics;
use crate::persistence::ScoreEntry;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        config: &GameConfig,
        paused: bool,
        high_scores: &[ScoreEntry],
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics, config);
        frame.render_widget(stats, chunks[0]);

        // Center the playfield horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if state.game_over {
            let game_over = self.render_game_over(state, high_scores);
            frame.render_widget(game_over, game_area);
        } else if paused {
            let pause = self.render_pause();
            frame.render_widget(pause, game_area);
        } else {
            let grid = self.render_grid(game_area, state, config);
            frame.render_widget(grid, game_area);
        }

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, _area: Rect, state: &GameState, config: &GameConfig) -> Paragraph<'_> {
        let tile = config.tile_size;
        let cols = config.viewport_width / tile;
        let rows = config.viewport_height / tile;

        // Camera-left world column; the view scrolls by whole cells
        let first_col = (-state.scroll_x).div_euclid(tile);

        let tiles: HashSet<(i32, i32)> = state.tiles.iter().map(|t| t.cell(tile)).collect();
        let obstacles: HashSet<(i32, i32)> =
            state.obstacles.iter().map(|o| o.cell(tile)).collect();

        let player_cell = (
            state.player.rect.center_x().div_euclid(tile),
            state.player.rect.center_y().div_euclid(tile),
        );

        // Blink while the post-damage window is active
        let flashing = state
            .player
            .invincibility_elapsed(Instant::now())
            .is_some_and(|elapsed| (elapsed.as_millis() / 100) % 2 == 0);

        let mut lines = Vec::new();
        for row in 0..rows {
            let mut spans = Vec::new();
            for col in 0..cols {
                let cell = (first_col + col, row);

                let span = if cell == player_cell {
                    let color = if flashing { Color::Yellow } else { Color::Cyan };
                    Span::styled(
                        "● ",
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )
                } else if obstacles.contains(&cell) {
                    Span::styled(
                        "x ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else if tiles.contains(&cell) {
                    Span::styled("■ ", Style::default().fg(Color::Green))
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Pixel Jumper "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        config: &GameConfig,
    ) -> Paragraph<'_> {
        let mut spans = vec![Span::styled("Health: ", Style::default().fg(Color::Yellow))];
        for i in 0..config.max_health {
            let style = if i < state.player.health {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled("♥ ", style));
        }

        spans.extend([
            Span::raw("   "),
            Span::styled("Distance: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{} m", state.max_distance),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ]);

        if config.god_mode {
            spans.extend([
                Span::raw("   "),
                Span::styled(
                    "[GOD]",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
            ]);
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_pause(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled("Esc", Style::default().fg(Color::Green)),
                Span::styled(" to resume or ", Style::default().fg(Color::Gray)),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_game_over(&self, state: &GameState, high_scores: &[ScoreEntry]) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Distance: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{} m", state.max_distance),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Survived: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{} s", state.survival_time().as_secs()),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
        ];

        if !high_scores.is_empty() {
            text.push(Line::from(vec![Span::styled(
                "High Scores",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )]));
            for (rank, entry) in high_scores.iter().enumerate() {
                text.push(Line::from(vec![Span::styled(
                    format!(
                        "{}. {:>4} m   {:>4} s   {}",
                        rank + 1,
                        entry.score,
                        entry.time,
                        entry.mode
                    ),
                    Style::default().fg(Color::White),
                )]));
            }
            text.push(Line::from(""));
        }

        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("AD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" to jump | "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" to pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
