use crate::game::{GameConfig, GameState, Rect};

/// Number of features in an observation
pub const OBSERVATION_DIM: usize = 8;

/// Flat feature vector handed to an agent
///
/// Layout:
/// - 0: player x within the visible view, normalized to [0, 1]
/// - 1: player y, normalized to [0, 1]
/// - 2: vertical velocity over terminal fall speed, clamped to [-1, 1]
/// - 3: on-ground flag (0 or 1)
/// - 4: jump count over the double-jump cap
/// - 5: horizontal distance to the nearest platform below, normalized
/// - 6: horizontal distance to the nearest obstacle below, normalized
/// - 7: health over max health
pub type Observation = [f32; OBSERVATION_DIM];

/// Build the observation vector from the current game state
pub fn create_observation(state: &GameState, config: &GameConfig) -> Observation {
    let player = &state.player;

    // scroll_x <= 0, so this is the player's position inside the view
    let view_x = (player.rect.x + state.scroll_x) as f32 / config.viewport_width as f32;
    let norm_y = player.rect.y as f32 / config.viewport_height as f32;
    let norm_vel = player.vel_y as f32 / config.max_fall_speed as f32;

    let platform_dist = nearest_below(state.tiles.iter().map(|t| &t.rect), &player.rect);
    let obstacle_dist = nearest_below(state.obstacles.iter().map(|o| &o.rect), &player.rect);

    [
        view_x.clamp(0.0, 1.0),
        norm_y.clamp(0.0, 1.0),
        norm_vel.clamp(-1.0, 1.0),
        if player.on_ground { 1.0 } else { 0.0 },
        player.jump_count as f32 / config.max_jump_count as f32,
        normalize_distance(platform_dist, config.viewport_width),
        normalize_distance(obstacle_dist, config.viewport_width),
        player.health as f32 / config.max_health as f32,
    ]
}

/// Minimum horizontal center distance among rects whose top edge is
/// strictly below the player's bottom edge
fn nearest_below<'a>(rects: impl Iterator<Item = &'a Rect>, player: &Rect) -> Option<i32> {
    rects
        .filter(|rect| rect.top() > player.bottom())
        .map(|rect| (rect.center_x() - player.center_x()).abs())
        .min()
}

/// Saturates at 1.0; 1.0 also stands for "nothing qualifies"
fn normalize_distance(distance: Option<i32>, viewport_width: i32) -> f32 {
    match distance {
        Some(d) => (d as f32 / viewport_width as f32).min(1.0),
        None => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Obstacle, Player, Tile};

    fn state_with(tiles: Vec<Tile>, obstacles: Vec<Obstacle>) -> (GameState, GameConfig) {
        let config = GameConfig::default();
        let player = Player::new(100, 100, &config);
        (GameState::new(tiles, obstacles, player), config)
    }

    #[test]
    fn test_observation_dimension_and_ranges() {
        let (state, config) = state_with(vec![Tile::at_cell(2, 12, 40)], Vec::new());
        let obs = create_observation(&state, &config);

        assert_eq!(obs.len(), OBSERVATION_DIM);
        assert!((0.0..=1.0).contains(&obs[0]));
        assert!((0.0..=1.0).contains(&obs[1]));
        assert!((-1.0..=1.0).contains(&obs[2]));
        for value in [obs[3], obs[4], obs[5], obs[6], obs[7]] {
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn test_player_features() {
        let (mut state, config) = state_with(Vec::new(), Vec::new());
        state.player.on_ground = true;
        state.player.jump_count = 1;
        state.player.health = 2;

        let obs = create_observation(&state, &config);

        assert_eq!(obs[0], 100.0 / 800.0);
        assert_eq!(obs[1], 100.0 / 600.0);
        assert_eq!(obs[3], 1.0);
        assert_eq!(obs[4], 0.5);
        assert_eq!(obs[7], 2.0 / 3.0);
    }

    #[test]
    fn test_velocity_clamped() {
        let (mut state, config) = state_with(Vec::new(), Vec::new());
        // A fresh jump exceeds the terminal-speed normalizer
        state.player.vel_y = -15;
        let obs = create_observation(&state, &config);
        assert_eq!(obs[2], -1.0);

        state.player.vel_y = 7;
        let obs = create_observation(&state, &config);
        assert_eq!(obs[2], 0.7);
    }

    #[test]
    fn test_nearest_platform_below() {
        // Player bottom is at 140; row 12 tiles are below, row 2 is not
        let tiles = vec![
            Tile::at_cell(2, 2, 40),
            Tile::at_cell(4, 12, 40),
            Tile::at_cell(9, 12, 40),
        ];
        let (state, config) = state_with(tiles, Vec::new());
        let obs = create_observation(&state, &config);

        // Nearest below: center 180 vs player center 115
        assert_eq!(obs[5], 65.0 / 800.0);
    }

    #[test]
    fn test_distances_default_to_one() {
        let (state, config) = state_with(Vec::new(), Vec::new());
        let obs = create_observation(&state, &config);
        assert_eq!(obs[5], 1.0);
        assert_eq!(obs[6], 1.0);

        // A tile level with the player does not qualify as "below"
        let (state, config) = state_with(vec![Tile::at_cell(2, 2, 40)], Vec::new());
        let obs = create_observation(&state, &config);
        assert_eq!(obs[5], 1.0);
    }

    #[test]
    fn test_obstacle_distance_tracked_separately() {
        let obstacles = vec![Obstacle::at_cell(6, 12, 40)];
        let (state, config) = state_with(Vec::new(), obstacles);
        let obs = create_observation(&state, &config);

        assert_eq!(obs[5], 1.0);
        assert_eq!(obs[6], (260.0 - 115.0) / 800.0);
    }

    #[test]
    fn test_view_relative_x_clamps_far_from_camera() {
        let (mut state, config) = state_with(Vec::new(), Vec::new());
        state.player.rect.x = 2000;
        state.scroll_x = -(2000 - 400);
        let obs = create_observation(&state, &config);
        assert_eq!(obs[0], 0.5);
    }
}
