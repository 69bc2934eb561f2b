//! Player physics and collision state machine
//!
//! The update order per tick is fixed: jump edge, gravity, horizontal move
//! and resolve, vertical move and resolve, fall-out respawn, obstacle
//! contact. Collisions resolve one axis at a time, so diagonal contacts
//! become two sequential single-axis corrections.

use std::time::{Duration, Instant};

use super::action::Intent;
use super::config::GameConfig;
use super::entities::{Obstacle, Rect, Tile};

/// Player collision box in pixels
pub const PLAYER_WIDTH: i32 = 30;
pub const PLAYER_HEIGHT: i32 = 40;

/// Respawn height after falling out of the playfield
const RESPAWN_Y: i32 = -100;

/// What happened to the player during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickEvents {
    /// A point of damage was applied this tick
    pub took_damage: bool,
    /// The player fell below the playfield and was respawned
    pub fell_out: bool,
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    /// Vertical velocity in pixels per tick; positive is down
    pub vel_y: i32,
    pub on_ground: bool,
    /// Jumps consumed since the last landing
    pub jump_count: u32,
    pub health: u32,
    invincible_since: Option<Instant>,
}

impl Player {
    pub fn new(x: i32, y: i32, config: &GameConfig) -> Self {
        Self {
            rect: Rect::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
            vel_y: 0,
            on_ground: false,
            jump_count: 0,
            health: config.max_health,
            invincible_since: None,
        }
    }

    /// True while a post-damage window is active
    pub fn is_invincible(&self, now: Instant, window: Duration) -> bool {
        self.invincible_since
            .is_some_and(|since| now.duration_since(since) <= window)
    }

    /// Time since the damage event that opened the current window
    pub fn invincibility_elapsed(&self, now: Instant) -> Option<Duration> {
        self.invincible_since.map(|since| now.duration_since(since))
    }

    /// Advance the player by one tick
    pub fn update(
        &mut self,
        intent: Intent,
        tiles: &[Tile],
        obstacles: &[Obstacle],
        config: &GameConfig,
        now: Instant,
    ) -> TickEvents {
        let mut events = TickEvents::default();

        let dx = intent.horizontal.sign() * config.move_speed;

        if intent.jump && self.jump_count < config.max_jump_count {
            self.vel_y = config.jump_velocity;
            self.jump_count += 1;
        }

        self.vel_y = (self.vel_y + config.gravity).min(config.max_fall_speed);

        self.rect.x += dx;
        self.resolve_collisions(dx, 0, tiles);

        self.on_ground = false;
        self.rect.y += self.vel_y;
        self.resolve_collisions(0, self.vel_y, tiles);

        // Fell out: damage and drop back in from above at the same x
        if self.rect.top() > config.viewport_height {
            events.fell_out = true;
            if self.take_damage(config, now) {
                events.took_damage = true;
            }
            self.rect.y = RESPAWN_Y;
            self.vel_y = 0;
        }

        // Obstacles are damage triggers, never solid; one contact per tick
        for obstacle in obstacles {
            if self.rect.intersects(&obstacle.rect) {
                if self.take_damage(config, now) {
                    events.took_damage = true;
                }
                break;
            }
        }

        if !self.is_invincible(now, config.invincibility) {
            self.invincible_since = None;
        }

        events
    }

    /// Apply one point of damage unless god mode or an active window
    /// suppresses it; a successful hit opens a new window
    fn take_damage(&mut self, config: &GameConfig, now: Instant) -> bool {
        if config.god_mode || self.is_invincible(now, config.invincibility) {
            return false;
        }
        self.health = self.health.saturating_sub(1);
        self.invincible_since = Some(now);
        true
    }

    /// Push the player out of any overlapping tile along the axis it just
    /// moved on
    fn resolve_collisions(&mut self, dx: i32, dy: i32, tiles: &[Tile]) {
        for tile in tiles {
            if !self.rect.intersects(&tile.rect) {
                continue;
            }
            if dy > 0 {
                self.rect.set_bottom(tile.rect.top());
                self.vel_y = 0;
                self.on_ground = true;
                self.jump_count = 0;
            } else if dy < 0 {
                self.rect.set_top(tile.rect.bottom());
                self.vel_y = 0;
            } else if dx > 0 {
                self.rect.set_right(tile.rect.left());
            } else if dx < 0 {
                self.rect.set_left(tile.rect.right());
            }
        }
    }
}
