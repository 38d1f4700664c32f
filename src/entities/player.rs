use std::time::Duration;

use super::bounds::{Aabb, Bounded};
use super::bullet::{Bullet, BulletOwner};
use crate::config::Viewport;
use crate::input::ControlState;

pub const PLAYER_WIDTH: f32 = 24.0;
pub const PLAYER_HEIGHT: f32 = 10.0;
pub const PLAYER_SPEED: f32 = 4.0;
pub const PLAYER_MAX_HEALTH: i32 = 100;
pub const PLAYER_START_X: f32 = 40.0;
/// Minimum distance kept from the top, bottom and left edges.
pub const PLAYER_EDGE_MARGIN: f32 = 10.0;
pub const FIRE_COOLDOWN: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Signed so the final hit can take it below zero.
    pub health: i32,
    /// `None` until the first shot. Kept across restarts.
    pub last_shot: Option<Duration>,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            last_shot: None,
        }
    }

    /// Fresh player at the session start position.
    pub fn spawn(viewport: Viewport) -> Self {
        Self::new(PLAYER_START_X, viewport.height / 2.0)
    }

    /// Applies one tick of movement from the held controls, then clamps the
    /// ship into the left half of the viewport.
    pub fn apply_movement(&mut self, controls: &ControlState, viewport: Viewport) {
        if controls.up {
            self.y -= self.speed;
        }
        if controls.down {
            self.y += self.speed;
        }
        if controls.left {
            self.x -= self.speed;
        }
        if controls.right {
            self.x += self.speed;
        }

        self.x = self.x.min(viewport.width / 2.0).max(PLAYER_EDGE_MARGIN);
        self.y = self
            .y
            .min(viewport.height - PLAYER_EDGE_MARGIN)
            .max(PLAYER_EDGE_MARGIN);
    }

    pub fn can_fire(&self, now: Duration) -> bool {
        match self.last_shot {
            None => true,
            Some(last) => now.saturating_sub(last) > FIRE_COOLDOWN,
        }
    }

    /// Fires one bullet from the nose of the ship if the cooldown allows.
    pub fn try_fire(&mut self, now: Duration) -> Option<Bullet> {
        if !self.can_fire(now) {
            return None;
        }

        self.last_shot = Some(now);
        Some(Bullet::new(
            self.x + self.width,
            self.y + self.height / 2.0,
            BulletOwner::Player,
        ))
    }

    pub fn take_damage(&mut self, damage: i32) {
        self.health -= damage;
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }
}
