use super::bounds::{Aabb, Bounded};

pub const PLAYER_BULLET_WIDTH: f32 = 10.0;
pub const PLAYER_BULLET_HEIGHT: f32 = 2.0;
pub const PLAYER_BULLET_SPEED: f32 = 7.0;

pub const ENEMY_BULLET_WIDTH: f32 = 8.0;
pub const ENEMY_BULLET_HEIGHT: f32 = 2.0;
pub const ENEMY_BULLET_SPEED: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn new(x: f32, y: f32, owner: BulletOwner) -> Self {
        let (width, height, speed) = match owner {
            BulletOwner::Player => (PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT, PLAYER_BULLET_SPEED),
            BulletOwner::Enemy => (ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT, ENEMY_BULLET_SPEED),
        };

        Self {
            x,
            y,
            width,
            height,
            speed,
            owner,
        }
    }

    /// Player bullets travel right, enemy bullets travel left.
    pub fn update(&mut self) {
        match self.owner {
            BulletOwner::Player => self.x += self.speed,
            BulletOwner::Enemy => self.x -= self.speed,
        }
    }

    /// True once the bullet has left the viewport on the side it travels toward.
    pub fn is_out_of_bounds(&self, viewport_width: f32) -> bool {
        match self.owner {
            BulletOwner::Player => self.x > viewport_width,
            BulletOwner::Enemy => self.x < 0.0,
        }
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }
}
