use super::bounds::{Aabb, Bounded};
use super::bullet::{Bullet, BulletOwner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyType {
    /// Small and fast, dies to a single hit.
    Small,
    Medium,
    /// Large and slow, fires the most.
    Large,
}

/// Fixed parameter row shared by every enemy of one type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Archetype {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: i32,
    pub points: u32,
    pub fire_chance: f32,
    /// Vertical clearance kept at spawn time above and below the ship.
    pub spawn_margin: f32,
}

impl EnemyType {
    pub const ALL: [EnemyType; 3] = [EnemyType::Small, EnemyType::Medium, EnemyType::Large];

    pub fn archetype(&self) -> Archetype {
        match self {
            EnemyType::Small => Archetype {
                width: 16.0,
                height: 8.0,
                speed: 3.0,
                health: 1,
                points: 10,
                fire_chance: 0.002,
                spawn_margin: 10.0,
            },
            EnemyType::Medium => Archetype {
                width: 24.0,
                height: 12.0,
                speed: 2.0,
                health: 2,
                points: 20,
                fire_chance: 0.004,
                spawn_margin: 15.0,
            },
            EnemyType::Large => Archetype {
                width: 36.0,
                height: 20.0,
                speed: 1.0,
                health: 4,
                points: 30,
                fire_chance: 0.008,
                spawn_margin: 20.0,
            },
        }
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            EnemyType::Small => "small",
            EnemyType::Medium => "medium",
            EnemyType::Large => "large",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: i32,
    pub points: u32,
    pub fire_chance: f32,
    pub enemy_type: EnemyType,
}

impl Enemy {
    pub fn new(x: f32, y: f32, enemy_type: EnemyType) -> Self {
        let archetype = enemy_type.archetype();
        Self {
            x,
            y,
            width: archetype.width,
            height: archetype.height,
            speed: archetype.speed,
            health: archetype.health,
            points: archetype.points,
            fire_chance: archetype.fire_chance,
            enemy_type,
        }
    }

    /// Enemies fly straight toward the left edge.
    pub fn update(&mut self) {
        self.x -= self.speed;
    }

    /// Bullet fired from the leading (left) edge, vertically centered.
    pub fn fire(&self) -> Bullet {
        Bullet::new(self.x, self.y + self.height / 2.0, BulletOwner::Enemy)
    }

    pub fn take_hit(&mut self) {
        self.health -= 1;
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// True once the trailing edge has passed the left side of the viewport.
    pub fn is_off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }

    /// Parameters the enemy was built from, health excluded.
    pub fn matches_archetype(&self) -> bool {
        let row = self.enemy_type.archetype();
        self.width == row.width
            && self.height == row.height
            && self.speed == row.speed
            && self.points == row.points
            && self.fire_chance == row.fire_chance
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }
}
