mod bounds;
mod bullet;
mod enemy;
mod game_state;
mod player;
mod star;

// Re-export all public types
pub use bounds::{Aabb, Bounded};
pub use bullet::{Bullet, BulletOwner};
pub use enemy::{Archetype, Enemy, EnemyType};
pub use game_state::GameState;
pub use player::{FIRE_COOLDOWN, PLAYER_MAX_HEALTH, Player};
pub use star::{Star, create_star_field};
