// Library exports for the binary and for testing
pub use config::{Cli, GameConfig, Viewport};
pub use entities::{
    Aabb, Bounded, Bullet, BulletOwner, Enemy, EnemyType, GameState, Player, Star,
};
pub use game::{ENEMY_BULLET_DAMAGE, ENEMY_COLLISION_DAMAGE, Game, GameEvent};
pub use input::{Control, ControlState, InputAction, InputManager};
pub use random::{RandomSource, RngSource, SequenceSource, ThreadRngSource};
pub use spawner::{SPAWN_INTERVAL, Spawner, maybe_spawn};
pub use world::World;

pub mod config;
pub mod entities;
pub mod game;
pub mod input;
pub mod random;
pub mod renderer;
pub mod spawner;
pub mod world;
