use std::time::Duration;

use tracing::debug;

use crate::config::Viewport;
use crate::entities::{Enemy, EnemyType};
use crate::random::RandomSource;

pub const SPAWN_INTERVAL: Duration = Duration::from_millis(1500);

/// Spawns an enemy if the interval since `last_spawn` has strictly passed
/// (or nothing has spawned yet). The caller records `now` as the new
/// spawn time when an enemy comes back.
pub fn maybe_spawn<R: RandomSource + ?Sized>(
    now: Duration,
    last_spawn: Option<Duration>,
    viewport: Viewport,
    rng: &mut R,
) -> Option<Enemy> {
    if let Some(last) = last_spawn
        && now.saturating_sub(last) <= SPAWN_INTERVAL
    {
        return None;
    }

    let enemy_type = EnemyType::ALL[rng.pick(EnemyType::ALL.len())];
    let margin = enemy_type.archetype().spawn_margin;
    let y = rng.offset_from(margin, viewport.height - margin * 2.0);

    Some(Enemy::new(viewport.width, y, enemy_type))
}

/// Timer-gated enemy generator that remembers its last spawn for the
/// lifetime of the game, across sessions.
#[derive(Debug, Clone, Default)]
pub struct Spawner {
    last_spawn: Option<Duration>,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_spawn(&self) -> Option<Duration> {
        self.last_spawn
    }

    pub fn update<R: RandomSource + ?Sized>(
        &mut self,
        now: Duration,
        viewport: Viewport,
        rng: &mut R,
    ) -> Option<Enemy> {
        let enemy = maybe_spawn(now, self.last_spawn, viewport, rng)?;
        self.last_spawn = Some(now);
        debug!(
            kind = enemy.enemy_type.get_name(),
            y = enemy.y,
            "enemy spawned"
        );
        Some(enemy)
    }
}
