use crate::config::Viewport;
use crate::entities::{Bullet, Enemy, Player, Star, create_star_field};
use crate::random::RandomSource;

/// Every entity collection in play, owned by one session.
#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub stars: Vec<Star>,
}

impl World {
    pub fn new<R: RandomSource + ?Sized>(viewport: Viewport, star_count: usize, rng: &mut R) -> Self {
        Self {
            player: Player::spawn(viewport),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            stars: create_star_field(star_count, viewport, rng),
        }
    }

    /// Puts the player back at the start, empties the dynamic collections
    /// and reseeds the star field.
    pub fn reset<R: RandomSource + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) {
        let star_count = self.stars.len();
        *self = Self::new(viewport, star_count, rng);
    }

    /// Number of live dynamic entities, stars excluded.
    pub fn entity_count(&self) -> usize {
        self.player_bullets.len() + self.enemy_bullets.len() + self.enemies.len()
    }
}
