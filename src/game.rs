use std::time::Duration;

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{Bounded, GameState, PLAYER_MAX_HEALTH};
use crate::input::ControlState;
use crate::random::RandomSource;
use crate::spawner::Spawner;
use crate::world::World;

/// Health lost when an enemy bullet reaches the player.
pub const ENEMY_BULLET_DAMAGE: i32 = 10;
/// Health lost when an enemy ship rams the player.
pub const ENEMY_COLLISION_DAMAGE: i32 = 20;

/// Notifications for the score/health display and session control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged(u32),
    HealthChanged(i32),
    GameOver { score: u32 },
}

/// One play session: lifecycle state, score and the entity store.
///
/// The session is driven from outside: the caller reads the clock once per
/// frame and hands it to [`Game::tick`] together with the held controls.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    state: GameState,
    score: u32,
    world: World,
    spawner: Spawner,
    events: Vec<GameEvent>,
}

impl Game {
    /// Idle session with a star field already in place for the title screen.
    pub fn new<R: RandomSource + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        Self {
            config,
            state: GameState::Idle,
            score: 0,
            world: World::new(config.viewport, config.star_count, rng),
            spawner: Spawner::new(),
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn health(&self) -> i32 {
        self.world.player.health
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Idle -> Running. Ignored in any other state.
    pub fn start<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Vec<GameEvent> {
        if self.state != GameState::Idle {
            debug!(state = ?self.state, "start ignored");
            return Vec::new();
        }
        info!("session started");
        self.begin_session(rng)
    }

    /// Over -> Running. Ignored in any other state.
    pub fn restart<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Vec<GameEvent> {
        if self.state != GameState::Over {
            debug!(state = ?self.state, "restart ignored");
            return Vec::new();
        }
        info!(previous_score = self.score, "session restarted");
        self.begin_session(rng)
    }

    /// Resets score and entities. The fire and spawn timers carry over, so a
    /// quick restart cannot bypass either interval.
    fn begin_session<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Vec<GameEvent> {
        let last_shot = self.world.player.last_shot;
        self.score = 0;
        self.world.reset(self.config.viewport, rng);
        self.world.player.last_shot = last_shot;
        self.state = GameState::Running;

        self.events.push(GameEvent::ScoreChanged(self.score));
        self.events.push(GameEvent::HealthChanged(PLAYER_MAX_HEALTH));
        std::mem::take(&mut self.events)
    }

    /// Advances the simulation by one frame. Does nothing unless running.
    ///
    /// A game over raised part way through still lets the rest of the tick
    /// finish, so every collection is consistent when the tick returns.
    pub fn tick<R: RandomSource + ?Sized>(
        &mut self,
        now: Duration,
        controls: &ControlState,
        rng: &mut R,
    ) -> Vec<GameEvent> {
        if !self.state.is_running() {
            return Vec::new();
        }

        self.update_player(now, controls);
        self.update_bullets();
        self.update_enemy_bullets();
        self.spawn_enemy(now, rng);
        self.update_enemies(rng);
        self.update_stars(rng);

        std::mem::take(&mut self.events)
    }

    fn update_player(&mut self, now: Duration, controls: &ControlState) {
        let player = &mut self.world.player;
        player.apply_movement(controls, self.config.viewport);

        if controls.fire
            && let Some(shot) = player.try_fire(now)
        {
            debug!(x = shot.x, y = shot.y, "player fired");
            self.world.player_bullets.push(shot);
        }
    }

    fn update_bullets(&mut self) {
        for shot in &mut self.world.player_bullets {
            shot.update();
        }

        let width = self.config.viewport.width;
        self.world
            .player_bullets
            .retain(|shot| !shot.is_out_of_bounds(width));
    }

    fn update_enemy_bullets(&mut self) {
        let width = self.config.viewport.width;

        // Reverse order so removing index `i` never shifts an unvisited bullet.
        for i in (0..self.world.enemy_bullets.len()).rev() {
            let shot = &mut self.world.enemy_bullets[i];
            shot.update();

            if shot.collides_with(&self.world.player) {
                self.world.enemy_bullets.remove(i);
                self.damage_player(ENEMY_BULLET_DAMAGE);
                continue;
            }

            if self.world.enemy_bullets[i].is_out_of_bounds(width) {
                self.world.enemy_bullets.remove(i);
            }
        }
    }

    fn spawn_enemy<R: RandomSource + ?Sized>(&mut self, now: Duration, rng: &mut R) {
        if let Some(enemy) = self.spawner.update(now, self.config.viewport, rng) {
            self.world.enemies.push(enemy);
        }
    }

    fn update_enemies<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        for i in (0..self.world.enemies.len()).rev() {
            let enemy = &mut self.world.enemies[i];
            enemy.update();

            if rng.roll(enemy.fire_chance) {
                let shot = enemy.fire();
                self.world.enemy_bullets.push(shot);
            }

            // Bullets are resolved before the ram check: a ship destroyed
            // here cannot also hurt the player this tick.
            if self.resolve_bullet_hits(i) {
                continue;
            }

            if self.world.enemies[i].collides_with(&self.world.player) {
                let enemy = self.world.enemies.remove(i);
                debug!(kind = enemy.enemy_type.get_name(), "enemy rammed player");
                self.damage_player(ENEMY_COLLISION_DAMAGE);
                continue;
            }

            if self.world.enemies[i].is_off_screen() {
                self.world.enemies.remove(i);
            }
        }
    }

    /// Applies every player bullet overlapping the enemy at `index`.
    /// Returns true if the enemy was destroyed and removed.
    fn resolve_bullet_hits(&mut self, index: usize) -> bool {
        for j in (0..self.world.player_bullets.len()).rev() {
            if !self.world.player_bullets[j].collides_with(&self.world.enemies[index]) {
                continue;
            }

            self.world.player_bullets.remove(j);
            let enemy = &mut self.world.enemies[index];
            enemy.take_hit();

            if !enemy.is_alive() {
                let enemy = self.world.enemies.remove(index);
                debug!(
                    kind = enemy.enemy_type.get_name(),
                    points = enemy.points,
                    "enemy destroyed"
                );
                self.award(enemy.points);
                return true;
            }
        }
        false
    }

    fn update_stars<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let viewport = self.config.viewport;
        for star in &mut self.world.stars {
            star.update(viewport, rng);
        }
    }

    fn award(&mut self, points: u32) {
        self.score += points;
        self.events.push(GameEvent::ScoreChanged(self.score));
    }

    fn damage_player(&mut self, damage: i32) {
        let player = &mut self.world.player;
        player.take_damage(damage);
        self.events.push(GameEvent::HealthChanged(player.health));

        if !player.is_alive() {
            self.end_session();
        }
    }

    /// Running -> Over, at most once per session.
    fn end_session(&mut self) {
        if !self.state.is_running() {
            return;
        }
        self.state = GameState::Over;
        info!(score = self.score, "game over");
        self.events.push(GameEvent::GameOver { score: self.score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Bullet, BulletOwner, Enemy, EnemyType};
    use crate::random::SequenceSource;

    /// Rolls that never fire and never land on the small archetype.
    fn quiet_rng() -> SequenceSource {
        SequenceSource::constant(0.99)
    }

    fn running_game() -> (Game, SequenceSource) {
        let mut rng = quiet_rng();
        let mut game = Game::new(GameConfig::default(), &mut rng);
        game.start(&mut rng);
        // Keep the spawner quiet for the first interval.
        game.spawner.update(Duration::ZERO, game.config.viewport, &mut rng);
        game.world.enemies.clear();
        (game, rng)
    }

    #[test]
    fn test_new_game_is_idle_and_tick_is_noop() {
        let mut rng = quiet_rng();
        let mut game = Game::new(GameConfig::default(), &mut rng);
        assert_eq!(game.state(), GameState::Idle);
        assert_eq!(game.world().stars.len(), 30);

        let controls = ControlState {
            right: true,
            fire: true,
            ..ControlState::default()
        };
        let events = game.tick(Duration::from_secs(5), &controls, &mut rng);
        assert!(events.is_empty());
        assert_eq!(game.world().player.x, 40.0);
        assert!(game.world().player_bullets.is_empty());
        assert!(game.world().enemies.is_empty());
    }

    #[test]
    fn test_start_publishes_initial_score_and_health() {
        let mut rng = quiet_rng();
        let mut game = Game::new(GameConfig::default(), &mut rng);
        let events = game.start(&mut rng);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(
            events,
            vec![GameEvent::ScoreChanged(0), GameEvent::HealthChanged(100)]
        );
    }

    #[test]
    fn test_commands_outside_their_state_are_ignored() {
        let (mut game, mut rng) = running_game();
        assert!(game.start(&mut rng).is_empty());
        assert!(game.restart(&mut rng).is_empty());
        assert_eq!(game.state(), GameState::Running);
    }

    #[test]
    fn test_first_tick_spawns_enemy_at_right_edge() {
        let mut rng = quiet_rng();
        let mut game = Game::new(GameConfig::default(), &mut rng);
        game.start(&mut rng);
        game.tick(Duration::from_millis(16), &ControlState::default(), &mut rng);

        assert_eq!(game.world().enemies.len(), 1);
        let enemy = &game.world().enemies[0];
        assert_eq!(enemy.enemy_type, EnemyType::Large);
        // Spawned at the edge, then advanced once in the same tick.
        assert_eq!(enemy.x, 319.0);
    }

    #[test]
    fn test_fire_adds_bullet_that_advances_same_tick() {
        let (mut game, mut rng) = running_game();
        let controls = ControlState {
            fire: true,
            ..ControlState::default()
        };
        game.tick(Duration::from_millis(100), &controls, &mut rng);

        let shots = &game.world().player_bullets;
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].x, 64.0 + 7.0);
        assert_eq!(shots[0].y, 125.0);
    }

    #[test]
    fn test_player_bullet_pruned_past_right_edge() {
        let (mut game, mut rng) = running_game();
        game.world
            .player_bullets
            .push(Bullet::new(319.0, 100.0, BulletOwner::Player));
        game.tick(Duration::from_millis(16), &ControlState::default(), &mut rng);
        assert!(game.world().player_bullets.is_empty());
    }

    #[test]
    fn test_enemy_bullet_hit_costs_ten_health() {
        let (mut game, mut rng) = running_game();
        let player = game.world().player.clone();
        game.world.enemy_bullets.push(Bullet::new(
            player.x + 10.0,
            player.y + 4.0,
            BulletOwner::Enemy,
        ));

        let events = game.tick(Duration::from_millis(16), &ControlState::default(), &mut rng);
        assert_eq!(game.health(), 90);
        assert!(game.world().enemy_bullets.is_empty());
        assert_eq!(events, vec![GameEvent::HealthChanged(90)]);
    }

    #[test]
    fn test_enemy_bullet_pruned_past_left_edge() {
        let (mut game, mut rng) = running_game();
        game.world
            .enemy_bullets
            .push(Bullet::new(3.0, 5.0, BulletOwner::Enemy));
        game.tick(Duration::from_millis(16), &ControlState::default(), &mut rng);
        assert!(game.world().enemy_bullets.is_empty());
        assert_eq!(game.health(), 100);
    }

    #[test]
    fn test_enemy_fires_when_roll_succeeds() {
        let (mut game, _) = running_game();
        game.world
            .enemies
            .push(Enemy::new(250.0, 50.0, EnemyType::Large));
        let mut rng = SequenceSource::constant(0.001);
        game.tick(Duration::from_millis(16), &ControlState::default(), &mut rng);

        assert_eq!(game.world().enemy_bullets.len(), 1);
        let shot = &game.world().enemy_bullets[0];
        assert_eq!(shot.x, 249.0);
        assert_eq!(shot.y, 60.0);
    }

    #[test]
    fn test_multiple_bullets_each_take_one_health() {
        let (mut game, mut rng) = running_game();
        game.world
            .enemies
            .push(Enemy::new(200.0, 100.0, EnemyType::Large));
        // Two bullets that will both sit inside the enemy after moving.
        game.world
            .player_bullets
            .push(Bullet::new(190.0, 105.0, BulletOwner::Player));
        game.world
            .player_bullets
            .push(Bullet::new(195.0, 110.0, BulletOwner::Player));

        game.tick(Duration::from_millis(16), &ControlState::default(), &mut rng);
        assert_eq!(game.world().enemies[0].health, 2);
        assert!(game.world().player_bullets.is_empty());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_destroyed_enemy_does_not_ram_player() {
        let (mut game, mut rng) = running_game();
        let player = game.world().player.clone();
        // Overlaps the player and a bullet at the same time.
        game.world.enemies.push(Enemy::new(
            player.x + 5.0,
            player.y,
            EnemyType::Small,
        ));
        game.world.player_bullets.push(Bullet::new(
            player.x,
            player.y + 2.0,
            BulletOwner::Player,
        ));

        let events = game.tick(Duration::from_millis(16), &ControlState::default(), &mut rng);
        assert!(game.world().enemies.is_empty());
        assert_eq!(game.score(), 10);
        assert_eq!(game.health(), 100);
        assert_eq!(events, vec![GameEvent::ScoreChanged(10)]);
    }

    #[test]
    fn test_enemy_ram_costs_twenty_health() {
        let (mut game, mut rng) = running_game();
        let player = game.world().player.clone();
        game.world.enemies.push(Enemy::new(
            player.x + 10.0,
            player.y,
            EnemyType::Medium,
        ));

        game.tick(Duration::from_millis(16), &ControlState::default(), &mut rng);
        assert!(game.world().enemies.is_empty());
        assert_eq!(game.health(), 80);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_enemy_pruned_once_trailing_edge_leaves() {
        let (mut game, mut rng) = running_game();
        game.world
            .enemies
            .push(Enemy::new(-14.0, 5.0, EnemyType::Small));
        game.world
            .enemies
            .push(Enemy::new(-10.0, 200.0, EnemyType::Small));

        game.tick(Duration::from_millis(16), &ControlState::default(), &mut rng);
        assert_eq!(game.world().enemies.len(), 1);
        assert_eq!(game.world().enemies[0].x, -13.0);
    }

    #[test]
    fn test_game_over_emitted_once_for_several_hits() {
        let (mut game, mut rng) = running_game();
        game.world.player.health = 10;
        let player = game.world().player.clone();
        for offset in [0.0, 4.0, 8.0] {
            game.world.enemy_bullets.push(Bullet::new(
                player.x + offset + 5.0,
                player.y + 2.0,
                BulletOwner::Enemy,
            ));
        }

        let events = game.tick(Duration::from_millis(16), &ControlState::default(), &mut rng);
        assert_eq!(game.state(), GameState::Over);
        assert_eq!(game.health(), -20);
        let game_overs = events
            .iter()
            .filter(|event| matches!(event, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);

        // Nothing moves once the session is over.
        let events = game.tick(Duration::from_secs(10), &ControlState::default(), &mut rng);
        assert!(events.is_empty());
    }

    #[test]
    fn test_stars_drift_while_running() {
        let (mut game, mut rng) = running_game();
        let before: Vec<f32> = game.world().stars.iter().map(|star| star.x).collect();
        game.tick(Duration::from_millis(16), &ControlState::default(), &mut rng);
        for (star, old_x) in game.world().stars.iter().zip(before) {
            assert!(star.x < old_x || star.x == game.config().viewport.width);
        }
    }

    mod proptests {
        use super::*;
        use crate::random::ThreadRngSource;
        use proptest::prelude::*;

        fn controls_strategy() -> impl Strategy<Value = ControlState> {
            prop::array::uniform5(prop::bool::ANY).prop_map(|[up, down, left, right, fire]| {
                ControlState {
                    up,
                    down,
                    left,
                    right,
                    fire,
                }
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn test_session_invariants_hold_over_random_play(
                frames in prop::collection::vec(controls_strategy(), 1..400)
            ) {
                let mut rng = ThreadRngSource::default();
                let mut game = Game::new(GameConfig::default(), &mut rng);
                game.start(&mut rng);

                let mut health = game.health();
                let mut game_overs = 0;
                let mut now = Duration::ZERO;
                for controls in frames {
                    now += Duration::from_millis(16);
                    let was_running = game.state().is_running();
                    let events = game.tick(now, &controls, &mut rng);
                    game_overs += events
                        .iter()
                        .filter(|event| matches!(event, GameEvent::GameOver { .. }))
                        .count();

                    let player = &game.world().player;
                    prop_assert!(player.x >= 10.0 && player.x <= 160.0);
                    prop_assert!(player.y >= 10.0 && player.y <= 230.0);
                    prop_assert!(game.health() <= health);
                    if was_running {
                        prop_assert!((health - game.health()) % ENEMY_BULLET_DAMAGE == 0);
                    }
                    health = game.health();

                    for enemy in &game.world().enemies {
                        prop_assert!(enemy.matches_archetype());
                        prop_assert!(enemy.is_alive());
                    }
                }

                let expected = if game.health() <= 0 { 1 } else { 0 };
                prop_assert_eq!(game_overs, expected);
                prop_assert_eq!(game.state() == GameState::Over, game.health() <= 0);
            }
        }
    }
}
