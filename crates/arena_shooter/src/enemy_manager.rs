//! Hostile spawning and bookkeeping

use arena_engine::foundation::math::{constants, Vec3};
use arena_engine::physics::ContactEvent;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{EnemyConfig, SpawnerConfig};
use crate::enemy::Enemy;
use crate::entity::Arena;
use crate::hud::Hud;
use crate::player::Player;

/// Owns every live hostile and the spawn timer
pub struct EnemyManager {
    enemies: Vec<Enemy>,
    countdown: f32,
    rng: StdRng,
    spawner: SpawnerConfig,
    enemy: EnemyConfig,
}

impl EnemyManager {
    /// Create an empty manager; the first spawn happens on the first fixed step
    pub fn new(spawner: SpawnerConfig, enemy: EnemyConfig) -> Self {
        let rng = match spawner.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            enemies: Vec::new(),
            countdown: 0.0,
            rng,
            spawner,
            enemy,
        }
    }

    /// Number of live hostiles
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Whether no hostiles are alive
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Live hostiles in spawn order
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Seconds until the next spawn attempt
    pub fn countdown(&self) -> f32 {
        self.countdown
    }

    /// Spawn a hostile at `position` unless the cap is reached
    pub fn spawn_at(&mut self, arena: &mut Arena, position: Vec3) -> bool {
        if self.enemies.len() >= self.spawner.max_enemies {
            return false;
        }
        self.enemies.push(Enemy::new(arena, &self.enemy, position));
        true
    }

    /// Forward contact events to every hostile
    pub fn handle_contacts(&mut self, arena: &mut Arena, events: &[ContactEvent]) {
        for enemy in &mut self.enemies {
            enemy.handle_contacts(arena, events);
        }
    }

    /// Spawn on schedule, steer every hostile, apply proximity damage, purge the dead
    pub fn fixed_update<H: Hud>(&mut self, dt: f32, arena: &mut Arena, player: &mut Player, hud: &mut H) {
        let avatar = player.position(arena);

        self.countdown -= dt;
        if self.countdown <= 0.0 && self.enemies.len() < self.spawner.max_enemies {
            let position = self.ring_position(avatar);
            if self.spawn_at(arena, position) {
                self.countdown = self.spawner.interval;
            }
        }

        for enemy in &mut self.enemies {
            enemy.fixed_update(arena, avatar);
        }

        let contact_damage = self.spawner.contact_dps * dt;
        for enemy in &self.enemies {
            let close = enemy
                .position(arena)
                .is_some_and(|position| (position - avatar).norm_squared() < self.spawner.proximity_sq);
            if close {
                player.take_damage(contact_damage, hud);
            }
        }

        self.purge(arena);
    }

    /// Variable-rate hook; hostiles have no per-frame work
    pub fn update(&mut self, _dt: f32) {}

    /// Dispose every hostile
    pub fn clear(&mut self, arena: &mut Arena) {
        for enemy in &mut self.enemies {
            enemy.dispose(arena);
        }
        self.enemies.clear();
    }

    fn ring_position(&mut self, center: Vec3) -> Vec3 {
        let angle = self.rng.gen_range(0.0..constants::TAU);
        let (inner, outer) = (self.spawner.ring_inner, self.spawner.ring_outer);
        let radius = if outer > inner { self.rng.gen_range(inner..outer) } else { inner };
        Vec3::new(
            center.x + angle.cos() * radius,
            self.spawner.height,
            center.z + angle.sin() * radius,
        )
    }

    fn purge(&mut self, arena: &mut Arena) {
        for enemy in self.enemies.iter_mut().filter(|enemy| enemy.is_dead()) {
            enemy.dispose(arena);
        }
        self.enemies.retain(|enemy| !enemy.is_dead());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlayerConfig, ProjectileConfig};
    use crate::hud::LogHud;
    use approx::assert_relative_eq;
    use arena_engine::foundation::math::utils;
    use arena_engine::physics::PhysicsConfig;

    const DT: f32 = 1.0 / 60.0;

    fn setup(spawner: SpawnerConfig) -> (Arena, Player, EnemyManager) {
        let mut arena = Arena::new(PhysicsConfig { gravity: Vec3::zeros(), ..Default::default() });
        let player = Player::new(&mut arena, PlayerConfig::default(), ProjectileConfig::default());
        let manager = EnemyManager::new(spawner, EnemyConfig::default());
        (arena, player, manager)
    }

    fn seeded() -> SpawnerConfig {
        SpawnerConfig { seed: Some(42), ..Default::default() }
    }

    #[test]
    fn test_spawns_on_ring_around_avatar() {
        let (mut arena, mut player, mut manager) = setup(seeded());
        let mut hud = LogHud::new();

        manager.fixed_update(DT, &mut arena, &mut player, &mut hud);
        assert_eq!(manager.len(), 1);
        assert_relative_eq!(manager.countdown(), 2.5);

        // Next spawn is one 2.5s interval later at 60Hz
        for _ in 0..148 {
            manager.fixed_update(DT, &mut arena, &mut player, &mut hud);
        }
        assert_eq!(manager.len(), 1);
        for _ in 0..4 {
            manager.fixed_update(DT, &mut arena, &mut player, &mut hud);
        }
        assert_eq!(manager.len(), 2);

        let position = manager.enemies()[0].position(&arena).unwrap();
        let offset = utils::horizontal(&(position - player.position(&arena)));
        assert!((9.999..=25.001).contains(&offset.norm()));
        assert_relative_eq!(position.y, 2.0);
    }

    #[test]
    fn test_never_exceeds_cap() {
        let spawner = SpawnerConfig { interval: 0.01, max_enemies: 4, ..seeded() };
        let (mut arena, mut player, mut manager) = setup(spawner);
        let mut hud = LogHud::new();

        for _ in 0..120 {
            manager.fixed_update(DT, &mut arena, &mut player, &mut hud);
            assert!(manager.len() <= 4);
        }
        assert_eq!(manager.len(), 4);
        assert!(!manager.spawn_at(&mut arena, Vec3::zeros()));
        assert!(manager.countdown() <= 0.0);
    }

    #[test]
    fn test_proximity_damages_avatar() {
        let (mut arena, mut player, mut manager) = setup(seeded());
        let mut hud = LogHud::new();
        let avatar = player.position(&arena);
        assert!(manager.spawn_at(&mut arena, avatar + Vec3::new(0.5, 0.0, 0.0)));

        manager.fixed_update(DT, &mut arena, &mut player, &mut hud);

        assert_relative_eq!(player.health(), 100.0 - 5.0 * DT, epsilon = 1e-4);
        assert!(hud.health01() < 1.0);
    }

    #[test]
    fn test_dead_hostiles_are_purged() {
        // Full cap keeps the scheduled spawn out of the way
        let spawner = SpawnerConfig { max_enemies: 2, ..seeded() };
        let (mut arena, mut player, mut manager) = setup(spawner);
        let mut hud = LogHud::new();
        manager.spawn_at(&mut arena, Vec3::new(20.0, 2.0, 0.0));
        manager.spawn_at(&mut arena, Vec3::new(-20.0, 2.0, 0.0));
        manager.enemies[0].take_damage(&mut arena, 100.0);

        manager.fixed_update(DT, &mut arena, &mut player, &mut hud);

        assert_eq!(manager.len(), 1);
        assert_eq!(arena.physics.body_count(), 2);

        manager.clear(&mut arena);
        assert!(manager.is_empty());
        assert_eq!(arena.scene.len(), 1);
    }
}
