//! Seeking hostiles

use arena_engine::foundation::math::{utils, Vec3};
use arena_engine::physics::{contacts_of, BodyKind, ContactEvent, ContactPhase, RigidBodyDesc};
use arena_engine::scene::{MeshShape, NodeDesc};

use crate::config::EnemyConfig;
use crate::entity::{Arena, EntityHandles};

const ENEMY_COLOR: [f32; 3] = [0.85, 0.15, 0.2];

/// A hostile that pushes itself toward the avatar
#[derive(Debug)]
pub struct Enemy {
    handles: EntityHandles,
    health: f32,
    seek_force: f32,
    projectile_damage: f32,
    turn_fraction: f32,
    disposed: bool,
}

impl Enemy {
    /// Spawn a hostile at `position`
    pub fn new(arena: &mut Arena, config: &EnemyConfig, position: Vec3) -> Self {
        let handles = arena.spawn(
            RigidBodyDesc::sphere(BodyKind::Hostile, config.mass, config.radius)
                .with_position(position)
                .with_linear_damping(config.linear_damping),
            NodeDesc::new(MeshShape::Icosahedron { radius: config.radius }, ENEMY_COLOR).at(position),
        );
        log::debug!("Enemy spawned at {:?}", position);

        Self {
            handles,
            health: config.health,
            seek_force: config.seek_force,
            projectile_damage: config.projectile_damage,
            turn_fraction: config.turn_fraction,
            disposed: false,
        }
    }

    /// Resource handles
    pub fn handles(&self) -> EntityHandles {
        self.handles
    }

    /// Remaining health
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Current position, `None` once disposed
    pub fn position(&self, arena: &Arena) -> Option<Vec3> {
        if self.disposed {
            None
        } else {
            self.handles.position(arena)
        }
    }

    /// Whether health ran out or the hostile was disposed
    pub fn is_dead(&self) -> bool {
        self.disposed || self.health <= 0.0
    }

    /// Whether the resources have been released
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Take projectile damage for every projectile that started touching this step
    pub fn handle_contacts(&mut self, arena: &mut Arena, events: &[ContactEvent]) {
        let hits = contacts_of(events, self.handles.body())
            .filter(|contact| contact.phase == ContactPhase::Began && contact.other_kind == BodyKind::Projectile)
            .count();
        for _ in 0..hits {
            self.take_damage(arena, self.projectile_damage);
        }
    }

    /// Push toward the avatar and turn to face it
    pub fn fixed_update(&mut self, arena: &mut Arena, avatar_position: Vec3) {
        if self.disposed {
            return;
        }
        let Some(position) = self.handles.position(arena) else {
            return;
        };

        if let Some(direction) = utils::horizontal_direction(&(avatar_position - position)) {
            arena.physics.apply_force(self.handles.body(), direction * self.seek_force);
            self.handles.turn_towards(arena, &direction, self.turn_fraction);
        }
        self.handles.sync(arena);
    }

    /// Lose health; dies at zero. Ignored once disposed.
    pub fn take_damage(&mut self, arena: &mut Arena, amount: f32) {
        if self.disposed {
            return;
        }
        self.health -= amount;
        if self.health <= 0.0 {
            self.dispose(arena);
        }
    }

    /// Release both resources (idempotent)
    pub fn dispose(&mut self, arena: &mut Arena) {
        if self.disposed {
            return;
        }
        self.handles.release(arena);
        self.disposed = true;
        log::debug!("Enemy destroyed (health {:.1})", self.health);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use arena_engine::physics::PhysicsConfig;

    fn arena() -> Arena {
        Arena::new(PhysicsConfig { gravity: Vec3::zeros(), ..Default::default() })
    }

    #[test]
    fn test_damage_after_dispose_is_ignored() {
        let mut arena = arena();
        let mut enemy = Enemy::new(&mut arena, &EnemyConfig::default(), Vec3::zeros());
        assert_relative_eq!(enemy.health(), 30.0);

        enemy.take_damage(&mut arena, 20.0);
        assert_relative_eq!(enemy.health(), 10.0);
        assert!(!enemy.is_dead());

        enemy.dispose(&mut arena);
        enemy.take_damage(&mut arena, 20.0);
        assert_relative_eq!(enemy.health(), 10.0);
        assert!(enemy.is_dead());
        assert!(arena.scene.is_empty());
    }

    #[test]
    fn test_lethal_damage_disposes() {
        let mut arena = arena();
        let mut enemy = Enemy::new(&mut arena, &EnemyConfig::default(), Vec3::zeros());

        enemy.take_damage(&mut arena, 20.0);
        enemy.take_damage(&mut arena, 20.0);

        assert!(enemy.is_disposed());
        assert_eq!(arena.physics.body_count(), 0);
        assert!(enemy.position(&arena).is_none());
    }

    #[test]
    fn test_seeks_horizontally_and_faces_target() {
        let mut arena = arena();
        let mut enemy = Enemy::new(&mut arena, &EnemyConfig::default(), Vec3::new(0.0, 2.0, 0.0));
        let avatar = Vec3::new(10.0, 0.0, 0.0);

        for _ in 0..30 {
            enemy.fixed_update(&mut arena, avatar);
            arena.physics.step(1.0 / 60.0);
        }

        let body = arena.physics.body(enemy.handles().body()).unwrap();
        assert!(body.velocity.x > 0.0);
        assert_relative_eq!(body.velocity.y, 0.0);
        let facing = enemy.handles().facing(&arena).unwrap();
        assert!(utils::flat_forward(&facing).x > 0.9);
    }

    #[test]
    fn test_projectile_contact_deals_damage() {
        let mut arena = arena();
        let mut enemy = Enemy::new(&mut arena, &EnemyConfig::default(), Vec3::zeros());
        arena.physics.add_body(
            RigidBodyDesc::sphere(BodyKind::Projectile, 0.05, 0.08).with_position(Vec3::new(0.5, 0.0, 0.0)),
        );
        arena.physics.add_body(
            RigidBodyDesc::sphere(BodyKind::Hostile, 5.0, 0.5).with_position(Vec3::new(-0.9, 0.0, 0.0)),
        );

        arena.physics.step(1.0 / 60.0);
        let events = arena.physics.take_contact_events();
        enemy.handle_contacts(&mut arena, &events);

        assert_relative_eq!(enemy.health(), 10.0);
    }
}
