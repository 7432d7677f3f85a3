//! Game configuration
//!
//! Every tuning constant of the arena lives here. All sections default to
//! the shipped values, so a config file only needs the fields it changes.

use arena_engine::config::Config;
use arena_engine::foundation::math::Vec3;
use arena_engine::physics::PhysicsConfig;
use serde::{Deserialize, Serialize};

/// Game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Loop timing and world parameters
    pub simulation: SimulationConfig,

    /// Avatar tuning
    pub player: PlayerConfig,

    /// Hostile tuning
    pub enemy: EnemyConfig,

    /// Spawn rules
    pub spawner: SpawnerConfig,

    /// Projectile tuning
    pub projectile: ProjectileConfig,

    /// Chase camera tuning
    pub camera: CameraConfig,
}

impl Config for GameConfig {}

impl GameConfig {
    /// Physics world parameters derived from the simulation section
    pub fn physics_config(&self) -> PhysicsConfig {
        PhysicsConfig {
            gravity: Vec3::new(0.0, -self.simulation.gravity, 0.0),
            restitution: self.simulation.restitution,
            friction: self.simulation.friction,
        }
    }
}

/// Loop timing and world parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed physics step (seconds)
    pub fixed_step: f32,

    /// Most fixed steps run per frame
    pub max_sub_steps: u32,

    /// Downward gravity magnitude
    pub gravity: f32,

    /// Contact restitution
    pub restitution: f32,

    /// Contact friction coefficient
    pub friction: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_step: 1.0 / 60.0,
            max_sub_steps: 3,
            gravity: 9.82,
            restitution: 0.0,
            friction: 0.3,
        }
    }
}

/// Avatar tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Body mass
    pub mass: f32,
    /// Sphere radius
    pub radius: f32,
    /// Height the avatar spawns at above the origin
    pub spawn_height: f32,
    /// Linear damping
    pub linear_damping: f32,
    /// Movement force magnitude
    pub move_force: f32,
    /// Horizontal speed cap
    pub max_speed: f32,
    /// Vertical velocity set by a jump
    pub jump_speed: f32,
    /// Starting and maximum health
    pub max_health: f32,
    /// Seconds between shots
    pub shoot_interval: f32,
    /// Height of the muzzle above the body centre
    pub muzzle_height: f32,
    /// Fraction of the remaining turn applied per fixed step
    pub turn_fraction: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            mass: 8.0,
            radius: 0.5,
            spawn_height: 3.0,
            linear_damping: 0.2,
            move_force: 110.0,
            max_speed: 6.0,
            jump_speed: 5.5,
            max_health: 100.0,
            shoot_interval: 0.25,
            muzzle_height: 1.2,
            turn_fraction: 0.2,
        }
    }
}

/// Hostile tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Body mass
    pub mass: f32,
    /// Sphere radius
    pub radius: f32,
    /// Linear damping
    pub linear_damping: f32,
    /// Seeking force magnitude
    pub seek_force: f32,
    /// Starting health
    pub health: f32,
    /// Damage taken per projectile hit
    pub projectile_damage: f32,
    /// Fraction of the remaining turn applied per fixed step
    pub turn_fraction: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            mass: 5.0,
            radius: 0.5,
            linear_damping: 0.15,
            seek_force: 55.0,
            health: 30.0,
            projectile_damage: 20.0,
            turn_fraction: 0.15,
        }
    }
}

/// Spawn rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Seconds between spawns
    pub interval: f32,
    /// Most hostiles alive at once
    pub max_enemies: usize,
    /// Inner spawn ring radius around the avatar
    pub ring_inner: f32,
    /// Outer spawn ring radius around the avatar
    pub ring_outer: f32,
    /// Spawn height
    pub height: f32,
    /// Squared distance under which a hostile hurts the avatar
    pub proximity_sq: f32,
    /// Damage per second dealt while in proximity
    pub contact_dps: f32,
    /// Fixed RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            interval: 2.5,
            max_enemies: 12,
            ring_inner: 10.0,
            ring_outer: 25.0,
            height: 2.0,
            proximity_sq: 1.0,
            contact_dps: 5.0,
            seed: None,
        }
    }
}

/// Projectile tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Body mass
    pub mass: f32,
    /// Sphere radius
    pub radius: f32,
    /// Linear damping
    pub linear_damping: f32,
    /// Muzzle speed
    pub speed: f32,
    /// Seconds before a projectile expires
    pub ttl: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            mass: 0.05,
            radius: 0.08,
            linear_damping: 0.01,
            speed: 22.0,
            ttl: 3.0,
        }
    }
}

/// Chase camera tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
    /// Initial camera position
    pub start_position: [f32; 3],
    /// Height above the avatar
    pub height_offset: f32,
    /// Distance behind the avatar
    pub trail_distance: f32,
    /// Fraction of the remaining gap left after one second
    pub decay_base: f32,
    /// Height above the avatar the camera looks at
    pub look_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.1,
            far: 500.0,
            start_position: [0.0, 2.0, 6.0],
            height_offset: 2.5,
            trail_distance: 6.0,
            decay_base: 0.001,
            look_height: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_config_matches_defaults() {
        let shipped: GameConfig = ron::from_str(include_str!("../config/arena.ron")).unwrap();
        assert_eq!(shipped, GameConfig::default());
    }

    #[test]
    fn test_partial_ron_keeps_other_defaults() {
        let config: GameConfig = ron::from_str("(spawner: (max_enemies: 3, seed: Some(7)))").unwrap();

        assert_eq!(config.spawner.max_enemies, 3);
        assert_eq!(config.spawner.seed, Some(7));
        assert_eq!(config.spawner.interval, 2.5);
        assert_eq!(config.player, PlayerConfig::default());
    }

    #[test]
    fn test_physics_config_points_gravity_down() {
        let physics = GameConfig::default().physics_config();
        assert_eq!(physics.gravity, Vec3::new(0.0, -9.82, 0.0));
        assert_eq!(physics.friction, 0.3);
    }
}
