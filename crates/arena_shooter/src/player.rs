//! The player-controlled avatar

use arena_engine::foundation::math::{model_forward, utils, world_up, Vec3, DIRECTION_EPSILON};
use arena_engine::input::InputSource;
use arena_engine::physics::{contacts_of, BodyKind, ContactEvent, ContactPhase, RigidBodyDesc};
use arena_engine::render::Camera;
use arena_engine::scene::{MeshShape, NodeDesc};

use crate::config::{PlayerConfig, ProjectileConfig};
use crate::entity::{Arena, EntityHandles};
use crate::hud::Hud;
use crate::projectile::Projectile;

const PLAYER_COLOR: [f32; 3] = [0.2, 0.55, 0.95];

/// Camera-relative movement, jumping and shooting
///
/// The avatar is never disposed during a session; reaching zero health is
/// reported through [`Player::is_dead`] and left to the host.
#[derive(Debug)]
pub struct Player {
    handles: EntityHandles,
    tuning: PlayerConfig,
    projectile_tuning: ProjectileConfig,
    health: f32,
    /// Ground bodies currently touching the avatar
    ground_contacts: u32,
    cooldown: f32,
    projectiles: Vec<Projectile>,
    death_reported: bool,
}

impl Player {
    /// Spawn the avatar above the arena origin
    pub fn new(arena: &mut Arena, tuning: PlayerConfig, projectile_tuning: ProjectileConfig) -> Self {
        let spawn = Vec3::new(0.0, tuning.spawn_height, 0.0);
        let handles = arena.spawn(
            RigidBodyDesc::sphere(BodyKind::Avatar, tuning.mass, tuning.radius)
                .with_position(spawn)
                .with_linear_damping(tuning.linear_damping),
            NodeDesc::new(
                MeshShape::Capsule { radius: tuning.radius, length: tuning.radius * 2.0 },
                PLAYER_COLOR,
            )
            .at(spawn),
        );

        Self {
            handles,
            health: tuning.max_health,
            tuning,
            projectile_tuning,
            ground_contacts: 0,
            cooldown: 0.0,
            projectiles: Vec::new(),
            death_reported: false,
        }
    }

    /// Resource handles
    pub fn handles(&self) -> EntityHandles {
        self.handles
    }

    /// Current position
    pub fn position(&self, arena: &Arena) -> Vec3 {
        self.handles.position(arena).unwrap_or_else(Vec3::zeros)
    }

    /// Horizontal unit facing direction
    pub fn forward(&self, arena: &Arena) -> Vec3 {
        self.handles
            .facing(arena)
            .map_or_else(model_forward, |facing| utils::flat_forward(&facing))
    }

    /// Remaining health
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Seconds until the next shot is allowed
    pub fn shoot_cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Health as a fraction of the maximum
    pub fn health_fraction(&self) -> f32 {
        if self.tuning.max_health > 0.0 {
            self.health / self.tuning.max_health
        } else {
            0.0
        }
    }

    /// Whether at least one ground body is touching
    pub fn is_grounded(&self) -> bool {
        self.ground_contacts > 0
    }

    /// Whether health has reached zero
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Live projectiles fired by the avatar
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Track ground contacts, then let owned projectiles react
    pub fn handle_contacts(&mut self, arena: &mut Arena, events: &[ContactEvent]) {
        for contact in contacts_of(events, self.handles.body()) {
            if contact.other_kind != BodyKind::Ground {
                continue;
            }
            match contact.phase {
                ContactPhase::Began => self.ground_contacts += 1,
                ContactPhase::Ended => self.ground_contacts = self.ground_contacts.saturating_sub(1),
            }
        }

        for projectile in &mut self.projectiles {
            projectile.handle_contacts(arena, events);
        }
    }

    /// One simulation step of movement, jumping and shooting
    pub fn fixed_update<I: InputSource>(&mut self, dt: f32, arena: &mut Arena, input: &I, camera: &Camera) {
        if self.cooldown > 0.0 {
            self.cooldown -= dt;
        }

        let axis = input.move_axis();
        let forward = utils::horizontal_direction(&camera.forward()).unwrap_or_else(|| self.forward(arena));
        let right = forward.cross(&world_up());
        let wish = (forward * axis.y + right * axis.x).try_normalize(DIRECTION_EPSILON);

        let body_handle = self.handles.body();
        if let Some(direction) = wish {
            arena.physics.apply_force(body_handle, direction * self.tuning.move_force);
        }

        if let Some(body) = arena.physics.body_mut(body_handle) {
            let speed = utils::horizontal_speed(&body.velocity);
            if speed > self.tuning.max_speed {
                let scale = self.tuning.max_speed / speed;
                body.velocity.x *= scale;
                body.velocity.z *= scale;
            }

            if self.is_grounded() && input.is_jumping() {
                body.velocity.y = self.tuning.jump_speed;
                self.ground_contacts = 0;
            }
        }

        if input.is_shooting() && self.cooldown <= 0.0 {
            self.shoot(arena);
            self.cooldown = self.tuning.shoot_interval;
        }

        for projectile in &mut self.projectiles {
            projectile.fixed_update(dt, arena);
        }

        self.handles.sync(arena);
        if let Some(direction) = wish {
            self.handles.turn_towards(arena, &direction, self.tuning.turn_fraction);
        }
    }

    /// Sync projectile visuals and drop the dead ones
    pub fn update(&mut self, _dt: f32, arena: &mut Arena) {
        for projectile in &mut self.projectiles {
            projectile.update(arena);
        }
        self.projectiles.retain(|projectile| !projectile.is_disposed());
    }

    /// Lose health (clamped at zero) and report it
    pub fn take_damage<H: Hud>(&mut self, amount: f32, hud: &mut H) {
        self.health = (self.health - amount).max(0.0);
        hud.set_health01(self.health_fraction());

        if self.is_dead() && !self.death_reported {
            self.death_reported = true;
            log::info!("Player died");
        }
    }

    /// Regain health (clamped at the maximum) and report it
    pub fn heal<H: Hud>(&mut self, amount: f32, hud: &mut H) {
        self.health = (self.health + amount.max(0.0)).min(self.tuning.max_health);
        hud.set_health01(self.health_fraction());
    }

    fn shoot(&mut self, arena: &mut Arena) {
        let muzzle = self.position(arena) + world_up() * self.tuning.muzzle_height;
        let direction = self.forward(arena);
        self.projectiles.push(Projectile::new(arena, &self.projectile_tuning, muzzle, direction));
    }
}
