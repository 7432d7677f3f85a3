//! Projectiles fired by the avatar

use arena_engine::foundation::math::Vec3;
use arena_engine::physics::{contacts_of, BodyKind, ContactEvent, ContactPhase, RigidBodyDesc};
use arena_engine::scene::{MeshShape, NodeDesc};

use crate::config::ProjectileConfig;
use crate::entity::{Arena, EntityHandles};

const PROJECTILE_COLOR: [f32; 3] = [1.0, 0.85, 0.2];

/// A short-lived ballistic sphere
///
/// Dies on its first contact with anything or when its time-to-live runs
/// out. Damage is applied by whatever it hits, not by the projectile.
#[derive(Debug)]
pub struct Projectile {
    handles: EntityHandles,
    ttl: f32,
    disposed: bool,
}

impl Projectile {
    /// Fire from `origin` along the unit vector `direction`
    pub fn new(arena: &mut Arena, config: &ProjectileConfig, origin: Vec3, direction: Vec3) -> Self {
        let handles = arena.spawn(
            RigidBodyDesc::sphere(BodyKind::Projectile, config.mass, config.radius)
                .with_position(origin)
                .with_velocity(direction * config.speed)
                .with_linear_damping(config.linear_damping),
            NodeDesc::new(MeshShape::Sphere { radius: config.radius }, PROJECTILE_COLOR).at(origin),
        );
        log::trace!("Projectile fired from {:?}", origin);

        Self { handles, ttl: config.ttl, disposed: false }
    }

    /// Resource handles
    pub fn handles(&self) -> EntityHandles {
        self.handles
    }

    /// Seconds left before expiry
    pub fn ttl(&self) -> f32 {
        self.ttl
    }

    /// Whether the projectile has been destroyed
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Dispose on the first contact of any kind
    pub fn handle_contacts(&mut self, arena: &mut Arena, events: &[ContactEvent]) {
        if self.disposed {
            return;
        }
        let hit = contacts_of(events, self.handles.body()).find(|contact| contact.phase == ContactPhase::Began);
        if let Some(contact) = hit {
            log::trace!("Projectile hit {:?}", contact.other_kind);
            self.dispose(arena);
        }
    }

    /// Count down the time-to-live
    pub fn fixed_update(&mut self, dt: f32, arena: &mut Arena) {
        if self.disposed {
            return;
        }
        self.ttl -= dt;
        if self.ttl <= 0.0 {
            log::trace!("Projectile expired");
            self.dispose(arena);
        }
    }

    /// Push the body position to the visual
    pub fn update(&mut self, arena: &mut Arena) {
        if !self.disposed {
            self.handles.sync(arena);
        }
    }

    /// Release both resources (idempotent)
    pub fn dispose(&mut self, arena: &mut Arena) {
        if self.disposed {
            return;
        }
        self.handles.release(arena);
        self.disposed = true;
    }
}
