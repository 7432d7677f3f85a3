//! Rigid bodies and their construction parameters

use super::collision_layers::CollisionLayers;
use crate::foundation::math::{Quat, Vec3};

/// Explicit classification carried by every body
///
/// Gameplay code reacts to contacts by looking at the other body's kind,
/// never by inferring it from mass or size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Static walkable surface
    Ground,
    /// The player-controlled avatar
    Avatar,
    /// A seeking enemy
    Hostile,
    /// A fired projectile
    Projectile,
}

impl BodyKind {
    /// Layer a body of this kind lives on
    pub fn layer(self) -> CollisionLayers {
        match self {
            Self::Ground => CollisionLayers::ENVIRONMENT,
            Self::Avatar => CollisionLayers::PLAYER,
            Self::Hostile => CollisionLayers::ENEMY,
            Self::Projectile => CollisionLayers::PROJECTILE,
        }
    }

    /// Layers a body of this kind collides with by default
    ///
    /// The avatar and its own projectiles ignore each other.
    pub fn default_mask(self) -> CollisionLayers {
        match self {
            Self::Ground | Self::Hostile => CollisionLayers::all(),
            Self::Avatar => CollisionLayers::all().difference(CollisionLayers::PROJECTILE),
            Self::Projectile => CollisionLayers::all().difference(CollisionLayers::PLAYER),
        }
    }
}

/// Collision geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Sphere centred on the body position
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Infinite plane: all points `p` with `normal · p = offset`
    Plane {
        /// Unit normal pointing out of the solid half-space
        normal: Vec3,
        /// Distance of the plane from the origin along `normal`
        offset: f32,
    },
}

/// A simulated rigid body
///
/// Only translation is simulated; `orientation` is carried for collaborators
/// that want it but contacts never spin a body.
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// Gameplay classification
    pub kind: BodyKind,
    /// Collision geometry
    pub shape: Shape,
    /// Mass in kilograms (0 = static)
    pub mass: f32,
    /// World-space position
    pub position: Vec3,
    /// Linear velocity in units per second
    pub velocity: Vec3,
    /// World-space orientation
    pub orientation: Quat,
    /// Fraction of velocity lost per second
    pub linear_damping: f32,
    /// Layer this body lives on
    pub layer: CollisionLayers,
    /// Layers this body collides with
    pub mask: CollisionLayers,
    force: Vec3,
}

impl RigidBody {
    fn from_desc(desc: RigidBodyDesc) -> Self {
        Self {
            kind: desc.kind,
            shape: desc.shape,
            mass: desc.mass.max(0.0),
            position: desc.position,
            velocity: desc.velocity,
            orientation: Quat::identity(),
            linear_damping: desc.linear_damping.clamp(0.0, 1.0),
            layer: desc.kind.layer(),
            mask: desc.mask.unwrap_or_else(|| desc.kind.default_mask()),
            force: Vec3::zeros(),
        }
    }

    /// Whether the body is immovable
    pub fn is_static(&self) -> bool {
        self.mass <= 0.0
    }

    /// Inverse mass (0 for static bodies)
    pub fn inverse_mass(&self) -> f32 {
        if self.is_static() {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Accumulate a force (Newtons) applied at the centre of mass until the next step
    pub fn apply_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// Force accumulated since the last step
    pub fn accumulated_force(&self) -> Vec3 {
        self.force
    }

    /// Integrate forces, gravity and damping over `dt`, then clear the force accumulator
    pub(super) fn integrate(&mut self, gravity: &Vec3, dt: f32) {
        if self.is_static() {
            self.force = Vec3::zeros();
            return;
        }

        let acceleration = self.force * self.inverse_mass() + gravity;
        self.velocity += acceleration * dt;
        self.velocity *= (1.0 - self.linear_damping).powf(dt);
        self.position += self.velocity * dt;
        self.force = Vec3::zeros();
    }
}

/// Construction parameters for a [`RigidBody`]
#[derive(Debug, Clone)]
pub struct RigidBodyDesc {
    kind: BodyKind,
    shape: Shape,
    mass: f32,
    position: Vec3,
    velocity: Vec3,
    linear_damping: f32,
    mask: Option<CollisionLayers>,
}

impl RigidBodyDesc {
    /// A dynamic sphere of the given mass and radius at the origin
    pub fn sphere(kind: BodyKind, mass: f32, radius: f32) -> Self {
        Self {
            kind,
            shape: Shape::Sphere { radius },
            mass,
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            linear_damping: 0.0,
            mask: None,
        }
    }

    /// A static infinite plane
    pub fn plane(kind: BodyKind, normal: Vec3, offset: f32) -> Self {
        Self {
            kind,
            shape: Shape::Plane {
                normal: normal.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::y),
                offset,
            },
            mass: 0.0,
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            linear_damping: 0.0,
            mask: None,
        }
    }

    /// Set the initial position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the linear damping (clamped to `[0, 1]`)
    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    /// Override the collision mask implied by the body kind
    pub fn with_mask(mut self, mask: CollisionLayers) -> Self {
        self.mask = Some(mask);
        self
    }

    pub(super) fn build(self) -> RigidBody {
        RigidBody::from_desc(self)
    }
}
