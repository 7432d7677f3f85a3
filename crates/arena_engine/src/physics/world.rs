//! Rigid-body world
//!
//! Detection is split into the usual two phases: a broad phase that pairs up
//! bodies whose layers accept each other (skipping static/static pairs), and a
//! narrow phase that tests the actual shapes. Touching pairs are resolved in
//! place, then compared against the previous step's pairs to produce
//! `Began`/`Ended` contact events.

use std::collections::HashMap;

use slotmap::SlotMap;

use super::body::{RigidBody, RigidBodyDesc, Shape};
use super::collision_layers::CollisionLayers;
use super::contact::{ContactEvent, ContactPhase};
use crate::foundation::math::Vec3;

/// Penetration left uncorrected so resting contacts stay touching
const PENETRATION_SLOP: f32 = 0.01;

/// Share of the remaining penetration removed per step
const CORRECTION_FRACTION: f32 = 0.8;

slotmap::new_key_type! {
    /// Stable handle to a body registered in a [`PhysicsWorld`]
    pub struct BodyHandle;
}

/// Global simulation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    /// Gravity acceleration applied to every dynamic body
    pub gravity: Vec3,
    /// Bounciness of contacts (0 = perfectly inelastic)
    pub restitution: f32,
    /// Coulomb friction coefficient for contacts
    pub friction: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.82, 0.0),
            restitution: 0.0,
            friction: 0.3,
        }
    }
}

/// Unordered body pair, stored with the smaller handle first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct BodyPair {
    a: BodyHandle,
    b: BodyHandle,
}

impl BodyPair {
    fn new(a: BodyHandle, b: BodyHandle) -> Self {
        if a < b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    fn contains(&self, body: BodyHandle) -> bool {
        self.a == body || self.b == body
    }
}

/// Narrow-phase result for one touching pair
#[derive(Debug, Clone, Copy)]
struct Manifold {
    /// Points from the first body toward the second
    normal: Vec3,
    depth: f32,
}

/// Container and integrator for all rigid bodies
pub struct PhysicsWorld {
    config: PhysicsConfig,
    bodies: SlotMap<BodyHandle, RigidBody>,
    /// Touching pairs from the current step, with their last contact normal
    current_pairs: HashMap<BodyPair, Vec3>,
    /// Touching pairs from the previous step
    previous_pairs: HashMap<BodyPair, Vec3>,
    events: Vec<ContactEvent>,
    step_count: u64,
}

impl PhysicsWorld {
    /// Create an empty world
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            bodies: SlotMap::with_key(),
            current_pairs: HashMap::new(),
            previous_pairs: HashMap::new(),
            events: Vec::new(),
            step_count: 0,
        }
    }

    /// Simulation parameters
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Register a new body and return its handle
    pub fn add_body(&mut self, desc: RigidBodyDesc) -> BodyHandle {
        let body = desc.build();
        let kind = body.kind;
        let handle = self.bodies.insert(body);
        log::trace!("Added {:?} body {:?}", kind, handle);
        handle
    }

    /// Remove a body; its pairs are forgotten without emitting `Ended` events
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let body = self.bodies.remove(handle)?;
        self.current_pairs.retain(|pair, _| !pair.contains(handle));
        self.previous_pairs.retain(|pair, _| !pair.contains(handle));
        log::trace!("Removed {:?} body {:?}", body.kind, handle);
        Some(body)
    }

    /// Look up a body
    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    /// Look up a body mutably
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    /// Accumulate a force on a body until the next step (no-op for unknown handles)
    pub fn apply_force(&mut self, handle: BodyHandle, force: Vec3) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.apply_force(force);
        }
    }

    /// Whether a handle still refers to a registered body
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains_key(handle)
    }

    /// Number of registered bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of steps taken so far
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Contact events produced by the most recent step
    pub fn contact_events(&self) -> &[ContactEvent] {
        &self.events
    }

    /// Take ownership of the most recent step's contact events
    pub fn take_contact_events(&mut self) -> Vec<ContactEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance the simulation by exactly `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.events.clear();

        let gravity = self.config.gravity;
        for body in self.bodies.values_mut() {
            body.integrate(&gravity, dt);
        }

        std::mem::swap(&mut self.current_pairs, &mut self.previous_pairs);
        self.current_pairs.clear();

        for pair in self.broad_phase() {
            if let Some(manifold) = self.narrow_phase(pair) {
                self.resolve(pair, manifold);
                self.current_pairs.insert(pair, manifold.normal);
            }
        }

        self.emit_events();
        self.step_count += 1;
    }

    /// Pairs whose layers accept each other and that are not both static
    fn broad_phase(&self) -> Vec<BodyPair> {
        let handles: Vec<BodyHandle> = self.bodies.keys().collect();
        let mut pairs = Vec::new();

        for (i, &first) in handles.iter().enumerate() {
            for &second in &handles[i + 1..] {
                let (a, b) = (&self.bodies[first], &self.bodies[second]);
                if a.is_static() && b.is_static() {
                    continue;
                }
                if !CollisionLayers::should_collide(a.layer, a.mask, b.layer, b.mask) {
                    continue;
                }
                pairs.push(BodyPair::new(first, second));
            }
        }

        pairs
    }

    /// Shape test for one pair (touching counts as contact)
    fn narrow_phase(&self, pair: BodyPair) -> Option<Manifold> {
        let a = self.bodies.get(pair.a)?;
        let b = self.bodies.get(pair.b)?;

        match (a.shape, b.shape) {
            (Shape::Sphere { radius: ra }, Shape::Sphere { radius: rb }) => {
                let delta = b.position - a.position;
                let distance = delta.magnitude();
                let radius_sum = ra + rb;
                if distance > radius_sum {
                    return None;
                }
                let normal = delta.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::y);
                Some(Manifold { normal, depth: radius_sum - distance })
            }
            (Shape::Sphere { radius }, Shape::Plane { normal, offset }) => {
                let separation = normal.dot(&a.position) - offset;
                (separation <= radius).then(|| Manifold { normal: -normal, depth: radius - separation })
            }
            (Shape::Plane { normal, offset }, Shape::Sphere { radius }) => {
                let separation = normal.dot(&b.position) - offset;
                (separation <= radius).then(|| Manifold { normal, depth: radius - separation })
            }
            (Shape::Plane { .. }, Shape::Plane { .. }) => None,
        }
    }

    /// Push the pair apart and cancel approaching velocity (with friction)
    fn resolve(&mut self, pair: BodyPair, manifold: Manifold) {
        let (Some(a), Some(b)) = (self.bodies.get(pair.a), self.bodies.get(pair.b)) else {
            return;
        };
        let (wa, wb) = (a.inverse_mass(), b.inverse_mass());
        let total = wa + wb;
        if total <= 0.0 {
            return;
        }

        // Inverse-mass weighting leaves static bodies untouched
        let n = manifold.normal;
        let depth = (manifold.depth - PENETRATION_SLOP).max(0.0) * CORRECTION_FRACTION;
        let correction = n * (depth / total);
        let position_a = a.position - correction * wa;
        let position_b = b.position + correction * wb;
        let mut velocity_a = a.velocity;
        let mut velocity_b = b.velocity;

        let approach = (velocity_b - velocity_a).dot(&n);
        if approach < 0.0 {
            let impulse = -(1.0 + self.config.restitution) * approach / total;
            velocity_a -= n * (impulse * wa);
            velocity_b += n * (impulse * wb);

            let relative = velocity_b - velocity_a;
            let tangential = relative - n * relative.dot(&n);
            let slip = tangential.magnitude();
            if let Some(tangent) = tangential.try_normalize(1.0e-6) {
                let friction_impulse = (slip / total).min(self.config.friction * impulse);
                velocity_a += tangent * (friction_impulse * wa);
                velocity_b -= tangent * (friction_impulse * wb);
            }
        }

        if let Some(a) = self.bodies.get_mut(pair.a) {
            a.position = position_a;
            a.velocity = velocity_a;
        }
        if let Some(b) = self.bodies.get_mut(pair.b) {
            b.position = position_b;
            b.velocity = velocity_b;
        }
    }

    /// Diff current against previous pairs into ordered contact events
    fn emit_events(&mut self) {
        let mut began: Vec<(BodyPair, Vec3)> = self
            .current_pairs
            .iter()
            .filter(|(pair, _)| !self.previous_pairs.contains_key(*pair))
            .map(|(pair, normal)| (*pair, *normal))
            .collect();
        let mut ended: Vec<(BodyPair, Vec3)> = self
            .previous_pairs
            .iter()
            .filter(|(pair, _)| !self.current_pairs.contains_key(*pair))
            .map(|(pair, normal)| (*pair, *normal))
            .collect();
        began.sort_by_key(|(pair, _)| *pair);
        ended.sort_by_key(|(pair, _)| *pair);

        let phases = began
            .into_iter()
            .map(|entry| (entry, ContactPhase::Began))
            .chain(ended.into_iter().map(|entry| (entry, ContactPhase::Ended)));

        for ((pair, normal), phase) in phases {
            let (Some(a), Some(b)) = (self.bodies.get(pair.a), self.bodies.get(pair.b)) else {
                continue;
            };
            self.events.push(ContactEvent {
                body_a: pair.a,
                kind_a: a.kind,
                body_b: pair.b,
                kind_b: b.kind,
                normal,
                phase,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::BodyKind;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn world_with_ground() -> (PhysicsWorld, BodyHandle) {
        let mut world = PhysicsWorld::new(PhysicsConfig::default());
        let ground = world.add_body(RigidBodyDesc::plane(BodyKind::Ground, Vec3::y(), 0.0));
        (world, ground)
    }

    #[test]
    fn test_free_fall() {
        let mut world = PhysicsWorld::new(PhysicsConfig::default());
        let ball = world.add_body(
            RigidBodyDesc::sphere(BodyKind::Hostile, 1.0, 0.5).with_position(Vec3::new(0.0, 10.0, 0.0)),
        );

        world.step(DT);

        let body = world.body(ball).unwrap();
        assert_relative_eq!(body.velocity.y, -9.82 * DT, epsilon = 1e-5);
        assert!(body.position.y < 10.0);
        assert!(world.contact_events().is_empty());
    }

    #[test]
    fn test_sphere_comes_to_rest_on_ground() {
        let (mut world, ground) = world_with_ground();
        let ball = world.add_body(
            RigidBodyDesc::sphere(BodyKind::Avatar, 8.0, 0.5).with_position(Vec3::new(0.0, 1.0, 0.0)),
        );

        let mut began = 0;
        let mut ended = 0;
        for _ in 0..240 {
            world.step(DT);
            for event in world.contact_events() {
                let contact = event.involving(ball).unwrap();
                assert_eq!(contact.other, ground);
                match contact.phase {
                    ContactPhase::Began => began += 1,
                    ContactPhase::Ended => ended += 1,
                }
            }
        }

        let body = world.body(ball).unwrap();
        assert_relative_eq!(body.position.y, 0.5, epsilon = 0.02);
        assert!(body.velocity.y.abs() < 0.2);
        assert_eq!((began, ended), (1, 0), "resting contact must not flicker");
    }

    #[test]
    fn test_contact_normal_points_toward_other_body() {
        let (mut world, ground) = world_with_ground();
        let ball = world.add_body(
            RigidBodyDesc::sphere(BodyKind::Avatar, 1.0, 0.5).with_position(Vec3::new(0.0, 0.4, 0.0)),
        );

        world.step(DT);

        let events = world.take_contact_events();
        assert_eq!(events.len(), 1);
        let from_ball = events[0].involving(ball).unwrap();
        let from_ground = events[0].involving(ground).unwrap();
        assert_relative_eq!(from_ball.normal, Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(from_ground.normal, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert_eq!(from_ball.other_kind, BodyKind::Ground);
    }

    #[test]
    fn test_separating_spheres_emit_ended() {
        let mut world = PhysicsWorld::new(PhysicsConfig { gravity: Vec3::zeros(), ..Default::default() });
        let left = world.add_body(
            RigidBodyDesc::sphere(BodyKind::Hostile, 1.0, 0.5)
                .with_position(Vec3::new(-0.4, 0.0, 0.0))
                .with_velocity(Vec3::new(-3.0, 0.0, 0.0)),
        );
        let right = world.add_body(
            RigidBodyDesc::sphere(BodyKind::Hostile, 1.0, 0.5)
                .with_position(Vec3::new(0.4, 0.0, 0.0))
                .with_velocity(Vec3::new(3.0, 0.0, 0.0)),
        );

        world.step(DT);
        assert_eq!(world.contact_events().len(), 1);
        assert_eq!(world.contact_events()[0].phase, ContactPhase::Began);

        world.step(DT);
        let events = world.contact_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].phase, ContactPhase::Ended);
        assert!(events[0].involving(left).is_some());
        assert!(events[0].involving(right).is_some());
    }

    #[test]
    fn test_head_on_collision_stops_approach() {
        let mut world = PhysicsWorld::new(PhysicsConfig { gravity: Vec3::zeros(), ..Default::default() });
        let left = world.add_body(
            RigidBodyDesc::sphere(BodyKind::Avatar, 1.0, 0.5)
                .with_position(Vec3::new(-0.5, 0.0, 0.0))
                .with_velocity(Vec3::new(6.0, 0.0, 0.0)),
        );
        let right = world.add_body(
            RigidBodyDesc::sphere(BodyKind::Hostile, 1.0, 0.5).with_position(Vec3::new(0.55, 0.0, 0.0)),
        );

        world.step(DT);

        let (va, vb) = (world.body(left).unwrap().velocity.x, world.body(right).unwrap().velocity.x);
        assert_relative_eq!(va, vb, epsilon = 1e-5);
        assert_relative_eq!(va + vb, 6.0, epsilon = 1e-5);
    }

    #[test]
    fn test_layer_filter_skips_avatar_projectile_pairs() {
        let mut world = PhysicsWorld::new(PhysicsConfig { gravity: Vec3::zeros(), ..Default::default() });
        world.add_body(RigidBodyDesc::sphere(BodyKind::Avatar, 8.0, 0.5));
        world.add_body(RigidBodyDesc::sphere(BodyKind::Projectile, 0.05, 0.08));

        world.step(DT);

        assert!(world.contact_events().is_empty());
    }

    #[test]
    fn test_remove_body_forgets_pairs_silently() {
        let (mut world, _ground) = world_with_ground();
        let ball = world.add_body(
            RigidBodyDesc::sphere(BodyKind::Hostile, 1.0, 0.5).with_position(Vec3::new(0.0, 0.5, 0.0)),
        );
        world.step(DT);
        assert_eq!(world.contact_events().len(), 1);

        assert!(world.remove_body(ball).is_some());
        assert!(world.remove_body(ball).is_none());
        world.step(DT);

        assert!(world.contact_events().is_empty());
        assert!(!world.contains(ball));
        assert_eq!(world.body_count(), 1);
    }

    #[test]
    fn test_apply_force_lasts_one_step() {
        let mut world = PhysicsWorld::new(PhysicsConfig { gravity: Vec3::zeros(), ..Default::default() });
        let ball = world.add_body(RigidBodyDesc::sphere(BodyKind::Avatar, 2.0, 0.5));

        world.apply_force(ball, Vec3::new(120.0, 0.0, 0.0));
        world.step(DT);
        let after_push = world.body(ball).unwrap().velocity.x;
        world.step(DT);

        assert_relative_eq!(after_push, 1.0, epsilon = 1e-5);
        assert_relative_eq!(world.body(ball).unwrap().velocity.x, after_push, epsilon = 1e-6);
    }
}
