//! Shared entity plumbing
//!
//! Every gameplay object is one physics body plus one visual node. The body
//! is the source of truth for position; the node owns facing.

use arena_engine::foundation::math::{utils, Quat, Vec3};
use arena_engine::physics::{BodyHandle, PhysicsConfig, PhysicsWorld, RigidBodyDesc};
use arena_engine::scene::{NodeDesc, NodeHandle, SceneGraph};

/// The two registries entities live in
pub struct Arena {
    /// Rigid-body simulation
    pub physics: PhysicsWorld,
    /// Visual registry
    pub scene: SceneGraph,
}

impl Arena {
    /// Create an empty arena
    pub fn new(physics: PhysicsConfig) -> Self {
        Self {
            physics: PhysicsWorld::new(physics),
            scene: SceneGraph::new(),
        }
    }

    /// Register a body and its visual together
    pub fn spawn(&mut self, body: RigidBodyDesc, node: NodeDesc) -> EntityHandles {
        EntityHandles {
            body: self.physics.add_body(body),
            node: self.scene.add(node),
        }
    }
}

/// Handles to the resources exclusively owned by one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityHandles {
    body: BodyHandle,
    node: NodeHandle,
}

impl EntityHandles {
    /// Physics body handle
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Visual node handle
    pub fn node(&self) -> NodeHandle {
        self.node
    }

    /// Current body position, if the body is still registered
    pub fn position(&self, arena: &Arena) -> Option<Vec3> {
        arena.physics.body(self.body).map(|body| body.position)
    }

    /// Current facing, if the node is still registered
    pub fn facing(&self, arena: &Arena) -> Option<Quat> {
        arena.scene.node(self.node).map(|node| node.orientation)
    }

    /// Copy the body position onto the visual node
    pub fn sync(&self, arena: &mut Arena) {
        let Some(position) = self.position(arena) else {
            return;
        };
        if let Some(node) = arena.scene.node_mut(self.node) {
            node.position = position;
        }
    }

    /// Turn the visual a fixed fraction of the way toward a unit `direction`
    pub fn turn_towards(&self, arena: &mut Arena, direction: &Vec3, fraction: f32) {
        if let Some(node) = arena.scene.node_mut(self.node) {
            let target = utils::facing_rotation(direction);
            node.orientation = utils::slerp_towards(&node.orientation, &target, fraction);
        }
    }

    /// Deregister both resources; harmless if already released
    pub fn release(&self, arena: &mut Arena) {
        arena.physics.remove_body(self.body);
        arena.scene.remove(self.node);
    }
}
