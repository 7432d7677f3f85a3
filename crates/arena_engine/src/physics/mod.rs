//! Physics module for rigid-body simulation and contact reporting
//!
//! Provides sphere/plane bodies, layer-filtered collision detection and
//! simple impulse-based collision response with begin/end contact events.

pub mod body;
pub mod collision_layers;
pub mod contact;
pub mod world;

pub use body::{BodyKind, RigidBody, RigidBodyDesc, Shape};
pub use collision_layers::CollisionLayers;
pub use contact::{contacts_of, Contact, ContactEvent, ContactPhase};
pub use world::{BodyHandle, PhysicsConfig, PhysicsWorld};
