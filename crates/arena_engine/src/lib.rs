//! # Arena Engine
//!
//! Simulation core for physics-driven arena games.
//!
//! ## Features
//!
//! - **Fixed Timestep**: Frame-rate independent simulation stepping with a bounded catch-up budget
//! - **Rigid Bodies**: Sphere/plane bodies with gravity, damping, contact resolution and contact events
//! - **Scene Graph**: Handle-based visual nodes owning opaque mesh/material resources
//! - **Camera**: Perspective camera with look-at orientation and viewport tracking
//! - **Input**: Polled keyboard/mouse state behind a small query trait
//!
//! ## Quick Start
//!
//! ```rust
//! use arena_engine::prelude::*;
//!
//! let mut physics = PhysicsWorld::new(PhysicsConfig::default());
//! let ball = physics.add_body(RigidBodyDesc::sphere(BodyKind::Hostile, 1.0, 0.5)
//!     .with_position(Vec3::new(0.0, 2.0, 0.0)));
//!
//! let mut timestep = FixedTimestep::new(1.0 / 60.0, 3);
//! for _ in 0..timestep.advance(0.05) {
//!     physics.step(timestep.step_size());
//! }
//! assert!(physics.body(ball).is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::{
            math::{Quat, Vec2, Vec3},
            time::{FixedTimestep, Timer},
        },
        input::{InputManager, InputSource, KeyCode, MouseButton},
        physics::{
            BodyHandle, BodyKind, Contact, ContactEvent, ContactPhase, PhysicsConfig,
            PhysicsWorld, RigidBody, RigidBodyDesc,
        },
        render::{Camera, HeadlessRenderer, Renderer, Viewport},
        scene::{MeshShape, NodeDesc, NodeHandle, SceneGraph, VisualNode},
    };
}
