//! Scene management
//!
//! The scene graph is the visual registry: gameplay entities register a
//! node per visible object, push transforms into it after every physics
//! step, and deregister it when they die. Renderers only ever read it.

mod scene_graph;

pub use scene_graph::{MaterialHandle, MeshHandle, MeshShape, NodeDesc, NodeHandle, SceneGraph, VisualNode};
