//! Windowless renderer
//!
//! Walks the scene exactly like a real backend would but only records
//! per-frame statistics. Used by the demo binary and by tests.

use crate::render::Camera;
use crate::scene::{MeshShape, SceneGraph};

/// Something that can draw the scene once per frame
pub trait Renderer {
    /// Draw every node of `scene` as seen from `camera`
    fn render(&mut self, scene: &SceneGraph, camera: &Camera);
}

/// Counts gathered for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Nodes submitted
    pub nodes: usize,
    /// Nodes drawn with sphere-like meshes
    pub spheres: usize,
    /// Nodes in front of the camera
    pub visible: usize,
}

/// Renderer without a surface
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: u64,
    last_frame: FrameStats,
}

impl HeadlessRenderer {
    /// Create a renderer that has drawn nothing yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames rendered
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Statistics of the most recent frame
    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, scene: &SceneGraph, camera: &Camera) {
        let forward = camera.forward();
        let mut stats = FrameStats::default();

        for (_, node) in scene.iter() {
            stats.nodes += 1;
            if matches!(node.shape, MeshShape::Sphere { .. } | MeshShape::Icosahedron { .. }) {
                stats.spheres += 1;
            }
            if (node.position - camera.position).dot(&forward) > 0.0 {
                stats.visible += 1;
            }
        }

        self.frames += 1;
        self.last_frame = stats;
        log::trace!(
            "Frame {}: {} nodes ({} visible)",
            self.frames,
            stats.nodes,
            stats.visible
        );
    }
}
