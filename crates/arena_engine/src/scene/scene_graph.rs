//! Handle-based scene graph
//!
//! Nodes live in a slot map so a stale handle can never alias a newer node.
//! Each node owns one mesh and one material resource, allocated on `add`
//! and released exactly once on `remove`.

use std::collections::HashSet;

use slotmap::SlotMap;

use crate::foundation::math::{Quat, Vec3};

slotmap::new_key_type! {
    /// Stable handle to a node registered in a [`SceneGraph`]
    pub struct NodeHandle;
}

/// Handle to a mesh resource owned by a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Handle to a material resource owned by a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u64);

/// Procedural geometry a node is drawn with
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    /// UV sphere
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Capsule standing on its Y axis
    Capsule {
        /// Cap radius
        radius: f32,
        /// Length of the cylindrical section
        length: f32,
    },
    /// Low-poly icosahedron
    Icosahedron {
        /// Circumscribed radius
        radius: f32,
    },
    /// Square ground plane in XZ
    Plane {
        /// Edge length
        size: f32,
    },
}

/// Construction parameters for a [`VisualNode`]
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDesc {
    /// Geometry
    pub shape: MeshShape,
    /// Linear RGB color
    pub color: [f32; 3],
    /// Initial world position
    pub position: Vec3,
}

impl NodeDesc {
    /// Describe a node at the origin
    pub fn new(shape: MeshShape, color: [f32; 3]) -> Self {
        Self { shape, color, position: Vec3::zeros() }
    }

    /// Set the initial position
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }
}

/// A drawable object in the scene
#[derive(Debug, Clone)]
pub struct VisualNode {
    /// World-space position
    pub position: Vec3,
    /// World-space orientation
    pub orientation: Quat,
    /// Geometry
    pub shape: MeshShape,
    /// Linear RGB color
    pub color: [f32; 3],
    mesh: MeshHandle,
    material: MaterialHandle,
}

impl VisualNode {
    /// Mesh resource owned by this node
    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    /// Material resource owned by this node
    pub fn material(&self) -> MaterialHandle {
        self.material
    }
}

/// Registry of visual nodes and the resources they own
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeHandle, VisualNode>,
    live_meshes: HashSet<MeshHandle>,
    live_materials: HashSet<MaterialHandle>,
    next_resource_id: u64,
}

impl SceneGraph {
    /// Create an empty scene graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node, allocating its mesh and material
    pub fn add(&mut self, desc: NodeDesc) -> NodeHandle {
        let mesh = MeshHandle(self.allocate_id());
        let material = MaterialHandle(self.allocate_id());
        self.live_meshes.insert(mesh);
        self.live_materials.insert(material);

        let handle = self.nodes.insert(VisualNode {
            position: desc.position,
            orientation: Quat::identity(),
            shape: desc.shape,
            color: desc.color,
            mesh,
            material,
        });
        log::trace!("Added scene node {:?} ({:?})", handle, desc.shape);
        handle
    }

    /// Deregister a node and release its resources
    ///
    /// Returns `None` for a handle that was already removed, so resources
    /// can never be released twice.
    pub fn remove(&mut self, handle: NodeHandle) -> Option<VisualNode> {
        let node = self.nodes.remove(handle)?;
        self.live_meshes.remove(&node.mesh);
        self.live_materials.remove(&node.material);
        log::trace!("Removed scene node {:?}", handle);
        Some(node)
    }

    /// Look up a node
    pub fn node(&self, handle: NodeHandle) -> Option<&VisualNode> {
        self.nodes.get(handle)
    }

    /// Look up a node mutably
    pub fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut VisualNode> {
        self.nodes.get_mut(handle)
    }

    /// Whether a handle still refers to a registered node
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    /// Number of registered nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of mesh resources not yet released
    pub fn live_mesh_count(&self) -> usize {
        self.live_meshes.len()
    }

    /// Number of material resources not yet released
    pub fn live_material_count(&self) -> usize {
        self.live_materials.len()
    }

    /// Iterate over all nodes
    pub fn iter(&self) -> impl Iterator<Item = (NodeHandle, &VisualNode)> {
        self.nodes.iter()
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_resource_id += 1;
        self.next_resource_id
    }
}
