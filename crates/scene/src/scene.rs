use crate::material::Material;
use honeybear_common::{MaterialHandle, MeshHandle, MeshKind, NodeId, Transform};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A drawable node: shared geometry and material plus its own transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub kind: MeshKind,
    pub mesh: MeshHandle,
    pub material: MaterialHandle,
    pub transform: Transform,
    pub visible: bool,
}

impl SceneNode {
    pub fn new(kind: MeshKind, mesh: MeshHandle, material: MaterialHandle) -> Self {
        Self {
            kind,
            mesh,
            material,
            transform: Transform::default(),
            visible: true,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// All nodes and materials of the running demo.
///
/// Nodes are append-only. BTreeMap keeps iteration order stable between
/// frames so draw batching does not shuffle.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: BTreeMap<NodeId, SceneNode>,
    materials: BTreeMap<MaterialHandle, Material>,
    next_material: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node and return its fresh id.
    pub fn add(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId::new();
        self.nodes.insert(id, node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut SceneNode)> {
        self.nodes.iter_mut().map(|(id, node)| (*id, node))
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn count_of(&self, kind: MeshKind) -> usize {
        self.nodes.values().filter(|n| n.kind == kind).count()
    }

    /// Flip visibility of every node of `kind`. Returns how many flipped.
    pub fn toggle_visibility(&mut self, kind: MeshKind) -> usize {
        let mut flipped = 0;
        for node in self.nodes.values_mut().filter(|n| n.kind == kind) {
            node.visible = !node.visible;
            flipped += 1;
        }
        tracing::debug!(%kind, flipped, "toggled visibility");
        flipped
    }

    pub fn add_material(&mut self, material: Material) -> MaterialHandle {
        let handle = MaterialHandle(self.next_material);
        self.next_material += 1;
        self.materials.insert(handle, material);
        handle
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(&handle)
    }

    pub fn material_mut(&mut self, handle: MaterialHandle) -> Option<&mut Material> {
        self.materials.get_mut(&handle)
    }

    pub fn materials(&self) -> impl Iterator<Item = (MaterialHandle, &Material)> {
        self.materials.iter().map(|(h, m)| (*h, m))
    }
}
