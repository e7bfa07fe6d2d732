use glam::Vec3;
use honeybear_common::{MaterialHandle, MeshHandle, MeshKind, NodeId, Transform};
use honeybear_geometry::{MeshData, arrow_mesh, box_mesh, sphere_mesh, torus_mesh};
use honeybear_scene::{Material, Scene, SceneNode};
use std::collections::BTreeMap;
use std::f32::consts::FRAC_PI_2;

/// The string rendered as extruded text.
pub const TEXT_LITERAL: &str = "HoneyBear";
pub const ARROW_LENGTH: f32 = 2.2;
/// Gizmo colors for the x, y and z axes.
pub const AXIS_COLORS: [u32; 3] = [0xee4266, 0xbfea7c, 0x40a2e3];

/// CPU-side geometry addressed by handle. Shared by every node using it.
#[derive(Debug, Clone, Default)]
pub struct GeometryLibrary {
    meshes: BTreeMap<MeshHandle, MeshData>,
    next_id: u64,
}

impl GeometryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, mesh: MeshData) -> MeshHandle {
        let handle = MeshHandle(self.next_id);
        self.next_id += 1;
        tracing::trace!(
            handle = handle.0,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "registered geometry"
        );
        self.meshes.insert(handle, mesh);
        handle
    }

    pub fn get(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(&handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeshHandle, &MeshData)> {
        self.meshes.iter().map(|(h, m)| (*h, m))
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

/// Handles to the geometry and materials the demo shares between nodes.
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub donut: MeshHandle,
    pub sphere: MeshHandle,
    pub cube: MeshHandle,
    pub arrow: MeshHandle,
    /// Normal-colored material shared by every primitive.
    pub primitive_material: MaterialHandle,
    /// Reflective standard material used by the text.
    pub text_material: MaterialHandle,
    pub text: Option<NodeId>,
}

impl SceneAssets {
    /// Build the shared geometry and materials, and add the (hidden) axis gizmo.
    pub fn build(
        scene: &mut Scene,
        library: &mut GeometryLibrary,
        metalness: f32,
        roughness: f32,
    ) -> Self {
        let donut = library.register(torus_mesh(0.3, 0.2, 20, 45));
        let sphere = library.register(sphere_mesh(0.5, 16, 16));
        let cube = library.register(box_mesh(0.5, 0.5, 0.5));
        let head_length = 0.2 * ARROW_LENGTH;
        let arrow = library.register(arrow_mesh(ARROW_LENGTH, head_length, 0.2 * head_length));

        let primitive_material = scene.add_material(Material::normal("primitive"));
        let text_material = scene.add_material(Material::standard("text", metalness, roughness));

        // Arrows are modelled along +Y and turned onto their axis.
        let axis_rotations = [
            Vec3::new(0.0, 0.0, -FRAC_PI_2),
            Vec3::ZERO,
            Vec3::new(FRAC_PI_2, 0.0, 0.0),
        ];
        for (axis, (color, rotation)) in ["x", "y", "z"]
            .into_iter()
            .zip(AXIS_COLORS.into_iter().zip(axis_rotations))
        {
            let material = scene.add_material(Material::basic(format!("axis-{axis}"), color));
            let transform = Transform {
                rotation,
                ..Transform::default()
            };
            scene.add(
                SceneNode::new(MeshKind::AxisArrow, arrow, material)
                    .with_transform(transform)
                    .hidden(),
            );
        }

        tracing::debug!(meshes = library.len(), "built shared scene assets");
        Self {
            donut,
            sphere,
            cube,
            arrow,
            primitive_material,
            text_material,
            text: None,
        }
    }

    /// Geometry and material for kinds the populator scatters.
    pub fn primitive(&self, kind: MeshKind) -> Option<(MeshHandle, MaterialHandle)> {
        let mesh = match kind {
            MeshKind::Donut => self.donut,
            MeshKind::Sphere => self.sphere,
            MeshKind::Cube => self.cube,
            MeshKind::Text | MeshKind::AxisArrow => return None,
        };
        Some((mesh, self.primitive_material))
    }

    /// Register the text geometry and add its node at the origin.
    pub fn add_text(
        &mut self,
        scene: &mut Scene,
        library: &mut GeometryLibrary,
        mesh: MeshData,
    ) -> NodeId {
        let handle = library.register(mesh);
        let id = scene.add(SceneNode::new(MeshKind::Text, handle, self.text_material));
        self.text = Some(id);
        id
    }
}
