use bytemuck::{Pod, Zeroable};
use honeybear_common::MeshHandle;
use honeybear_scene::{Material, MaterialKind, Scene};
use std::collections::BTreeMap;
use std::ops::Range;

/// Per-instance vertex data: model matrix columns, linear color and
/// material parameters `(kind, metalness, roughness, 0)`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    pub model_0: [f32; 4],
    pub model_1: [f32; 4],
    pub model_2: [f32; 4],
    pub model_3: [f32; 4],
    pub color: [f32; 4],
    pub params: [f32; 4],
}

/// A contiguous run of instances that share one mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceBatch {
    pub mesh: MeshHandle,
    pub instances: Range<u32>,
}

/// Shader selector for `params.x`.
fn shader_kind(kind: &MaterialKind) -> f32 {
    match kind {
        MaterialKind::Normal => 0.0,
        MaterialKind::Standard { .. } => 1.0,
        MaterialKind::Basic { .. } => 2.0,
        MaterialKind::Matcap => 3.0,
    }
}

/// sRGB-encoded channel to linear.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn instance_for(model: glam::Mat4, material: Option<&Material>) -> InstanceData {
    let cols = model.to_cols_array_2d();
    let (color, params) = match material {
        Some(m) => {
            let [r, g, b] = m.base_color().map(srgb_to_linear);
            (
                [r, g, b, 1.0],
                [shader_kind(&m.kind), m.metalness, m.roughness, 0.0],
            )
        }
        // Unknown handle: draw as a normal material.
        None => ([1.0; 4], [0.0, 0.0, 1.0, 0.0]),
    };
    InstanceData {
        model_0: cols[0],
        model_1: cols[1],
        model_2: cols[2],
        model_3: cols[3],
        color,
        params,
    }
}

/// Flatten the visible nodes into instance data, grouped by mesh in handle
/// order. Hidden nodes are skipped.
pub fn build_instances(scene: &Scene) -> (Vec<InstanceData>, Vec<InstanceBatch>) {
    let mut grouped: BTreeMap<MeshHandle, Vec<InstanceData>> = BTreeMap::new();
    for (_, node) in scene.nodes().filter(|(_, n)| n.visible) {
        grouped
            .entry(node.mesh)
            .or_default()
            .push(instance_for(node.transform.matrix(), scene.material(node.material)));
    }

    let mut instances = Vec::with_capacity(grouped.values().map(Vec::len).sum());
    let mut batches = Vec::with_capacity(grouped.len());
    for (mesh, group) in grouped {
        let start = instances.len() as u32;
        instances.extend(group);
        batches.push(InstanceBatch {
            mesh,
            instances: start..instances.len() as u32,
        });
    }
    (instances, batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use honeybear_common::{MeshKind, Transform};
    use honeybear_scene::SceneNode;

    #[test]
    fn srgb_endpoints_and_midpoint() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!((srgb_to_linear(0.5) - 0.214).abs() < 1e-3);
    }

    #[test]
    fn nodes_batch_by_mesh() {
        let mut scene = Scene::new();
        let normal = scene.add_material(Material::normal("normal"));
        for _ in 0..3 {
            scene.add(SceneNode::new(MeshKind::Donut, MeshHandle(2), normal));
        }
        for _ in 0..2 {
            scene.add(SceneNode::new(MeshKind::Cube, MeshHandle(1), normal));
        }

        let (instances, batches) = build_instances(&scene);
        assert_eq!(instances.len(), 5);
        assert_eq!(
            batches,
            vec![
                InstanceBatch { mesh: MeshHandle(1), instances: 0..2 },
                InstanceBatch { mesh: MeshHandle(2), instances: 2..5 },
            ]
        );
    }

    #[test]
    fn hidden_nodes_are_not_drawn() {
        let mut scene = Scene::new();
        let m = scene.add_material(Material::basic("axis", 0xee4266));
        scene.add(SceneNode::new(MeshKind::AxisArrow, MeshHandle(4), m).hidden());
        let (instances, batches) = build_instances(&scene);
        assert!(instances.is_empty());
        assert!(batches.is_empty());
    }

    #[test]
    fn instance_carries_transform_and_material() {
        let mut scene = Scene::new();
        let text = scene.add_material(Material::standard("text", 1.0, 0.25));
        let transform = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            ..Transform::default()
        };
        scene.add(SceneNode::new(MeshKind::Text, MeshHandle(0), text).with_transform(transform));

        let (instances, _) = build_instances(&scene);
        let inst = instances[0];
        assert_eq!(inst.model_3, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(inst.params, [1.0, 1.0, 0.25, 0.0]);
        assert_eq!(inst.color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn basic_color_is_linearized() {
        let mut scene = Scene::new();
        let m = scene.add_material(Material::basic("axis", 0x808080));
        scene.add(SceneNode::new(MeshKind::AxisArrow, MeshHandle(0), m));
        let (instances, _) = build_instances(&scene);
        let [r, g, b, a] = instances[0].color;
        assert!((r - 0.2158).abs() < 1e-3);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(a, 1.0);
        assert_eq!(instances[0].params[0], 2.0);
    }
}
