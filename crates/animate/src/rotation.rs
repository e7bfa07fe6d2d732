use crate::config::{MaterialParameters, RotationPolicy, SceneConfig};
use honeybear_common::MeshKind;
use honeybear_scene::{MaterialKind, Scene};
use std::collections::BTreeSet;

/// Rotation (x and y) of an animating node of `kind` after `elapsed` seconds.
///
/// Text sways with `sin(t * speed) * speed`. Every other kind spins with
/// `-(t * speed) * speed`.
///
/// NOTE: the speed enters twice for spinning kinds, so the spin rate grows
/// with the square of the slider value. Probably unintended upstream, left in
/// place so the motion matches.
pub fn rotation_angle(kind: MeshKind, policy: RotationPolicy, elapsed: f32) -> f32 {
    let phase = elapsed * policy.speed;
    let angle = if kind == MeshKind::Text { phase.sin() } else { -phase };
    angle * policy.speed
}

/// Apply each kind's policy to every node. Disabled kinds snap back to zero
/// on x and y; z is never touched.
pub fn update_rotation(scene: &mut Scene, config: &SceneConfig, elapsed: f32) {
    for (_, node) in scene.nodes_mut() {
        let Some(policy) = config.rotation.policy(node.kind) else {
            continue;
        };
        let angle = if policy.enabled {
            rotation_angle(node.kind, policy, elapsed)
        } else {
            0.0
        };
        node.transform.rotation.x = angle;
        node.transform.rotation.y = angle;
    }
    refresh_text_material(scene, &config.material, config.text_matcap);
}

/// Copy the tunable surface parameters and look onto the text material(s).
pub fn refresh_text_material(scene: &mut Scene, params: &MaterialParameters, matcap: bool) {
    let handles: BTreeSet<_> = scene
        .nodes()
        .filter(|(_, n)| n.kind == MeshKind::Text)
        .map(|(_, n)| n.material)
        .collect();
    for handle in handles {
        let Some(material) = scene.material_mut(handle) else {
            tracing::warn!(handle = handle.0, "text node references a missing material");
            continue;
        };
        material.metalness = params.metalness;
        material.roughness = params.roughness;
        material.kind = if matcap {
            MaterialKind::Matcap
        } else {
            MaterialKind::Standard { env_map: true }
        };
    }
}
