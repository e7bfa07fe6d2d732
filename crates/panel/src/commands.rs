use honeybear_assets::SceneAssets;
use honeybear_common::MeshKind;
use honeybear_scene::{Populator, Scene};

/// Nodes added per "Add 100 .." press.
pub const ADD_MORE_COUNT: usize = 100;

/// A one-shot action requested from the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    /// Flip visibility of the axis arrows.
    ToggleGizmo,
    /// Scatter [`ADD_MORE_COUNT`] more nodes of a kind.
    AddMore(MeshKind),
}

/// Execute a command against the scene. Returns how many nodes it touched.
pub fn apply_command<R: rand::Rng>(
    command: PanelCommand,
    scene: &mut Scene,
    assets: &SceneAssets,
    populator: &mut Populator<R>,
) -> usize {
    match command {
        PanelCommand::ToggleGizmo => scene.toggle_visibility(MeshKind::AxisArrow),
        PanelCommand::AddMore(kind) => {
            let Some((mesh, material)) = assets.primitive(kind) else {
                tracing::warn!(%kind, "no shared geometry for kind, ignoring add");
                return 0;
            };
            let added = populator.populate(scene, kind, mesh, material, ADD_MORE_COUNT);
            tracing::info!(%kind, added = added.len(), total = scene.count_of(kind), "added nodes");
            added.len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use honeybear_assets::GeometryLibrary;

    fn setup() -> (Scene, SceneAssets, Populator) {
        let mut scene = Scene::new();
        let mut library = GeometryLibrary::new();
        let assets = SceneAssets::build(&mut scene, &mut library, 1.0, 0.0);
        (scene, assets, Populator::with_seed(11))
    }

    #[test]
    fn add_more_donuts_end_to_end() {
        let (mut scene, assets, mut populator) = setup();
        let (mesh, material) = assets.primitive(MeshKind::Donut).unwrap();
        populator.populate(&mut scene, MeshKind::Donut, mesh, material, 100);
        assert_eq!(scene.count_of(MeshKind::Donut), 100);
        assert_eq!(scene.count_of(MeshKind::Cube), 0);
        assert_eq!(scene.count_of(MeshKind::Sphere), 0);

        let added = apply_command(
            PanelCommand::AddMore(MeshKind::Donut),
            &mut scene,
            &assets,
            &mut populator,
        );
        assert_eq!(added, 100);
        assert_eq!(scene.count_of(MeshKind::Donut), 200);
        assert_eq!(scene.count_of(MeshKind::Cube), 0);
    }

    #[test]
    fn added_nodes_share_kind_geometry() {
        let (mut scene, assets, mut populator) = setup();
        apply_command(PanelCommand::AddMore(MeshKind::Sphere), &mut scene, &assets, &mut populator);
        assert!(
            scene
                .nodes()
                .filter(|(_, n)| n.kind == MeshKind::Sphere)
                .all(|(_, n)| n.mesh == assets.sphere && n.material == assets.primitive_material)
        );
    }

    #[test]
    fn gizmo_toggle_twice_restores() {
        let (mut scene, assets, mut populator) = setup();
        let visible = |scene: &Scene| {
            scene
                .nodes()
                .filter(|(_, n)| n.kind == MeshKind::AxisArrow)
                .map(|(_, n)| n.visible)
                .collect::<Vec<_>>()
        };
        let before = visible(&scene);
        assert_eq!(before, vec![false; 3]);

        assert_eq!(apply_command(PanelCommand::ToggleGizmo, &mut scene, &assets, &mut populator), 3);
        assert_eq!(visible(&scene), vec![true; 3]);
        apply_command(PanelCommand::ToggleGizmo, &mut scene, &assets, &mut populator);
        assert_eq!(visible(&scene), before);
    }

    #[test]
    fn adding_text_or_arrows_is_ignored() {
        let (mut scene, assets, mut populator) = setup();
        let before = scene.len();
        for kind in [MeshKind::Text, MeshKind::AxisArrow] {
            assert_eq!(
                apply_command(PanelCommand::AddMore(kind), &mut scene, &assets, &mut populator),
                0
            );
        }
        assert_eq!(scene.len(), before);
    }
}
