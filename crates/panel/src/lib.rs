//! Control panel: live tuning of [`SceneConfig`] plus one-shot scene actions.
//!
//! # Invariants
//! - The panel is the only writer of `SceneConfig` during a frame.
//! - Buttons never mutate the scene directly; they return [`PanelCommand`]s
//!   which the host applies with [`apply_command`].

mod commands;

pub use commands::{ADD_MORE_COUNT, PanelCommand, apply_command};

use honeybear_animate::SceneConfig;
use honeybear_common::MeshKind;
use honeybear_scene::Scene;
use std::ops::RangeInclusive;

/// Slider bounds.
pub const TEXT_SPEED_RANGE: RangeInclusive<f32> = 0.0..=2.0;
pub const SPIN_SPEED_RANGE: RangeInclusive<f32> = 0.0..=10.0;
pub const MATERIAL_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const SLIDER_STEP: f64 = 0.01;

const ADD_BUTTONS: [(MeshKind, &str); 3] = [
    (MeshKind::Donut, "Add 100 Donuts"),
    (MeshKind::Cube, "Add 100 Cubes"),
    (MeshKind::Sphere, "Add 100 Spheres"),
];

/// The "Controls" window. It collapses but never closes.
#[derive(Debug, Clone, Default)]
pub struct ControlPanel;

impl ControlPanel {
    pub fn new() -> Self {
        Self
    }

    /// Draw the window for one egui pass. Returns the buttons pressed.
    pub fn show(
        &self,
        ctx: &egui::Context,
        config: &mut SceneConfig,
        scene: &Scene,
    ) -> Vec<PanelCommand> {
        let mut commands = Vec::new();
        egui::Window::new("Controls")
            .collapsible(true)
            .default_pos(egui::pos2(10.0, 10.0))
            .default_width(260.0)
            .resizable(false)
            .show(ctx, |ui| {
                commands = Self::ui(ui, config, scene);
            });
        commands
    }

    /// Panel contents, usable inside any container.
    pub fn ui(ui: &mut egui::Ui, config: &mut SceneConfig, scene: &Scene) -> Vec<PanelCommand> {
        let rotation = &mut config.rotation;
        ui.checkbox(&mut rotation.text.enabled, "Animate Text");
        ui.checkbox(&mut rotation.cube.enabled, "Animate Cubes");
        ui.checkbox(&mut rotation.donut.enabled, "Animate Donuts");
        ui.add(
            egui::Slider::new(&mut rotation.text.speed, TEXT_SPEED_RANGE)
                .step_by(SLIDER_STEP)
                .text("Text Animation Threshold"),
        );
        ui.add(
            egui::Slider::new(&mut rotation.cube.speed, SPIN_SPEED_RANGE)
                .step_by(SLIDER_STEP)
                .text("Cube Animation Speed"),
        );
        ui.add(
            egui::Slider::new(&mut rotation.donut.speed, SPIN_SPEED_RANGE)
                .step_by(SLIDER_STEP)
                .text("Donut Animation Speed"),
        );

        ui.separator();
        let material = &mut config.material;
        ui.add(
            egui::Slider::new(&mut material.metalness, MATERIAL_RANGE)
                .step_by(SLIDER_STEP)
                .text("Text Metalness"),
        );
        ui.add(
            egui::Slider::new(&mut material.roughness, MATERIAL_RANGE)
                .step_by(SLIDER_STEP)
                .text("Text Roughness"),
        );
        ui.checkbox(&mut config.text_matcap, "Text Matcap");

        ui.separator();
        let mut commands = Vec::new();
        if ui.button("Toggle Gizmo").clicked() {
            commands.push(PanelCommand::ToggleGizmo);
        }
        for (kind, label) in ADD_BUTTONS {
            if ui.button(label).clicked() {
                commands.push(PanelCommand::AddMore(kind));
            }
        }

        ui.separator();
        ui.monospace(format!(
            "donuts {}  cubes {}  spheres {}  total {}",
            scene.count_of(MeshKind::Donut),
            scene.count_of(MeshKind::Cube),
            scene.count_of(MeshKind::Sphere),
            scene.len()
        ));
        commands
    }
}
