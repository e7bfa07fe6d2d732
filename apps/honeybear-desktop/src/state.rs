use crate::config::AppConfig;
use glam::Vec2;
use honeybear_animate::{FrameDriver, SceneConfig};
use honeybear_assets::{
    AssetError, CubeMapImages, GeometryLibrary, ImageData, SceneAssets,
};
use honeybear_common::MeshKind;
use honeybear_geometry::{TextOptions, Typeface, text_mesh};
use honeybear_input::{Action, DragTracker, PointerButton};
use honeybear_panel::{ControlPanel, PanelCommand, apply_command};
use honeybear_render::{OrbitControls, Viewport};
use honeybear_scene::{Populator, Scene};

/// Kinds scattered once the text is in place, in insertion order.
const SCATTERED_KINDS: [MeshKind; 3] = [MeshKind::Donut, MeshKind::Sphere, MeshKind::Cube];

/// Everything the viewer owns apart from the window and GPU.
pub struct AppState {
    pub scene: Scene,
    pub library: GeometryLibrary,
    pub assets: SceneAssets,
    pub config: SceneConfig,
    pub controls: OrbitControls,
    pub populator: Populator,
    pub driver: FrameDriver,
    pub panel: ControlPanel,
    pub drag: DragTracker,
    pub viewport: Viewport,
    text: String,
    initial_count: usize,
    pending_environment: Option<CubeMapImages>,
    pending_matcap: Option<ImageData>,
}

impl AppState {
    pub fn new(app: &AppConfig) -> Self {
        let mut scene = Scene::new();
        let mut library = GeometryLibrary::new();
        let config = app.scene;
        let assets = SceneAssets::build(
            &mut scene,
            &mut library,
            config.material.metalness,
            config.material.roughness,
        );
        let populator = match app.seed {
            Some(seed) => Populator::with_seed(seed),
            None => Populator::from_entropy(),
        };

        Self {
            scene,
            library,
            assets,
            config,
            controls: OrbitControls::default(),
            populator,
            driver: FrameDriver::new(),
            panel: ControlPanel::new(),
            drag: DragTracker::new(),
            viewport: Viewport::new(1280.0, 720.0, 1.0),
            text: app.text.clone(),
            initial_count: app.initial_count,
            pending_environment: None,
            pending_matcap: None,
        }
    }

    /// Font completion: add the text, then scatter the initial nodes.
    /// Returns the number of nodes added. On failure nothing is added.
    pub fn on_font_loaded(&mut self, result: Result<Typeface, AssetError>) -> usize {
        let typeface = match result {
            Ok(typeface) => typeface,
            Err(e) => {
                tracing::error!("font load failed, scene stays empty: {e}");
                return 0;
            }
        };
        let mesh = match text_mesh(&typeface, &self.text, &TextOptions::default()) {
            Ok(mesh) => mesh,
            Err(e) => {
                tracing::error!("text geometry failed: {e}");
                return 0;
            }
        };
        self.assets.add_text(&mut self.scene, &mut self.library, mesh);

        let mut added = 1;
        for kind in SCATTERED_KINDS {
            let Some((mesh, material)) = self.assets.primitive(kind) else {
                continue;
            };
            added += self
                .populator
                .populate(&mut self.scene, kind, mesh, material, self.initial_count)
                .len();
        }
        tracing::info!(text = %self.text, nodes = self.scene.len(), "scene populated");
        added
    }

    pub fn on_environment_loaded(&mut self, result: Result<CubeMapImages, AssetError>) {
        match result {
            Ok(images) => self.pending_environment = Some(images),
            Err(e) => tracing::error!("environment map load failed, keeping neutral fallback: {e}"),
        }
    }

    pub fn on_matcap_loaded(&mut self, result: Result<ImageData, AssetError>) {
        match result {
            Ok(image) => self.pending_matcap = Some(image),
            Err(e) => tracing::error!("matcap load failed, keeping neutral fallback: {e}"),
        }
    }

    /// Loaded environment waiting for the GPU.
    pub fn take_environment(&mut self) -> Option<CubeMapImages> {
        self.pending_environment.take()
    }

    /// Loaded matcap waiting for the GPU.
    pub fn take_matcap(&mut self) -> Option<ImageData> {
        self.pending_matcap.take()
    }

    pub fn apply_commands(&mut self, commands: Vec<PanelCommand>) {
        for command in commands {
            apply_command(command, &mut self.scene, &self.assets, &mut self.populator);
        }
    }

    /// Route an input action. Returns true when the window should toggle
    /// fullscreen; camera actions are consumed here.
    pub fn handle_action(&mut self, action: Action) -> bool {
        if action == Action::ToggleFullscreen {
            return true;
        }
        action.apply_to(&mut self.controls, self.viewport.height as f32);
        false
    }

    pub fn pointer_moved(&mut self, logical: Vec2) {
        if let Some(action) = self.drag.moved(logical) {
            self.handle_action(action);
        }
    }

    pub fn pointer_button(&mut self, button: PointerButton, pressed: bool) {
        if pressed {
            self.drag.press(button);
        } else {
            self.drag.release(button);
        }
    }

    /// Wheel in lines; positive is away from the user.
    pub fn wheel(&mut self, lines: f32) {
        if let Some(action) = self.drag.wheel(-lines) {
            self.handle_action(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONT: &str = r#"{
        "glyphs": {
            "I": { "ha": 40, "o": "m 0 0 l 20 0 l 20 100 l 0 100 z" }
        },
        "familyName": "Test",
        "resolution": 100,
        "boundingBox": { "yMin": -20, "yMax": 100 },
        "underlineThickness": 10
    }"#;

    fn state(initial_count: usize) -> AppState {
        AppState::new(&AppConfig {
            initial_count,
            text: "I".into(),
            seed: Some(3),
            ..AppConfig::default()
        })
    }

    #[test]
    fn starts_with_hidden_gizmo_only() {
        let state = state(100);
        assert_eq!(state.scene.len(), 3);
        assert_eq!(state.scene.count_of(MeshKind::AxisArrow), 3);
        assert!(state.scene.nodes().all(|(_, n)| !n.visible));
    }

    #[test]
    fn font_success_adds_text_and_population() {
        let mut state = state(100);
        let typeface = Typeface::from_slice(FONT.as_bytes()).unwrap();
        assert_eq!(state.on_font_loaded(Ok(typeface)), 301);
        assert_eq!(state.scene.count_of(MeshKind::Text), 1);
        for kind in SCATTERED_KINDS {
            assert_eq!(state.scene.count_of(kind), 100);
        }
        assert!(state.assets.text.is_some());
    }

    #[test]
    fn font_failure_adds_nothing() {
        let mut state = state(100);
        let err = AssetError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(state.on_font_loaded(Err(err)), 0);
        assert_eq!(state.scene.len(), 3);
        assert_eq!(state.scene.count_of(MeshKind::Text), 0);
    }

    #[test]
    fn textures_wait_until_taken() {
        let mut state = state(0);
        state.on_matcap_loaded(Ok(ImageData::solid([1, 2, 3, 255])));
        state.on_environment_loaded(Err(AssetError::CubeMapFaceCount(2)));
        assert!(state.take_environment().is_none());
        assert_eq!(state.take_matcap().map(|m| m.rgba), Some(vec![1, 2, 3, 255]));
        assert!(state.take_matcap().is_none());
    }

    #[test]
    fn panel_commands_reach_scene() {
        let mut state = state(0);
        state.apply_commands(vec![
            PanelCommand::AddMore(MeshKind::Cube),
            PanelCommand::ToggleGizmo,
        ]);
        assert_eq!(state.scene.count_of(MeshKind::Cube), 100);
        assert!(
            state
                .scene
                .nodes()
                .filter(|(_, n)| n.kind == MeshKind::AxisArrow)
                .all(|(_, n)| n.visible)
        );
    }

    #[test]
    fn fullscreen_is_reported_camera_is_consumed() {
        let mut state = state(0);
        assert!(state.handle_action(Action::ToggleFullscreen));
        assert!(!state.handle_action(Action::Dolly(-1.0)));
    }

    #[test]
    fn wheel_toward_screen_moves_closer() {
        let mut state = state(0);
        state.controls.enable_damping = false;
        let before = state.controls.spherical().radius;
        state.wheel(1.0);
        state.controls.update();
        assert!(state.controls.spherical().radius < before);
    }

    #[test]
    fn drag_orbits_camera() {
        let mut state = state(0);
        state.controls.enable_damping = false;
        let start = state.controls.position;
        state.pointer_moved(Vec2::new(100.0, 100.0));
        state.pointer_button(PointerButton::Primary, true);
        state.pointer_moved(Vec2::new(160.0, 100.0));
        state.controls.update();
        assert_ne!(state.controls.position, start);
    }
}
