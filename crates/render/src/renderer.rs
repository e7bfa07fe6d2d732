use glam::{Mat4, Vec3};
use honeybear_common::MeshKind;
use honeybear_scene::Scene;
use std::fmt::Write;

/// Perspective camera state for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 3.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl RenderView {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads scene state and a view, then produces output. Backends
/// may keep their own GPU caches, hence `&mut self`, but never touch the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and view.
    fn render(&mut self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Human-readable scene summary. Used for logging and for testing the frame
/// loop without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, scene: &Scene, view: &RenderView) -> String {
        self.frames += 1;
        let mut out = String::new();
        let visible = scene.nodes().filter(|(_, n)| n.visible).count();
        tracing::trace!(frame = self.frames, visible, "debug render");
        let _ = writeln!(
            out,
            "=== Scene (frame={}) ===\nNodes: {} ({} visible)",
            self.frames,
            scene.len(),
            visible
        );
        for kind in MeshKind::ALL {
            let _ = writeln!(out, "  {kind}: {}", scene.count_of(kind));
        }
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}",
            view.eye.x, view.eye.y, view.eye.z, view.target.x, view.target.y, view.target.z,
            view.fov_degrees
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use honeybear_common::{MaterialHandle, MeshHandle};
    use honeybear_scene::SceneNode;

    #[test]
    fn debug_renderer_empty_scene() {
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&Scene::new(), &RenderView::default());
        assert!(output.contains("frame=1"));
        assert!(output.contains("Nodes: 0 (0 visible)"));
        assert!(output.contains("fov=75"));
    }

    #[test]
    fn debug_renderer_counts_kinds() {
        let mut scene = Scene::new();
        scene.add(SceneNode::new(MeshKind::Donut, MeshHandle(0), MaterialHandle(0)));
        scene.add(SceneNode::new(MeshKind::Donut, MeshHandle(0), MaterialHandle(0)));
        scene.add(SceneNode::new(MeshKind::AxisArrow, MeshHandle(1), MaterialHandle(0)).hidden());

        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&scene, &RenderView::default());
        assert!(output.contains("Nodes: 3 (2 visible)"));
        assert!(output.contains("donut: 2"));
        assert!(output.contains("axis-arrow: 1"));
        renderer.render(&scene, &RenderView::default());
        assert_eq!(renderer.frames(), 2);
    }

    #[test]
    fn default_view_looks_down_negative_z() {
        let view = RenderView::default();
        let clip = view.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
