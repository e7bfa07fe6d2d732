use crate::clock::Clock;
use crate::config::SceneConfig;
use crate::rotation::update_rotation;
use honeybear_render::{OrbitControls, Renderer};
use honeybear_scene::Scene;

/// Per-frame update: rotate, advance camera damping, render once.
///
/// The host calls [`FrameDriver::frame`] from its redraw handler and then
/// requests the next redraw; the driver never blocks or sleeps.
#[derive(Debug, Default)]
pub struct FrameDriver {
    clock: Clock,
    frames: u64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self { clock, frames: 0 }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn frame<R: Renderer>(
        &mut self,
        scene: &mut Scene,
        config: &SceneConfig,
        controls: &mut OrbitControls,
        renderer: &mut R,
        aspect: f32,
    ) -> R::Output {
        let elapsed = self.clock.seconds();
        self.frame_at(elapsed, scene, config, controls, renderer, aspect)
    }

    /// [`frame`](Self::frame) at an explicit elapsed time.
    pub fn frame_at<R: Renderer>(
        &mut self,
        elapsed: f32,
        scene: &mut Scene,
        config: &SceneConfig,
        controls: &mut OrbitControls,
        renderer: &mut R,
        aspect: f32,
    ) -> R::Output {
        update_rotation(scene, config, elapsed);
        controls.update();
        self.frames += 1;
        if self.frames % 600 == 0 {
            tracing::trace!(frame = self.frames, elapsed, nodes = scene.len(), "frame");
        }
        renderer.render(scene, &controls.view(aspect))
    }
}
