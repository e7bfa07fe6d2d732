use crate::renderer::RenderView;
use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::{PI, TAU};

const EPS: f32 = 1e-6;

/// Spherical coordinates around +Y: `theta` is the azimuth measured from +Z,
/// `phi` the polar angle from +Y.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spherical {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
            self.radius * sin_phi * cos_theta,
        )
    }
}

/// Orbit camera: drag rotates around a target, right drag pans, the wheel
/// dollies. With damping on, input accumulates and bleeds out over frames,
/// so [`OrbitControls::update`] must run every frame.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    spherical_delta: Spherical,
    pan_offset: Vec3,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            spherical_delta: Spherical::default(),
            pan_offset: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    /// Rotate by a pointer drag of `delta` pixels on a viewport `viewport_height` tall.
    /// A drag of the full height turns the camera once around.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.spherical_delta.theta -= TAU * delta.x * self.rotate_speed / h;
        self.spherical_delta.phi -= TAU * delta.y * self.rotate_speed / h;
    }

    /// Pan so that the point under the cursor follows a drag of `delta` pixels.
    pub fn pan(&mut self, delta: Vec2, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        let target_distance =
            (self.position - self.target).length() * (self.fov_degrees.to_radians() * 0.5).tan();
        let camera = self.view_matrix().inverse();
        let right = camera.x_axis.truncate();
        let up = camera.y_axis.truncate();
        self.pan_offset += right * (-2.0 * delta.x * target_distance / h);
        self.pan_offset += up * (2.0 * delta.y * target_distance / h);
    }

    /// Wheel input. Negative `scroll` (wheel away from the user) moves closer.
    pub fn dolly(&mut self, scroll: f32) {
        let step = 0.95_f32.powf(self.zoom_speed);
        if scroll < 0.0 {
            self.scale *= step;
        } else if scroll > 0.0 {
            self.scale /= step;
        }
    }

    /// Apply pending input. Returns true when the camera moved.
    pub fn update(&mut self) -> bool {
        let before = self.position;
        let mut spherical = Spherical::from_offset(self.position - self.target);

        let factor = if self.enable_damping { self.damping_factor } else { 1.0 };
        spherical.theta += self.spherical_delta.theta * factor;
        spherical.phi += self.spherical_delta.phi * factor;
        spherical.phi = spherical.phi.clamp(EPS, PI - EPS);
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);
        self.target += self.pan_offset * factor;

        self.position = self.target + spherical.to_offset();

        if self.enable_damping {
            self.spherical_delta.theta *= 1.0 - self.damping_factor;
            self.spherical_delta.phi *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.spherical_delta = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        before.distance_squared(self.position) > EPS
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn spherical(&self) -> Spherical {
        Spherical::from_offset(self.position - self.target)
    }

    /// Snapshot for the renderer at the given aspect ratio.
    pub fn view(&self, aspect: f32) -> RenderView {
        RenderView {
            eye: self.position,
            target: self.target,
            fov_degrees: self.fov_degrees,
            aspect,
            near: self.near,
            far: self.far,
        }
    }
}
