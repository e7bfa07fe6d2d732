//! Animation for honeybear.
//!
//! [`SceneConfig`] is the one shared, tunable configuration: the control
//! panel writes it, the [`FrameDriver`] reads it once per frame. Nodes are
//! dispatched on [`MeshKind`](honeybear_common::MeshKind); kinds without a
//! [`RotationPolicy`] never rotate.

mod clock;
mod config;
mod driver;
mod rotation;

pub use clock::Clock;
pub use config::{MaterialParameters, RotationConfig, RotationPolicy, SceneConfig};
pub use driver::FrameDriver;
pub use rotation::{refresh_text_material, rotation_angle, update_rotation};
