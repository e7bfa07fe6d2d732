//! wgpu render backend for the honeybear scene.
//!
//! Each shared geometry is uploaded once; visible nodes become instances
//! grouped by mesh, so a frame issues one indexed draw per geometry.
//!
//! # Invariants
//! - Renderer never mutates scene state.
//! - Environment and matcap textures always exist; a failed load keeps a
//!   1x1 fallback bound.

mod gpu;
mod instances;
mod shaders;

pub use gpu::{Lighting, WgpuFrame, WgpuRenderer};
pub use instances::{InstanceBatch, InstanceData, build_instances, srgb_to_linear};
