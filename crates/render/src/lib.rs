//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene; they never mutate it.
//! - Camera motion lives in [`OrbitControls`], outside the scene.
//!
//! The GPU backend and the [`DebugTextRenderer`] implement the same
//! [`Renderer`] trait, so the frame driver can be exercised without a window.

mod orbit;
mod renderer;
mod viewport;

pub use orbit::{OrbitControls, Spherical};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use viewport::{MAX_PIXEL_RATIO, Viewport};
