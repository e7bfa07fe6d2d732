//! Procedural geometry for the honeybear scene.
//!
//! Every generator returns a CPU-side [`MeshData`] with counter-clockwise
//! front faces. Geometry is immutable once built and shared by handle; the
//! GPU backend uploads it once.
//!
//! # Invariants
//! - Index buffers only reference vertices of the same mesh.
//! - Normals are unit length.

mod mesh;
mod primitives;
mod text;
mod triangulate;
mod typeface;

pub use mesh::{MeshData, Vertex};
pub use primitives::{arrow_mesh, box_mesh, sphere_mesh, torus_mesh};
pub use text::{TextOptions, text_mesh};
pub use triangulate::{signed_area, triangulate};
pub use typeface::{PathCommand, Shape, Typeface};

/// Errors from geometry construction.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("typeface JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed outline for glyph {glyph:?}: {detail}")]
    MalformedOutline { glyph: String, detail: String },
    #[error("typeface resolution must be positive, got {0}")]
    InvalidResolution(f32),
}
