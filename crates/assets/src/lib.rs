//! Asset loading and the shared geometry/material factory.
//!
//! Files are read on short-lived loader threads; results come back through a
//! completion callback so the caller decides which thread mutates the scene.
//! The renderer consumes geometry by [`MeshHandle`](honeybear_common::MeshHandle),
//! never by raw file paths.

mod library;
mod loader;
mod texture;

pub use library::{ARROW_LENGTH, AXIS_COLORS, GeometryLibrary, SceneAssets, TEXT_LITERAL};
pub use loader::{AssetPaths, load_typeface, spawn_load};
pub use texture::{CUBE_FACES, CubeMapImages, ImageData, load_cube_map, load_image};

use std::path::PathBuf;

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error(transparent)]
    Geometry(#[from] honeybear_geometry::GeometryError),
    #[error("cube map needs 6 faces, got {0}")]
    CubeMapFaceCount(usize),
    #[error("cube map face {face} is {found:?}, expected square {expected}x{expected}")]
    CubeMapMismatch {
        face: &'static str,
        expected: u32,
        found: (u32, u32),
    },
}
