//! Shared types for the honeybear scene demo.

mod types;

pub use types::{MaterialHandle, MeshHandle, MeshKind, NodeId, Transform};
