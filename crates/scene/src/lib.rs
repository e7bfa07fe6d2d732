//! Scene state for honeybear.
//!
//! The [`Scene`] owns every node and the shared material table. Renderers,
//! the animation driver and the control panel all work from it; nothing is
//! ever removed, so node counts only grow.

mod material;
mod populate;
mod scene;

pub use material::{Material, MaterialKind};
pub use populate::{MAX_SCALE, Populator, SCATTER_EXTENT};
pub use scene::{Scene, SceneNode};
