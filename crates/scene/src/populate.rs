use crate::scene::{Scene, SceneNode};
use glam::Vec3;
use honeybear_common::{MaterialHandle, MeshHandle, MeshKind, NodeId, Transform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

/// Upper bound on the uniform scale of populated nodes.
pub const MAX_SCALE: f32 = 0.6;
/// Side length of the cube, centered on the origin, that nodes land in.
pub const SCATTER_EXTENT: f32 = 10.0;

/// Mass-creates randomly transformed nodes of one kind.
#[derive(Debug, Clone)]
pub struct Populator<R = StdRng> {
    rng: R,
}

impl Populator<StdRng> {
    /// Reproducible placement for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> Populator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw one random transform.
    ///
    /// Uniform samples below 0.6 keep their value; anything above is clamped,
    /// so roughly 40% of nodes share the maximum scale.
    pub fn sample_transform(&mut self) -> Transform {
        let s = self.rng.r#gen::<f32>().min(MAX_SCALE);
        let mut offset = || (self.rng.r#gen::<f32>() - 0.5) * SCATTER_EXTENT;
        let position = Vec3::new(offset(), offset(), offset());
        let rotation = Vec3::new(
            self.rng.r#gen::<f32>() * PI,
            self.rng.r#gen::<f32>() * PI,
            0.0,
        );
        Transform {
            position,
            rotation,
            scale: Vec3::splat(s),
        }
    }

    /// Add `count` visible nodes of `kind` sharing `mesh` and `material`.
    /// Existing nodes are never touched.
    pub fn populate(
        &mut self,
        scene: &mut Scene,
        kind: MeshKind,
        mesh: MeshHandle,
        material: MaterialHandle,
        count: usize,
    ) -> Vec<NodeId> {
        let ids: Vec<NodeId> = (0..count)
            .map(|_| {
                let transform = self.sample_transform();
                scene.add(SceneNode::new(kind, mesh, material).with_transform(transform))
            })
            .collect();
        tracing::debug!(%kind, count, total = scene.count_of(kind), "populated nodes");
        ids
    }
}
