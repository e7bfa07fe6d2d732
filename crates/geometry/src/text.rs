use crate::GeometryError;
use crate::mesh::MeshData;
use crate::triangulate::triangulate;
use crate::typeface::{Shape, Typeface};
use glam::{Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Extrusion parameters for text geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOptions {
    pub size: f32,
    pub depth: f32,
    pub curve_segments: u32,
    pub bevel_enabled: bool,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_offset: f32,
    pub bevel_segments: u32,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            size: 0.5,
            depth: 0.2,
            curve_segments: 5,
            bevel_enabled: true,
            bevel_thickness: 0.03,
            bevel_size: 0.02,
            bevel_offset: 0.0,
            bevel_segments: 4,
        }
    }
}

impl TextOptions {
    /// `(z, outward offset)` for every ring of the extrusion, front to back.
    fn layers(&self) -> Vec<(f32, f32)> {
        if !self.bevel_enabled || self.bevel_segments == 0 {
            return vec![(0.0, self.bevel_offset), (self.depth, self.bevel_offset)];
        }
        let n = self.bevel_segments;
        let bevel = |b: u32| {
            let t = b as f32 / n as f32 * FRAC_PI_2;
            (
                self.bevel_thickness * t.cos(),
                self.bevel_size * t.sin() + self.bevel_offset,
            )
        };
        let mut layers = Vec::with_capacity(2 * n as usize + 2);
        for b in 0..=n {
            let (z, e) = bevel(b);
            layers.push((-z, e));
        }
        layers.push((self.depth, self.bevel_size + self.bevel_offset));
        for b in (0..n).rev() {
            let (z, e) = bevel(b);
            layers.push((self.depth + z, e));
        }
        layers
    }
}

/// Build extruded, beveled geometry for `text`, centered on its bounding box.
pub fn text_mesh(
    typeface: &Typeface,
    text: &str,
    options: &TextOptions,
) -> Result<MeshData, GeometryError> {
    let shapes = typeface.shapes(text, options.size, options.curve_segments)?;
    let layers = options.layers();
    let mut mesh = MeshData::new();
    for shape in &shapes {
        extrude_shape(&mut mesh, shape, &layers);
    }
    mesh.center();
    tracing::debug!(
        text,
        shapes = shapes.len(),
        vertices = mesh.vertex_count(),
        "built text geometry"
    );
    Ok(mesh)
}

fn extrude_shape(mesh: &mut MeshData, shape: &Shape, layers: &[(f32, f32)]) {
    let contours: Vec<&[Vec2]> = std::iter::once(shape.outer.as_slice())
        .chain(shape.holes.iter().map(Vec::as_slice))
        .collect();
    let offsets: Vec<Vec<Vec2>> = contours.iter().map(|c| bevel_vectors(c)).collect();

    let ring_point = |contour: usize, i: usize, layer: usize| -> Vec3 {
        let (z, e) = layers[layer];
        let p = contours[contour][i] + offsets[contour][i] * e;
        Vec3::new(p.x, p.y, z)
    };
    let flat: Vec<(usize, usize)> = contours
        .iter()
        .enumerate()
        .flat_map(|(c, pts)| (0..pts.len()).map(move |i| (c, i)))
        .collect();

    let last = layers.len() - 1;
    for tri in triangulate(&shape.outer, &shape.holes) {
        let [a, b, c] = tri.map(|k| flat[k as usize]);
        let uv = |(c, i): (usize, usize)| contours[c][i];

        let back = [a, b, c].map(|(ci, i)| ring_point(ci, i, last));
        mesh.push_flat_triangle(back, [uv(a), uv(b), uv(c)]);

        // Front cap faces -z, so its winding is reversed.
        let front = [c, b, a].map(|(ci, i)| ring_point(ci, i, 0));
        mesh.push_flat_triangle(front, [uv(c), uv(b), uv(a)]);
    }

    for (ci, contour) in contours.iter().enumerate() {
        let n = contour.len();
        for layer in 0..last {
            for i in 0..n {
                let j = (i + 1) % n;
                let a = ring_point(ci, i, layer);
                let b = ring_point(ci, j, layer);
                let c = ring_point(ci, j, layer + 1);
                let d = ring_point(ci, i, layer + 1);
                let [ua, ub, uc, ud] = side_uvs([a, b, c, d]);
                mesh.push_flat_triangle([a, b, c], [ua, ub, uc]);
                mesh.push_flat_triangle([a, c, d], [ua, uc, ud]);
            }
        }
    }
}

/// Per-vertex miter directions pointing away from the filled region, scaled
/// so that offsetting by `e` moves both adjacent edges out by `e`.
/// Expects outer contours counter-clockwise and holes clockwise.
fn bevel_vectors(contour: &[Vec2]) -> Vec<Vec2> {
    let n = contour.len();
    let edge_normal = |from: Vec2, to: Vec2| {
        let d = (to - from).normalize_or_zero();
        Vec2::new(d.y, -d.x)
    };
    (0..n)
        .map(|i| {
            let prev = contour[(i + n - 1) % n];
            let here = contour[i];
            let next = contour[(i + 1) % n];
            let n1 = edge_normal(prev, here);
            let n2 = edge_normal(here, next);
            let denom = 1.0 + n1.dot(n2);
            if denom < 1e-3 {
                return n1;
            }
            let miter = (n1 + n2) / denom;
            // Very sharp corners would otherwise spike far out.
            miter.clamp_length_max(3.0)
        })
        .collect()
}

fn side_uvs(quad: [Vec3; 4]) -> [Vec2; 4] {
    let [a, b, _, _] = quad;
    let along_x = (a.y - b.y).abs() < (a.x - b.x).abs();
    quad.map(|p| {
        if along_x {
            Vec2::new(p.x, 1.0 - p.z)
        } else {
            Vec2::new(p.y, 1.0 - p.z)
        }
    })
}
