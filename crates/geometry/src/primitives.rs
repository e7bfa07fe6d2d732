use crate::mesh::{MeshData, Vertex};
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Axis-aligned box centered on the origin, one quad per face.
pub fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);
    // (normal, four corners counter-clockwise seen from outside)
    #[rustfmt::skip]
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([0.0, 0.0, 1.0],  [[-x, -y,  z], [ x, -y,  z], [ x,  y,  z], [-x,  y,  z]]),
        ([0.0, 0.0, -1.0], [[ x, -y, -z], [-x, -y, -z], [-x,  y, -z], [ x,  y, -z]]),
        ([1.0, 0.0, 0.0],  [[ x, -y,  z], [ x, -y, -z], [ x,  y, -z], [ x,  y,  z]]),
        ([-1.0, 0.0, 0.0], [[-x, -y, -z], [-x, -y,  z], [-x,  y,  z], [-x,  y, -z]]),
        ([0.0, 1.0, 0.0],  [[-x,  y,  z], [ x,  y,  z], [ x,  y, -z], [-x,  y, -z]]),
        ([0.0, -1.0, 0.0], [[-x, -y, -z], [ x, -y, -z], [ x, -y,  z], [-x, -y,  z]]),
    ];
    let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    let mut mesh = MeshData::new();
    for (normal, corners) in faces {
        let base = mesh.vertices.len() as u32;
        for (position, uv) in corners.into_iter().zip(uvs) {
            mesh.vertices.push(Vertex { position, normal, uv });
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    mesh
}

/// UV sphere with `width_segments` around and `height_segments` pole to pole.
pub fn sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = MeshData::new();

    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        // Pole vertices sit at the middle of their segment in U.
        let u_offset = if iy == 0 {
            0.5 / ws as f32
        } else if iy == hs {
            -0.5 / ws as f32
        } else {
            0.0
        };
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let (sin_theta, cos_theta) = (v * PI).sin_cos();
            let (sin_phi, cos_phi) = (u * TAU).sin_cos();
            let position = Vec3::new(
                -radius * cos_phi * sin_theta,
                radius * cos_theta,
                radius * sin_phi * sin_theta,
            );
            mesh.push_vertex(Vertex::new(
                position,
                position.normalize_or_zero(),
                Vec2::new(u + u_offset, 1.0 - v),
            ));
        }
    }

    let row = ws + 1;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Torus in the XY plane: `radius` from center to tube center, `tube` thickness.
pub fn torus_mesh(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);
    let mut mesh = MeshData::new();

    for j in 0..=radial {
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let v = j as f32 / radial as f32 * TAU;
            let ring = radius + tube * v.cos();
            let position = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.push_vertex(Vertex::new(
                position,
                (position - center).normalize_or_zero(),
                Vec2::new(i as f32 / tubular as f32, j as f32 / radial as f32),
            ));
        }
    }

    let row = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

/// Arrow pointing along +Y from the origin: thin shaft plus a cone head.
pub fn arrow_mesh(length: f32, head_length: f32, head_width: f32) -> MeshData {
    const SHAFT_RADIUS: f32 = 0.01;
    const SHAFT_SEGMENTS: u32 = 8;
    const HEAD_SEGMENTS: u32 = 5;

    let shaft_top = (length - head_length).max(0.0);
    let head_radius = head_width * 0.5;
    let mut mesh = MeshData::new();

    push_disc(&mut mesh, SHAFT_RADIUS, 0.0, SHAFT_SEGMENTS);
    push_band(
        &mut mesh,
        (SHAFT_RADIUS, 0.0),
        (SHAFT_RADIUS, shaft_top),
        SHAFT_SEGMENTS,
    );
    push_disc(&mut mesh, head_radius, shaft_top, HEAD_SEGMENTS);
    push_band(&mut mesh, (head_radius, shaft_top), (0.0, length), HEAD_SEGMENTS);
    mesh
}

/// Surface of revolution between two rings around the Y axis, facing outward.
fn push_band(mesh: &mut MeshData, bottom: (f32, f32), top: (f32, f32), segments: u32) {
    let (r0, y0) = bottom;
    let (r1, y1) = top;
    let slope = r0 - r1;
    let height = y1 - y0;
    let base = mesh.vertices.len() as u32;

    for k in 0..=segments {
        let t = k as f32 / segments as f32;
        let (sin, cos) = (t * TAU).sin_cos();
        let normal = Vec3::new(cos * height, slope, sin * height).normalize_or_zero();
        mesh.push_vertex(Vertex::new(
            Vec3::new(r0 * cos, y0, r0 * sin),
            normal,
            Vec2::new(t, 0.0),
        ));
        mesh.push_vertex(Vertex::new(
            Vec3::new(r1 * cos, y1, r1 * sin),
            normal,
            Vec2::new(t, 1.0),
        ));
    }

    for k in 0..segments {
        let a = base + k * 2;
        let d = a + 1;
        let b = a + 2;
        let c = a + 3;
        mesh.indices.extend_from_slice(&[a, d, b, b, d, c]);
    }
}

/// Flat disc at height `y`, facing down.
fn push_disc(mesh: &mut MeshData, radius: f32, y: f32, segments: u32) {
    let center = mesh.push_vertex(Vertex::new(
        Vec3::new(0.0, y, 0.0),
        Vec3::NEG_Y,
        Vec2::splat(0.5),
    ));
    for k in 0..=segments {
        let (sin, cos) = (k as f32 / segments as f32 * TAU).sin_cos();
        mesh.push_vertex(Vertex::new(
            Vec3::new(radius * cos, y, radius * sin),
            Vec3::NEG_Y,
            Vec2::new(cos * 0.5 + 0.5, sin * 0.5 + 0.5),
        ));
    }
    for k in 0..segments {
        let a = center + 1 + k;
        mesh.indices.extend_from_slice(&[center, a, a + 1]);
    }
}
