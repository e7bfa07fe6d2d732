use glam::Vec2;

/// Shoelace area. Positive for counter-clockwise polygons.
pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        twice += a.x * b.y - b.x * a.y;
    }
    twice * 0.5
}

/// Even-odd ray test.
pub(crate) fn point_in_polygon(p: Vec2, polygon: &[Vec2]) -> bool {
    let n = polygon.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn cross(o: Vec2, a: Vec2, b: Vec2) -> f32 {
    (a - o).perp_dot(b - o)
}

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    cross(a, b, p) >= 0.0 && cross(b, c, p) >= 0.0 && cross(c, a, p) >= 0.0
}

/// Triangulate a polygon with holes by ear clipping.
///
/// Returned indices address the concatenation `outer ++ holes[0] ++ holes[1] ..`.
/// Triangles are counter-clockwise regardless of the input winding.
pub fn triangulate(outer: &[Vec2], holes: &[Vec<Vec2>]) -> Vec<[u32; 3]> {
    let mut points: Vec<Vec2> = outer.to_vec();
    let mut ring: Vec<usize> = (0..outer.len()).collect();
    if signed_area(outer) < 0.0 {
        ring.reverse();
    }

    let mut hole_rings = Vec::with_capacity(holes.len());
    for hole in holes {
        let start = points.len();
        points.extend_from_slice(hole);
        let mut hole_ring: Vec<usize> = (start..points.len()).collect();
        if signed_area(hole) > 0.0 {
            hole_ring.reverse();
        }
        if hole_ring.len() >= 3 {
            hole_rings.push(hole_ring);
        }
    }

    // Rightmost holes first: every ray cast to +x then only meets the outer
    // ring or holes already merged into it.
    let rightmost = |r: &Vec<usize>| {
        r.iter()
            .map(|&i| points[i].x)
            .fold(f32::NEG_INFINITY, f32::max)
    };
    hole_rings.sort_by(|a, b| rightmost(b).total_cmp(&rightmost(a)));
    for hole in hole_rings {
        ring = bridge_hole(&points, ring, &hole);
    }

    ear_clip(&points, ring)
}

/// Splice `hole` into `ring` through a zero-width bridge from the hole's
/// rightmost vertex to a mutually visible ring vertex.
fn bridge_hole(points: &[Vec2], ring: Vec<usize>, hole: &[usize]) -> Vec<usize> {
    let (start, m) = hole
        .iter()
        .enumerate()
        .map(|(k, &i)| (k, points[i]))
        .fold((0, Vec2::splat(f32::NEG_INFINITY)), |best, (k, p)| {
            if p.x > best.1.x { (k, p) } else { best }
        });

    let n = ring.len();
    let mut hit_x = f32::INFINITY;
    let mut candidate = None;
    for i in 0..n {
        let a = points[ring[i]];
        let b = points[ring[(i + 1) % n]];
        if a.y == b.y || (m.y - a.y) * (m.y - b.y) > 0.0 {
            continue;
        }
        let x = a.x + (m.y - a.y) * (b.x - a.x) / (b.y - a.y);
        if x >= m.x && x < hit_x {
            hit_x = x;
            candidate = Some(if a.x > b.x { i } else { (i + 1) % n });
        }
    }

    let Some(mut bridge) = candidate else {
        tracing::debug!("no bridge found for hole, dropping it");
        return ring;
    };

    // A ring vertex inside the triangle (m, hit, candidate) would block the
    // bridge; pick the one closest in angle to the ray instead.
    let hit = Vec2::new(hit_x, m.y);
    let target = points[ring[bridge]];
    let (a, b) = if target.y < m.y { (hit, target) } else { (target, hit) };
    let mut best_tan = f32::INFINITY;
    for (k, &i) in ring.iter().enumerate() {
        let p = points[i];
        if p.x <= m.x || k == bridge {
            continue;
        }
        if point_in_triangle(p, m, a, b) || point_in_triangle(p, m, b, a) {
            let tan = (p.y - m.y).abs() / (p.x - m.x);
            if tan < best_tan {
                best_tan = tan;
                bridge = k;
            }
        }
    }
    if best_tan.is_finite() {
        tracing::trace!("bridge moved to blocking vertex");
    }

    // Earlier bridges may have duplicated the chosen vertex; splice in at the
    // copy whose corner opens toward the hole.
    let target = points[ring[bridge]];
    let copies: Vec<usize> = (0..n).filter(|&k| points[ring[k]] == target).collect();
    if copies.len() > 1 {
        let facing = copies
            .iter()
            .copied()
            .find(|&k| sector_contains(points, &ring, k, m, true))
            .or_else(|| {
                copies
                    .iter()
                    .copied()
                    .find(|&k| sector_contains(points, &ring, k, m, false))
            });
        if let Some(k) = facing {
            bridge = k;
        }
    }

    let mut merged = Vec::with_capacity(ring.len() + hole.len() + 2);
    merged.extend_from_slice(&ring[..=bridge]);
    merged.extend(hole[start..].iter().chain(&hole[..start]));
    merged.push(hole[start]);
    merged.push(ring[bridge]);
    merged.extend_from_slice(&ring[bridge + 1..]);
    merged
}

/// Whether `q` lies within the interior angle of the ring corner at `k`.
/// The ring is counter-clockwise; `strict` excludes the corner's own edges.
fn sector_contains(points: &[Vec2], ring: &[usize], k: usize, q: Vec2, strict: bool) -> bool {
    let n = ring.len();
    let v = points[ring[k]];
    let incoming = v - points[ring[(k + n - 1) % n]];
    let outgoing = points[ring[(k + 1) % n]] - v;
    let d = q - v;
    let left_of = |edge: Vec2| {
        let side = edge.perp_dot(d);
        if strict { side > 0.0 } else { side >= 0.0 }
    };
    if incoming.perp_dot(outgoing) >= 0.0 {
        left_of(incoming) && left_of(outgoing)
    } else {
        left_of(incoming) || left_of(outgoing)
    }
}

fn ear_clip(points: &[Vec2], mut ring: Vec<usize>) -> Vec<[u32; 3]> {
    const EPSILON: f32 = 1e-12;
    let mut triangles = Vec::with_capacity(ring.len().saturating_sub(2));
    let mut cursor = 0;

    while ring.len() > 3 {
        let n = ring.len();
        let mut clipped = false;
        for step in 0..n {
            let i = (cursor + step) % n;
            let (ia, ib, ic) = (ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n]);
            let (a, b, c) = (points[ia], points[ib], points[ic]);
            if cross(a, b, c) <= EPSILON {
                continue;
            }
            let blocked = ring.iter().any(|&j| {
                let p = points[j];
                j != ia
                    && j != ib
                    && j != ic
                    && p != a
                    && p != b
                    && p != c
                    && point_in_triangle(p, a, b, c)
            });
            if blocked {
                continue;
            }
            triangles.push([ia as u32, ib as u32, ic as u32]);
            ring.remove(i);
            cursor = i % ring.len();
            clipped = true;
            break;
        }

        if !clipped {
            // Only degenerate (collinear or self-touching) corners remain.
            let (ia, ib, ic) = (ring[n - 1], ring[0], ring[1]);
            if cross(points[ia], points[ib], points[ic]) > EPSILON {
                triangles.push([ia as u32, ib as u32, ic as u32]);
            }
            ring.remove(0);
            cursor = 0;
        }
    }

    if let [ia, ib, ic] = ring[..] {
        if cross(points[ia], points[ib], points[ic]) > EPSILON {
            triangles.push([ia as u32, ib as u32, ic as u32]);
        }
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area_of(points: &[Vec2], triangles: &[[u32; 3]]) -> f32 {
        triangles
            .iter()
            .map(|t| {
                let [a, b, c] = t.map(|i| points[i as usize]);
                cross(a, b, c) * 0.5
            })
            .sum()
    }

    fn square(min: f32, max: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(min, min),
            Vec2::new(max, min),
            Vec2::new(max, max),
            Vec2::new(min, max),
        ]
    }

    #[test]
    fn signed_area_sign_follows_winding() {
        let mut sq = square(0.0, 2.0);
        assert_eq!(signed_area(&sq), 4.0);
        sq.reverse();
        assert_eq!(signed_area(&sq), -4.0);
    }

    #[test]
    fn square_becomes_two_ccw_triangles() {
        let sq = square(0.0, 1.0);
        let tris = triangulate(&sq, &[]);
        assert_eq!(tris.len(), 2);
        assert!((area_of(&sq, &tris) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn clockwise_input_still_yields_ccw_triangles() {
        let mut sq = square(0.0, 1.0);
        sq.reverse();
        let tris = triangulate(&sq, &[]);
        for t in &tris {
            let [a, b, c] = t.map(|i| sq[i as usize]);
            assert!(cross(a, b, c) > 0.0);
        }
    }

    #[test]
    fn concave_polygon_area_is_preserved() {
        let l_shape = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(0.0, 2.0),
        ];
        let tris = triangulate(&l_shape, &[]);
        assert_eq!(tris.len(), 4);
        assert!((area_of(&l_shape, &tris) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn hole_area_is_excluded() {
        let outer = square(0.0, 4.0);
        let hole = square(1.0, 2.0);
        let tris = triangulate(&outer, std::slice::from_ref(&hole));

        let mut points = outer.clone();
        points.extend_from_slice(&hole);
        assert!((area_of(&points, &tris) - 15.0).abs() < 1e-4);
        assert!(tris.iter().flatten().all(|&i| (i as usize) < points.len()));
    }

    #[test]
    fn two_holes_are_both_excluded() {
        let outer = square(0.0, 10.0);
        let holes = vec![square(1.0, 3.0), square(6.0, 8.0)];
        let tris = triangulate(&outer, &holes);

        let mut points = outer.clone();
        for h in &holes {
            points.extend_from_slice(h);
        }
        assert!((area_of(&points, &tris) - 92.0).abs() < 1e-3);
    }

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(x0, y0),
            Vec2::new(x1, y0),
            Vec2::new(x1, y1),
            Vec2::new(x0, y1),
        ]
    }

    fn excluded_area(outer: &[Vec2], holes: &[Vec<Vec2>]) -> f32 {
        let tris = triangulate(outer, holes);
        let mut points = outer.to_vec();
        for h in holes {
            points.extend_from_slice(h);
        }
        for t in &tris {
            let [a, b, c] = t.map(|i| points[i as usize]);
            assert!(cross(a, b, c) > 0.0);
        }
        area_of(&points, &tris)
    }

    #[test]
    fn holes_sharing_a_bridge_vertex_keep_area() {
        // All three rays hit the same vertical edge and bridge to one corner.
        let outer = rect(0.0, 0.0, 10.0, 10.0);
        let holes = vec![
            rect(1.0, 1.0, 3.0, 3.0),
            rect(1.0, 4.0, 3.0, 6.0),
            rect(1.0, 7.0, 3.0, 9.0),
        ];
        assert!((excluded_area(&outer, &holes) - 88.0).abs() < 1e-3);
    }

    #[test]
    fn stacked_holes_beside_tall_hole_keep_area() {
        let outer = rect(0.0, 0.0, 10.0, 10.0);
        let holes = vec![
            rect(1.0, 1.0, 3.0, 3.0),
            rect(1.0, 4.0, 3.0, 6.0),
            rect(1.0, 7.0, 3.0, 9.0),
            rect(5.0, 1.0, 7.0, 9.0),
        ];
        assert!((excluded_area(&outer, &holes) - 72.0).abs() < 1e-3);
    }

    #[test]
    fn sector_test_picks_corner_facing_point() {
        // Convex corner at (1, 0) of a CCW unit square.
        let points = rect(0.0, 0.0, 1.0, 1.0);
        let ring = vec![0, 1, 2, 3];
        assert!(sector_contains(&points, &ring, 1, Vec2::new(0.5, 0.5), true));
        assert!(!sector_contains(&points, &ring, 1, Vec2::new(1.5, 0.5), true));
        assert!(!sector_contains(&points, &ring, 1, Vec2::new(0.5, 0.0), true));
        assert!(sector_contains(&points, &ring, 1, Vec2::new(0.5, 0.0), false));
    }

    #[test]
    fn point_in_polygon_basic() {
        let sq = square(0.0, 1.0);
        assert!(point_in_polygon(Vec2::splat(0.5), &sq));
        assert!(!point_in_polygon(Vec2::new(1.5, 0.5), &sq));
    }
}
