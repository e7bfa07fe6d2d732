use crate::GeometryError;
use crate::triangulate::{point_in_polygon, signed_area};
use glam::Vec2;
use serde::Deserialize;
use std::collections::HashMap;

/// A font in the three.js "typeface" JSON layout.
///
/// Glyph outlines are strings of `m x y`, `l x y`, `q x y cx cy` and
/// `b x y c1x c1y c2x c2y` commands in font units (`resolution` units per em).
#[derive(Debug, Clone, Deserialize)]
pub struct Typeface {
    pub glyphs: HashMap<String, Glyph>,
    #[serde(rename = "familyName", default)]
    pub family_name: String,
    pub resolution: f32,
    #[serde(rename = "boundingBox")]
    pub bounding_box: BoundingBox,
    #[serde(rename = "underlineThickness", default)]
    pub underline_thickness: f32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BoundingBox {
    #[serde(rename = "yMin")]
    pub y_min: f32,
    #[serde(rename = "yMax")]
    pub y_max: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Glyph {
    /// Horizontal advance.
    pub ha: f32,
    /// Outline commands. Absent for whitespace.
    #[serde(default)]
    pub o: Option<String>,
}

/// One outline drawing command, already in layout space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { ctrl: Vec2, to: Vec2 },
    CubicTo { ctrl1: Vec2, ctrl2: Vec2, to: Vec2 },
}

/// A filled region: one outer contour (counter-clockwise) with its holes (clockwise).
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub outer: Vec<Vec2>,
    pub holes: Vec<Vec<Vec2>>,
}

impl Typeface {
    pub fn from_json(json: &str) -> Result<Self, GeometryError> {
        let typeface: Self = serde_json::from_str(json)?;
        if typeface.resolution <= 0.0 {
            return Err(GeometryError::InvalidResolution(typeface.resolution));
        }
        Ok(typeface)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, GeometryError> {
        let typeface: Self = serde_json::from_slice(bytes)?;
        if typeface.resolution <= 0.0 {
            return Err(GeometryError::InvalidResolution(typeface.resolution));
        }
        Ok(typeface)
    }

    /// Distance between baselines at the given size.
    pub fn line_height(&self, size: f32) -> f32 {
        let scale = size / self.resolution;
        (self.bounding_box.y_max - self.bounding_box.y_min + self.underline_thickness) * scale
    }

    /// Lay `text` out left to right, one path per glyph. `\n` starts a new line.
    /// Unknown characters use the `?` glyph, or are skipped if that is missing too.
    pub fn layout(&self, text: &str, size: f32) -> Result<Vec<Vec<PathCommand>>, GeometryError> {
        let scale = size / self.resolution;
        let line_height = self.line_height(size);
        let mut pen = Vec2::ZERO;
        let mut paths = Vec::new();

        for ch in text.chars() {
            if ch == '\n' {
                pen = Vec2::new(0.0, pen.y - line_height);
                continue;
            }
            let key = ch.to_string();
            let Some(glyph) = self.glyphs.get(&key).or_else(|| self.glyphs.get("?")) else {
                tracing::warn!(
                    "character {ch:?} missing from typeface {:?}",
                    self.family_name
                );
                continue;
            };
            if let Some(outline) = &glyph.o {
                let commands = parse_outline(outline, scale, pen)
                    .map_err(|detail| GeometryError::MalformedOutline { glyph: key, detail })?;
                paths.push(commands);
            }
            pen.x += glyph.ha * scale;
        }
        Ok(paths)
    }

    /// Lay out `text` and resolve each glyph's contours into filled shapes.
    pub fn shapes(
        &self,
        text: &str,
        size: f32,
        curve_segments: u32,
    ) -> Result<Vec<Shape>, GeometryError> {
        let mut shapes = Vec::new();
        for path in self.layout(text, size)? {
            shapes.extend(group_contours(flatten(&path, curve_segments)));
        }
        Ok(shapes)
    }
}

fn parse_outline(outline: &str, scale: f32, offset: Vec2) -> Result<Vec<PathCommand>, String> {
    let mut tokens = outline.split_whitespace();
    let point = |tokens: &mut std::str::SplitWhitespace<'_>| -> Result<Vec2, String> {
        let mut coord = || -> Result<f32, String> {
            let token = tokens.next().ok_or("outline ends mid-command")?;
            token
                .parse::<f32>()
                .map_err(|_| format!("invalid coordinate {token:?}"))
        };
        let x = coord()?;
        let y = coord()?;
        Ok(Vec2::new(x, y) * scale + offset)
    };

    let mut commands = Vec::new();
    while let Some(action) = tokens.next() {
        let command = match action {
            "m" => PathCommand::MoveTo(point(&mut tokens)?),
            "l" => PathCommand::LineTo(point(&mut tokens)?),
            "q" => {
                let to = point(&mut tokens)?;
                let ctrl = point(&mut tokens)?;
                PathCommand::QuadTo { ctrl, to }
            }
            "b" => {
                let to = point(&mut tokens)?;
                let ctrl1 = point(&mut tokens)?;
                let ctrl2 = point(&mut tokens)?;
                PathCommand::CubicTo { ctrl1, ctrl2, to }
            }
            // Contours are implicitly closed.
            "z" => continue,
            other => return Err(format!("unknown command {other:?}")),
        };
        commands.push(command);
    }
    Ok(commands)
}

/// Convert commands into closed polylines, `curve_segments` points per curve.
fn flatten(commands: &[PathCommand], curve_segments: u32) -> Vec<Vec<Vec2>> {
    let segments = curve_segments.max(1);
    let mut contours: Vec<Vec<Vec2>> = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();
    let mut cursor = Vec2::ZERO;

    for command in commands {
        match *command {
            PathCommand::MoveTo(p) => {
                if !current.is_empty() {
                    contours.push(std::mem::take(&mut current));
                }
                current.push(p);
                cursor = p;
            }
            PathCommand::LineTo(p) => {
                current.push(p);
                cursor = p;
            }
            PathCommand::QuadTo { ctrl, to } => {
                for i in 1..=segments {
                    let t = i as f32 / segments as f32;
                    let s = 1.0 - t;
                    current.push(cursor * (s * s) + ctrl * (2.0 * s * t) + to * (t * t));
                }
                cursor = to;
            }
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                for i in 1..=segments {
                    let t = i as f32 / segments as f32;
                    let s = 1.0 - t;
                    current.push(
                        cursor * (s * s * s)
                            + ctrl1 * (3.0 * s * s * t)
                            + ctrl2 * (3.0 * s * t * t)
                            + to * (t * t * t),
                    );
                }
                cursor = to;
            }
        }
    }
    if !current.is_empty() {
        contours.push(current);
    }

    for contour in &mut contours {
        contour.dedup_by(|a, b| a.distance_squared(*b) < 1e-12);
        if contour.len() > 1 && contour[0].distance_squared(contour[contour.len() - 1]) < 1e-12 {
            contour.pop();
        }
    }
    contours.retain(|c| c.len() >= 3 && signed_area(c).abs() > 1e-12);
    contours
}

/// Split contours into solids and holes. Fonts mark holes by winding opposite
/// to their solids, so overlapping solids of one winding both stay solid. When
/// the top-level contours disagree on winding, fall back to nesting depth:
/// even depth is solid, odd depth is a hole. Each hole joins the smallest
/// solid around it.
fn group_contours(contours: Vec<Vec<Vec2>>) -> Vec<Shape> {
    let containers: Vec<Vec<usize>> = contours
        .iter()
        .enumerate()
        .map(|(i, c)| {
            (0..contours.len())
                .filter(|&j| j != i && point_in_polygon(c[0], &contours[j]))
                .collect()
        })
        .collect();
    let areas: Vec<f32> = contours.iter().map(|c| signed_area(c)).collect();

    let top: Vec<usize> = (0..contours.len())
        .filter(|&i| containers[i].is_empty())
        .collect();
    let reference = top
        .iter()
        .copied()
        .max_by(|&a, &b| areas[a].abs().total_cmp(&areas[b].abs()));
    let solid: Vec<bool> = match reference {
        Some(r) if top.iter().all(|&i| areas[i].signum() == areas[r].signum()) => {
            areas.iter().map(|a| a.signum() == areas[r].signum()).collect()
        }
        _ => {
            tracing::debug!("mixed outer windings, grouping contours by depth");
            containers.iter().map(|c| c.len() % 2 == 0).collect()
        }
    };

    let mut shapes: Vec<(usize, Shape)> = Vec::new();
    for (i, contour) in contours.iter().enumerate() {
        if solid[i] {
            let mut outer = contour.clone();
            if areas[i] < 0.0 {
                outer.reverse();
            }
            shapes.push((i, Shape { outer, holes: Vec::new() }));
        }
    }

    for (i, contour) in contours.iter().enumerate() {
        if solid[i] {
            continue;
        }
        let parent = containers[i]
            .iter()
            .copied()
            .filter(|&j| solid[j])
            .min_by(|&a, &b| areas[a].abs().total_cmp(&areas[b].abs()));
        let Some(shape) = parent.and_then(|p| shapes.iter_mut().find(|(j, _)| *j == p)) else {
            tracing::debug!("dropping hole contour without a parent");
            continue;
        };
        let mut hole = contour.clone();
        if areas[i] > 0.0 {
            hole.reverse();
        }
        shape.1.holes.push(hole);
    }

    shapes.into_iter().map(|(_, shape)| shape).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Square "O" with a square counter, a solid "I", and a space.
    pub(crate) const TEST_TYPEFACE: &str = r#"{
        "glyphs": {
            "O": { "ha": 120, "o": "m 0 0 l 0 100 l 100 100 l 100 0 l 0 0 m 25 25 l 75 25 l 75 75 l 25 75 l 25 25" },
            "I": { "ha": 40, "o": "m 0 0 l 0 100 l 20 100 l 20 0" },
            "C": { "ha": 100, "o": "m 0 0 q 50 -20 100 0 l 100 100 b 0 100 60 120 40 120" },
            "?": { "ha": 60, "o": "m 0 0 l 0 50 l 50 50 l 50 0" },
            " ": { "ha": 50 }
        },
        "familyName": "Test Sans",
        "resolution": 100,
        "boundingBox": { "yMin": -20, "xMin": 0, "yMax": 100, "xMax": 120 },
        "underlineThickness": 10
    }"#;

    fn typeface() -> Typeface {
        Typeface::from_json(TEST_TYPEFACE).unwrap()
    }

    #[test]
    fn parses_metadata() {
        let tf = typeface();
        assert_eq!(tf.family_name, "Test Sans");
        assert_eq!(tf.glyphs.len(), 5);
        assert!((tf.line_height(1.0) - 1.3).abs() < 1e-6);
    }

    #[test]
    fn rejects_non_positive_resolution() {
        let json = r#"{ "glyphs": {}, "resolution": 0, "boundingBox": { "yMin": 0, "yMax": 1 } }"#;
        assert!(matches!(
            Typeface::from_json(json),
            Err(GeometryError::InvalidResolution(_))
        ));
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    #[test]
    fn layout_advances_pen_and_scales() {
        let paths = typeface().layout("I I", 0.5).unwrap();
        assert_eq!(paths.len(), 2);
        // Second I starts after 40 + 50 font units at 0.5 / 100 scale.
        let PathCommand::MoveTo(start) = paths[1][0] else {
            panic!("expected move");
        };
        assert!(close(start, Vec2::new(0.45, 0.0)));
    }

    #[test]
    fn quad_and_cubic_read_endpoint_first() {
        let paths = typeface().layout("C", 1.0).unwrap();
        let PathCommand::QuadTo { ctrl, to } = paths[0][1] else {
            panic!("expected quad");
        };
        assert!(close(to, Vec2::new(0.5, -0.2)));
        assert!(close(ctrl, Vec2::new(1.0, 0.0)));

        let PathCommand::CubicTo { ctrl1, ctrl2, to } = paths[0][3] else {
            panic!("expected cubic");
        };
        assert!(close(to, Vec2::new(0.0, 1.0)));
        assert!(close(ctrl1, Vec2::new(0.6, 1.2)));
        assert!(close(ctrl2, Vec2::new(0.4, 1.2)));
    }

    #[test]
    fn missing_glyph_falls_back_to_question_mark() {
        let paths = typeface().layout("x", 1.0).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 4);
    }

    #[test]
    fn newline_moves_down_one_line() {
        let paths = typeface().layout("I\nI", 1.0).unwrap();
        let PathCommand::MoveTo(start) = paths[1][0] else {
            panic!("expected move");
        };
        assert!(close(start, Vec2::new(0.0, -1.3)));
    }

    #[test]
    fn malformed_outline_is_an_error() {
        let json = r#"{ "glyphs": { "A": { "ha": 10, "o": "m 0 0 l 5" } },
                        "resolution": 10, "boundingBox": { "yMin": 0, "yMax": 10 } }"#;
        let tf = Typeface::from_json(json).unwrap();
        assert!(matches!(
            tf.layout("A", 1.0),
            Err(GeometryError::MalformedOutline { .. })
        ));
    }

    #[test]
    fn counter_becomes_a_hole() {
        let shapes = typeface().shapes("O", 1.0, 5).unwrap();
        assert_eq!(shapes.len(), 1);
        let shape = &shapes[0];
        assert_eq!(shape.outer.len(), 4);
        assert_eq!(shape.holes.len(), 1);
        assert!(signed_area(&shape.outer) > 0.0);
        assert!(signed_area(&shape.holes[0]) < 0.0);
    }

    fn square(x: f32, y: f32, size: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(x, y),
            Vec2::new(x + size, y),
            Vec2::new(x + size, y + size),
            Vec2::new(x, y + size),
        ]
    }

    #[test]
    fn overlapping_solids_stay_solid() {
        // Second square starts inside the first; both wind the same way.
        let shapes = group_contours(vec![square(0.0, 0.0, 10.0), square(5.0, 5.0, 10.0)]);
        assert_eq!(shapes.len(), 2);
        assert!(shapes.iter().all(|s| s.holes.is_empty()));
        assert!(shapes.iter().all(|s| signed_area(&s.outer) > 0.0));
    }

    #[test]
    fn nested_ring_holes_join_innermost_solid() {
        // Ring inside a ring: outer, its counter, an island, the island's counter.
        let mut counter = square(10.0, 10.0, 80.0);
        counter.reverse();
        let mut island_counter = square(40.0, 40.0, 20.0);
        island_counter.reverse();
        let shapes = group_contours(vec![
            square(0.0, 0.0, 100.0),
            counter,
            square(30.0, 30.0, 40.0),
            island_counter,
        ]);
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].holes.len(), 1);
        assert_eq!(shapes[1].holes.len(), 1);
        assert_eq!(signed_area(&shapes[1].holes[0]), -400.0);
    }

    #[test]
    fn mixed_outer_windings_group_by_depth() {
        let mut right = square(20.0, 0.0, 10.0);
        right.reverse();
        let mut inner = square(2.0, 2.0, 4.0);
        inner.reverse();
        let shapes = group_contours(vec![square(0.0, 0.0, 10.0), right, inner]);
        assert_eq!(shapes.len(), 2);
        assert!(shapes.iter().all(|s| signed_area(&s.outer) > 0.0));
        assert_eq!(shapes[0].holes.len(), 1);
        assert!(shapes[1].holes.is_empty());
    }

    #[test]
    fn curves_are_flattened_with_segments() {
        let shapes = typeface().shapes("C", 1.0, 5).unwrap();
        // start + 5 quad points + line + 5 cubic points
        assert_eq!(shapes[0].outer.len(), 12);
    }
}
