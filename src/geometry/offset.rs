//! Polygon offsetting

use crate::types::{Polygon2D, Vector2};

/// Offset every edge of `polygon` toward its interior by `distance`.
///
/// Corners are mitred; a negative distance offsets outward. Works for either
/// winding.
pub fn offset_polygon_inward(polygon: &Polygon2D, distance: f64) -> Polygon2D {
    let n = polygon.len();
    if n < 3 || distance == 0.0 {
        return polygon.clone();
    }
    let side = if polygon.is_clockwise() { -1.0 } else { 1.0 };
    let verts = &polygon.vertices;

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let prev = verts[(i + n - 1) % n];
        let curr = verts[i];
        let next = verts[(i + 1) % n];

        let d1 = (curr - prev).normalize();
        let d2 = (next - curr).normalize();
        let n1 = d1.perpendicular() * (side * distance);
        let n2 = d2.perpendicular() * (side * distance);

        let a1 = prev + n1;
        let a2 = curr + n2;
        let denom = d1.cross(&d2);
        let point = if denom.abs() < 1e-12 {
            curr + n1
        } else {
            let t = (a2 - a1).cross(&d2) / denom;
            a1 + d1 * t
        };
        out.push(point);
    }
    Polygon2D::new(out)
}

/// Shift a point perpendicular to edge `a`-`b` by `distance`, toward the
/// interior side of `polygon` when possible.
pub fn nudge_off_edge(
    point: Vector2,
    a: Vector2,
    b: Vector2,
    distance: f64,
    polygon: &Polygon2D,
) -> Vector2 {
    let normal = (b - a).normalize().perpendicular();
    let left = point + normal * distance;
    if polygon.is_point_inside(left) {
        return left;
    }
    let right = point - normal * distance;
    if polygon.is_point_inside(right) {
        right
    } else {
        left
    }
}
