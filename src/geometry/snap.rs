//! Snapping points and polygons onto a reference boundary

use crate::types::{closest_point_on_segment, Polygon2D, Vector2};

/// Snap `point` to `reference` when it lies within `tolerance` of it.
///
/// Vertices win over edges so that corners stay exact.
pub fn snap_point_to_polygon(point: Vector2, reference: &Polygon2D, tolerance: f64) -> Vector2 {
    if let Some(vertex) = reference
        .vertices
        .iter()
        .find(|v| v.is_equivalent(&point, tolerance))
    {
        return *vertex;
    }
    let mut best: Option<(f64, Vector2)> = None;
    for (a, b) in reference.segments() {
        let candidate = closest_point_on_segment(point, a, b);
        let dist = candidate.distance(&point);
        if dist <= tolerance && best.map_or(true, |(d, _)| dist < d) {
            best = Some((dist, candidate));
        }
    }
    best.map_or(point, |(_, p)| p)
}

/// Snap every vertex of `polygon` onto `reference`
pub fn snap_polygon_to_polygon(
    polygon: &Polygon2D,
    reference: &Polygon2D,
    tolerance: f64,
) -> Polygon2D {
    Polygon2D::new(
        polygon
            .vertices
            .iter()
            .map(|v| snap_point_to_polygon(*v, reference, tolerance))
            .collect(),
    )
}
