//! Coplanar polygon boolean operations backed by `i_overlay`
//!
//! Everything here works on [`Polygon2D`] loops already projected into one
//! face's plane frame. Results come back with counter-clockwise outer loops
//! and clockwise holes, so lifting them through the same plane keeps the
//! parent face's normal.

use crate::error::{GemError, Result};
use crate::types::{Polygon2D, Vector2};
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

/// Polygons below this area are treated as slivers and discarded
const MIN_FRAGMENT_AREA: f64 = 1e-10;

/// One piece of a boolean result: an outer loop and its holes
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonWithHoles {
    pub boundary: Polygon2D,
    pub holes: Vec<Polygon2D>,
}

impl PolygonWithHoles {
    pub fn new(boundary: Polygon2D, holes: Vec<Polygon2D>) -> Self {
        Self { boundary, holes }
    }

    /// Boundary area minus hole areas
    pub fn area(&self) -> f64 {
        self.boundary.area() - self.holes.iter().map(Polygon2D::area).sum::<f64>()
    }
}

fn to_path(polygon: &Polygon2D) -> Vec<[f64; 2]> {
    polygon.vertices.iter().map(|p| [p.x, p.y]).collect()
}

fn to_ccw_path(polygon: &Polygon2D) -> Vec<[f64; 2]> {
    to_path(&polygon.to_ccw())
}

fn to_cw_path(polygon: &Polygon2D) -> Vec<[f64; 2]> {
    to_path(&polygon.to_ccw().reversed())
}

fn from_path(path: &[[f64; 2]]) -> Polygon2D {
    Polygon2D::new(path.iter().map(|p| Vector2::new(p[0], p[1])).collect())
}

fn subject_paths(boundary: &Polygon2D, holes: &[Polygon2D]) -> Vec<Vec<[f64; 2]>> {
    let mut paths = Vec::with_capacity(1 + holes.len());
    paths.push(to_ccw_path(boundary));
    paths.extend(holes.iter().filter(|h| h.len() >= 3).map(to_cw_path));
    paths
}

/// Convert overlay shapes back, dropping slivers and normalising winding
fn collect_shapes(shapes: Vec<Vec<Vec<[f64; 2]>>>) -> Vec<PolygonWithHoles> {
    let mut out = Vec::with_capacity(shapes.len());
    for shape in shapes {
        let mut contours = shape.iter().map(|c| from_path(c));
        let boundary = match contours.next() {
            Some(b) if b.area() > MIN_FRAGMENT_AREA => b.to_ccw(),
            _ => continue,
        };
        let holes = contours
            .filter(|h| h.area() > MIN_FRAGMENT_AREA)
            .map(|h| h.to_ccw().reversed())
            .collect();
        out.push(PolygonWithHoles::new(boundary, holes));
    }
    out
}

/// Subtract `holes` from `boundary`.
///
/// Holes lying fully inside come back as holes of the result; holes that cut
/// the boundary reshape it and may split it into several disjoint pieces.
pub fn polygon_difference(boundary: &Polygon2D, holes: &[Polygon2D]) -> Vec<PolygonWithHoles> {
    if boundary.len() < 3 {
        return Vec::new();
    }
    let subject = vec![to_ccw_path(boundary)];
    let clip: Vec<Vec<[f64; 2]>> = holes
        .iter()
        .filter(|h| h.len() >= 3)
        .map(to_ccw_path)
        .collect();
    if clip.is_empty() {
        return vec![PolygonWithHoles::new(boundary.to_ccw(), Vec::new())];
    }
    let result = subject.overlay(&clip, OverlayRule::Difference, FillRule::EvenOdd);
    collect_shapes(result)
}

/// Intersect a polygon-with-holes with a clip loop
pub fn polygon_intersection(
    boundary: &Polygon2D,
    holes: &[Polygon2D],
    clip: &Polygon2D,
) -> Vec<PolygonWithHoles> {
    let subject = subject_paths(boundary, holes);
    let clip = vec![to_ccw_path(clip)];
    let result = subject.overlay(&clip, OverlayRule::Intersect, FillRule::EvenOdd);
    collect_shapes(result)
}

/// Split a holed polygon into hole-free pieces.
///
/// The polygon is cut into vertical strips at the x coordinate of each hole
/// centroid. Fails when a hole reaches outside the boundary, a strip still
/// carries a hole or a piece collapses below three vertices; callers fall
/// back to the unsplit polygon.
pub fn split_through_holes(
    boundary: &Polygon2D,
    holes: &[Polygon2D],
    tolerance: f64,
) -> Result<Vec<Polygon2D>> {
    if holes.is_empty() {
        return Ok(vec![boundary.clone()]);
    }
    let bbox = boundary
        .bounds()
        .ok_or_else(|| GemError::Geometry("cannot split an empty polygon".to_string()))?;
    for (i, hole) in holes.iter().enumerate() {
        let outside = hole.vertices.iter().any(|p| {
            !boundary.is_point_inside(*p) && boundary.distance_to_boundary(*p) > tolerance
        });
        if outside {
            return Err(GemError::Geometry(format!(
                "hole {} extends past the polygon boundary",
                i
            )));
        }
    }

    let mut cuts: Vec<f64> = holes.iter().map(|h| h.centroid().x).collect();
    cuts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    cuts.dedup_by(|a, b| (*a - *b).abs() <= tolerance);

    let margin = bbox.width().max(bbox.height()) + 1.0;
    let mut edges = Vec::with_capacity(cuts.len() + 2);
    edges.push(bbox.min.x - margin);
    edges.extend(cuts);
    edges.push(bbox.max.x + margin);

    let (y_min, y_max) = (bbox.min.y - margin, bbox.max.y + margin);
    let mut pieces = Vec::new();
    for window in edges.windows(2) {
        let strip = Polygon2D::new(vec![
            Vector2::new(window[0], y_min),
            Vector2::new(window[1], y_min),
            Vector2::new(window[1], y_max),
            Vector2::new(window[0], y_max),
        ]);
        for shape in polygon_intersection(boundary, holes, &strip) {
            if !shape.holes.is_empty() {
                return Err(GemError::Geometry(
                    "split fragment still contains a hole".to_string(),
                ));
            }
            let cleaned = shape.boundary.remove_duplicate_vertices(tolerance);
            if cleaned.len() < 3 {
                return Err(GemError::Geometry(format!(
                    "split fragment degenerated to {} vertices",
                    cleaned.len()
                )));
            }
            pieces.push(cleaned);
        }
    }
    Ok(pieces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon2D {
        Polygon2D::new(vec![
            Vector2::new(x0, y0),
            Vector2::new(x1, y0),
            Vector2::new(x1, y1),
            Vector2::new(x0, y1),
        ])
    }

    #[test]
    fn test_difference_inner_hole() {
        let result = polygon_difference(&rect(0.0, 0.0, 10.0, 10.0), &[rect(2.0, 2.0, 4.0, 4.0)]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].holes.len(), 1);
        assert_relative_eq!(result[0].area(), 96.0, epsilon = 1e-6);
        assert!(!result[0].boundary.is_clockwise());
        assert!(result[0].holes[0].is_clockwise());
    }

    #[test]
    fn test_difference_splits_in_two() {
        let result = polygon_difference(&rect(0.0, 0.0, 10.0, 10.0), &[rect(4.0, -1.0, 6.0, 11.0)]);
        assert_eq!(result.len(), 2);
        let total: f64 = result.iter().map(PolygonWithHoles::area).sum();
        assert_relative_eq!(total, 80.0, epsilon = 1e-6);
    }

    #[test]
    fn test_split_through_hole_removes_holes() {
        let pieces =
            split_through_holes(&rect(0.0, 0.0, 10.0, 10.0), &[rect(4.0, 4.0, 6.0, 6.0)], 1e-6)
                .unwrap();
        assert_eq!(pieces.len(), 2);
        let total: f64 = pieces.iter().map(Polygon2D::area).sum();
        assert_relative_eq!(total, 96.0, epsilon = 1e-6);
    }

    #[test]
    fn test_split_rejects_hole_outside_boundary() {
        let result =
            split_through_holes(&rect(0.0, 0.0, 10.0, 10.0), &[rect(8.0, 4.0, 12.0, 6.0)], 1e-6);
        assert!(matches!(result, Err(GemError::Geometry(_))));

        // touching the boundary is fine
        let pieces =
            split_through_holes(&rect(0.0, 0.0, 10.0, 10.0), &[rect(8.0, 4.0, 10.0, 6.0)], 1e-6);
        assert!(pieces.is_ok());
    }

    #[test]
    fn test_split_without_holes_is_identity() {
        let pieces = split_through_holes(&rect(0.0, 0.0, 1.0, 1.0), &[], 1e-6).unwrap();
        assert_eq!(pieces.len(), 1);
    }
}
