//! Planar 2D polygons

use super::{BoundingBox2D, Vector2};

/// A closed loop of 2D vertices (the closing edge is implicit)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon2D {
    pub vertices: Vec<Vector2>,
}

/// Closest point to `point` on segment `a`-`b`
pub fn closest_point_on_segment(point: Vector2, a: Vector2, b: Vector2) -> Vector2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return a;
    }
    let t = ((point - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

impl Polygon2D {
    pub fn new(vertices: Vec<Vector2>) -> Self {
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate the edges, including the closing edge
    pub fn segments(&self) -> impl Iterator<Item = (Vector2, Vector2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Shoelace area, positive for counter-clockwise loops
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for (a, b) in self.segments() {
            area += a.x * b.y - b.x * a.y;
        }
        area * 0.5
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.vertices.iter().rev().copied().collect())
    }

    /// Copy with counter-clockwise winding
    pub fn to_ccw(&self) -> Self {
        if self.is_clockwise() {
            self.reversed()
        } else {
            self.clone()
        }
    }

    /// Area centroid; falls back to the vertex average for degenerate loops
    pub fn centroid(&self) -> Vector2 {
        let area = self.signed_area();
        if area.abs() < 1e-12 {
            return self.vertex_average();
        }
        let mut cx = 0.0;
        let mut cy = 0.0;
        for (a, b) in self.segments() {
            let f = a.x * b.y - b.x * a.y;
            cx += (a.x + b.x) * f;
            cy += (a.y + b.y) * f;
        }
        Vector2::new(cx / (6.0 * area), cy / (6.0 * area))
    }

    pub fn vertex_average(&self) -> Vector2 {
        if self.vertices.is_empty() {
            return Vector2::ZERO;
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector2::ZERO, |acc, v| acc + *v);
        sum / self.vertices.len() as f64
    }

    pub fn bounds(&self) -> Option<BoundingBox2D> {
        BoundingBox2D::from_points(&self.vertices)
    }

    /// Even-odd ray casting test; points on the boundary are unreliable
    pub fn is_point_inside(&self, point: Vector2) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let pi = self.vertices[i];
            let pj = self.vertices[j];
            if ((pi.y > point.y) != (pj.y > point.y))
                && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Inside and at least `tolerance` away from every edge
    pub fn is_point_strictly_inside(&self, point: Vector2, tolerance: f64) -> bool {
        self.is_point_inside(point) && self.distance_to_boundary(point) > tolerance
    }

    pub fn distance_to_boundary(&self, point: Vector2) -> f64 {
        self.segments()
            .map(|(a, b)| closest_point_on_segment(point, a, b).distance(&point))
            .fold(f64::INFINITY, f64::min)
    }

    /// Closest point on any edge
    pub fn closest_point_on_boundary(&self, point: Vector2) -> Option<Vector2> {
        self.segments()
            .map(|(a, b)| closest_point_on_segment(point, a, b))
            .min_by(|p, q| {
                p.distance(&point)
                    .partial_cmp(&q.distance(&point))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Indices of edges lying within `tolerance` of `point`
    pub fn edges_near_point(&self, point: Vector2, tolerance: f64) -> Vec<usize> {
        self.segments()
            .enumerate()
            .filter(|(_, (a, b))| closest_point_on_segment(point, *a, *b).distance(&point) <= tolerance)
            .map(|(i, _)| i)
            .collect()
    }

    /// Drop consecutive duplicate vertices (including the wrap-around)
    pub fn remove_duplicate_vertices(&self, tolerance: f64) -> Self {
        let mut out: Vec<Vector2> = Vec::with_capacity(self.vertices.len());
        for v in &self.vertices {
            if out.last().map_or(true, |last| !last.is_equivalent(v, tolerance)) {
                out.push(*v);
            }
        }
        while out.len() > 1 && out[0].is_equivalent(&out[out.len() - 1], tolerance) {
            out.pop();
        }
        Self::new(out)
    }

    /// Does this polygon contain every vertex of `other`
    pub fn contains_polygon(&self, other: &Polygon2D) -> bool {
        other.vertices.iter().all(|p| self.is_point_inside(*p))
    }
}
