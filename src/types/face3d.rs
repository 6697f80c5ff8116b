//! Planar faces with optional holes

use super::{BoundingBox2D, BoundingBox3D, Plane, Polygon2D, Vector2, Vector3};

/// A planar polygon in 3D space with zero or more holes.
///
/// The plane is derived once from the boundary (Newell normal, origin at the
/// first vertex) and reused for every 2D projection, so that openings read
/// and written against the same face share one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Face3D {
    boundary: Vec<Vector3>,
    holes: Vec<Vec<Vector3>>,
    plane: Plane,
}

/// Newell's method normal of a vertex loop; `None` for degenerate loops
pub fn newell_normal(points: &[Vector3]) -> Option<Vector3> {
    if points.len() < 3 {
        return None;
    }
    let mut normal = Vector3::ZERO;
    for (i, current) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    if normal.length() < 1e-12 {
        None
    } else {
        Some(normal.normalize())
    }
}

impl Face3D {
    /// Create a face from a boundary loop
    pub fn new(boundary: Vec<Vector3>) -> Self {
        Self::with_holes(boundary, Vec::new())
    }

    /// Create a face from a boundary loop and hole loops
    pub fn with_holes(boundary: Vec<Vector3>, holes: Vec<Vec<Vector3>>) -> Self {
        let normal = newell_normal(&boundary).unwrap_or(Vector3::UNIT_Z);
        let origin = boundary.first().copied().unwrap_or(Vector3::ZERO);
        let plane = Plane::new(normal, origin);
        Self {
            boundary,
            holes,
            plane,
        }
    }

    /// Create a face that reuses an existing plane (e.g. a hole of a parent face)
    pub fn with_plane(boundary: Vec<Vector3>, holes: Vec<Vec<Vector3>>, plane: Plane) -> Self {
        Self {
            boundary,
            holes,
            plane,
        }
    }

    /// Lift 2D polygons in `plane` coordinates back into a face
    pub fn from_polygons2d(plane: &Plane, boundary: &Polygon2D, holes: &[Polygon2D]) -> Self {
        let lift = |poly: &Polygon2D| -> Vec<Vector3> {
            poly.vertices.iter().map(|v| plane.xy_to_xyz(*v)).collect()
        };
        let boundary_3d = lift(boundary);
        let holes_3d = holes.iter().map(lift).collect();
        Self::with_plane(boundary_3d, holes_3d, *plane)
    }

    pub fn boundary(&self) -> &[Vector3] {
        &self.boundary
    }

    pub fn holes(&self) -> &[Vec<Vector3>] {
        &self.holes
    }

    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn normal(&self) -> Vector3 {
        self.plane.normal
    }

    /// Boundary followed by every hole loop
    pub fn vertices(&self) -> Vec<Vector3> {
        let mut all = self.boundary.clone();
        for hole in &self.holes {
            all.extend_from_slice(hole);
        }
        all
    }

    pub fn boundary_polygon2d(&self) -> Polygon2D {
        self.project_loop(&self.boundary)
    }

    pub fn hole_polygons2d(&self) -> Vec<Polygon2D> {
        self.holes.iter().map(|h| self.project_loop(h)).collect()
    }

    /// Project any loop of 3D points into this face's plane frame
    pub fn project_loop(&self, points: &[Vector3]) -> Polygon2D {
        Polygon2D::new(points.iter().map(|p| self.plane.xyz_to_xy(*p)).collect())
    }

    /// Net area (boundary minus holes)
    pub fn area(&self) -> f64 {
        let holes: f64 = self.hole_polygons2d().iter().map(Polygon2D::area).sum();
        (self.boundary_polygon2d().area() - holes).max(0.0)
    }

    /// Area enclosed by the outer boundary alone
    pub fn boundary_area(&self) -> f64 {
        self.boundary_polygon2d().area()
    }

    /// Area centroid of the boundary
    pub fn centroid(&self) -> Vector3 {
        self.plane.xy_to_xyz(self.boundary_polygon2d().centroid())
    }

    fn bounds2d(&self) -> Option<BoundingBox2D> {
        self.boundary_polygon2d().bounds()
    }

    fn closest_boundary_vertex(&self, target: Vector2) -> Vector3 {
        let poly = self.boundary_polygon2d();
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, v) in poly.vertices.iter().enumerate() {
            let d = v.distance(&target);
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }
        self.boundary.get(best).copied().unwrap_or(self.plane.origin)
    }

    /// Boundary vertex nearest the lower-left corner of the plane-frame bounding box
    pub fn lower_left_corner(&self) -> Vector3 {
        match self.bounds2d() {
            Some(bbox) => self.closest_boundary_vertex(bbox.lower_left()),
            None => self.plane.origin,
        }
    }

    /// Boundary vertex nearest the upper-right corner of the plane-frame bounding box
    pub fn upper_right_corner(&self) -> Vector3 {
        match self.bounds2d() {
            Some(bbox) => self.closest_boundary_vertex(bbox.upper_right()),
            None => self.plane.origin,
        }
    }

    /// Reverse the vertex order and the normal
    pub fn flip(&self) -> Self {
        let boundary: Vec<Vector3> = self.boundary.iter().rev().copied().collect();
        let holes = self
            .holes
            .iter()
            .map(|h| h.iter().rev().copied().collect())
            .collect();
        Self::with_holes(boundary, holes)
    }

    /// Uniform scale about the world origin
    pub fn scale(&self, factor: f64) -> Self {
        let boundary = self.boundary.iter().map(|p| *p * factor).collect();
        let holes = self
            .holes
            .iter()
            .map(|h| h.iter().map(|p| *p * factor).collect())
            .collect();
        Self::with_holes(boundary, holes)
    }

    /// Translate every vertex
    pub fn translate(&self, vector: Vector3) -> Self {
        let boundary = self.boundary.iter().map(|p| *p + vector).collect();
        let holes = self
            .holes
            .iter()
            .map(|h| h.iter().map(|p| *p + vector).collect())
            .collect();
        Self::with_plane(boundary, holes, self.plane.translate(vector))
    }

    /// Boundary without its holes
    pub fn without_holes(&self) -> Self {
        Self::with_plane(self.boundary.clone(), Vec::new(), self.plane)
    }

    /// Number of boundary vertices that are distinct within `tolerance`
    pub fn unique_vertex_count(&self, tolerance: f64) -> usize {
        let mut unique: Vec<Vector3> = Vec::with_capacity(self.boundary.len());
        for v in &self.boundary {
            if !unique.iter().any(|u| u.is_equivalent(v, tolerance)) {
                unique.push(*v);
            }
        }
        unique.len()
    }

    /// Every vertex lies within `tolerance` of the plane
    pub fn is_planar(&self, tolerance: f64) -> bool {
        self.vertices()
            .iter()
            .all(|v| self.plane.distance_to_point(*v).abs() <= tolerance)
    }

    pub fn bounds(&self) -> Option<BoundingBox3D> {
        BoundingBox3D::from_points(&self.boundary)
    }

    pub fn min_z(&self) -> f64 {
        self.boundary.iter().map(|v| v.z).fold(f64::INFINITY, f64::min)
    }

    pub fn max_z(&self) -> f64 {
        self.boundary
            .iter()
            .map(|v| v.z)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wall() -> Face3D {
        Face3D::new(vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(11.0, 0.0, 0.0),
            Vector3::new(11.0, 0.0, 3.0),
            Vector3::new(0.0, 0.0, 3.0),
        ])
    }

    #[test]
    fn test_newell_normal() {
        let face = wall();
        assert_relative_eq!(face.normal().y, -1.0, epsilon = 1e-12);
        assert!(newell_normal(&[Vector3::ZERO, Vector3::UNIT_X]).is_none());
    }

    #[test]
    fn test_area_with_hole() {
        let face = Face3D::with_holes(
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(10.0, 0.0, 0.0),
                Vector3::new(10.0, 10.0, 0.0),
                Vector3::new(0.0, 10.0, 0.0),
            ],
            vec![vec![
                Vector3::new(2.0, 2.0, 0.0),
                Vector3::new(2.0, 4.0, 0.0),
                Vector3::new(4.0, 4.0, 0.0),
                Vector3::new(4.0, 2.0, 0.0),
            ]],
        );
        assert_relative_eq!(face.area(), 96.0, epsilon = 1e-9);
        assert_relative_eq!(face.boundary_area(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_corners() {
        let face = wall();
        assert_eq!(face.lower_left_corner(), Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(face.upper_right_corner(), Vector3::new(11.0, 0.0, 3.0));
    }

    #[test]
    fn test_unique_vertices_and_planarity() {
        let face = Face3D::new(vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
        ]);
        assert_eq!(face.unique_vertex_count(1e-6), 2);
        assert!(wall().is_planar(1e-9));
    }

    #[test]
    fn test_flip_reverses_normal() {
        let flipped = wall().flip();
        assert_relative_eq!(flipped.normal().y, 1.0, epsilon = 1e-12);
    }
}
