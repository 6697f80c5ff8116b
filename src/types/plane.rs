//! Planes with a local 2D frame

use super::{Vector2, Vector3};

/// Horizontal components below this length make a normal count as vertical
const VERTICAL_NORMAL_EPSILON: f64 = 1e-9;

/// An oriented plane with an orthonormal in-plane frame.
///
/// For non-horizontal planes the X axis is horizontal (`Z × normal`) and the
/// Y axis points upward along the plane; horizontal planes use the world X
/// axis. The frame is always right handed: `x × y = normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: Vector3,
    pub normal: Vector3,
    pub x_axis: Vector3,
    pub y_axis: Vector3,
}

impl Plane {
    /// Create a plane from a normal and an origin
    pub fn new(normal: Vector3, origin: Vector3) -> Self {
        let normal = normal.normalize();
        let horizontal = Vector3::new(normal.x, normal.y, 0.0);
        let x_axis = if horizontal.length() < VERTICAL_NORMAL_EPSILON {
            Vector3::UNIT_X
        } else {
            Vector3::UNIT_Z.cross(&normal).normalize()
        };
        Self::with_x_axis(normal, origin, x_axis)
    }

    /// Create a plane with an explicit X axis (projected into the plane)
    pub fn with_x_axis(normal: Vector3, origin: Vector3, x_axis: Vector3) -> Self {
        let normal = normal.normalize();
        let x_axis = (x_axis - normal * x_axis.dot(&normal)).normalize();
        let y_axis = normal.cross(&x_axis).normalize();
        Self {
            origin,
            normal,
            x_axis,
            y_axis,
        }
    }

    /// World XY plane through `origin`
    pub fn world_xy(origin: Vector3) -> Self {
        Self::with_x_axis(Vector3::UNIT_Z, origin, Vector3::UNIT_X)
    }

    /// True when the normal points straight up or down
    pub fn is_horizontal(&self) -> bool {
        Vector3::new(self.normal.x, self.normal.y, 0.0).length() < VERTICAL_NORMAL_EPSILON
    }

    /// Project a 3D point into plane coordinates
    pub fn xyz_to_xy(&self, point: Vector3) -> Vector2 {
        let d = point - self.origin;
        Vector2::new(d.dot(&self.x_axis), d.dot(&self.y_axis))
    }

    /// Lift plane coordinates back to a 3D point
    pub fn xy_to_xyz(&self, point: Vector2) -> Vector3 {
        self.origin + self.x_axis * point.x + self.y_axis * point.y
    }

    /// Signed distance of a point from the plane
    pub fn distance_to_point(&self, point: Vector3) -> f64 {
        (point - self.origin).dot(&self.normal)
    }

    /// Same plane with the normal reversed
    pub fn flip(&self) -> Self {
        Self::with_x_axis(-self.normal, self.origin, self.x_axis)
    }

    /// Same plane moved along `vector`
    pub fn translate(&self, vector: Vector3) -> Self {
        Self {
            origin: self.origin + vector,
            ..*self
        }
    }
}
