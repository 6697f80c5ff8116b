//! Rigid transformations used to place parametric objects (PV panels, trees).
//!
//! Rotations are delegated to `nalgebra`; the crate's own [`Vector3`] stays the
//! public currency type.

use crate::types::Vector3;
use nalgebra::{Rotation3, Unit};

impl From<Vector3> for nalgebra::Vector3<f64> {
    fn from(v: Vector3) -> Self {
        nalgebra::Vector3::new(v.x, v.y, v.z)
    }
}

impl From<nalgebra::Vector3<f64>> for Vector3 {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

/// Rotation about an axis passing through `origin`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRotation {
    rotation: Rotation3<f64>,
    origin: Vector3,
}

impl AxisRotation {
    /// Right-handed rotation of `angle` radians about `axis` through `origin`.
    ///
    /// A zero-length axis yields the identity rotation.
    pub fn new(axis: Vector3, angle: f64, origin: Vector3) -> Self {
        let rotation = if axis.length_squared() > 0.0 {
            Rotation3::from_axis_angle(&Unit::new_normalize(axis.into()), angle)
        } else {
            Rotation3::identity()
        };
        Self { rotation, origin }
    }

    /// Rotation about the world Z axis
    pub fn about_z(angle: f64, origin: Vector3) -> Self {
        Self::new(Vector3::UNIT_Z, angle, origin)
    }

    /// Rotation about the world X axis
    pub fn about_x(angle: f64, origin: Vector3) -> Self {
        Self::new(Vector3::UNIT_X, angle, origin)
    }

    /// Apply the rotation to a point
    pub fn apply(&self, point: Vector3) -> Vector3 {
        let local: nalgebra::Vector3<f64> = (point - self.origin).into();
        Vector3::from(self.rotation * local) + self.origin
    }

    /// Apply the rotation to a direction (origin ignored)
    pub fn apply_vector(&self, vector: Vector3) -> Vector3 {
        let v: nalgebra::Vector3<f64> = vector.into();
        Vector3::from(self.rotation * v)
    }

    /// Apply the rotation to every point of a loop
    pub fn apply_all(&self, points: &[Vector3]) -> Vec<Vector3> {
        points.iter().map(|p| self.apply(*p)).collect()
    }
}

/// Uniform scale about the world origin
pub fn scale_point(point: Vector3, factor: f64) -> Vector3 {
    point * factor
}
