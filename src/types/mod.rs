//! Core geometric value types

pub mod bounds;
pub mod face3d;
pub mod plane;
pub mod polygon;
pub mod transform;
pub mod units;
pub mod vector;

pub use bounds::{BoundingBox2D, BoundingBox3D};
pub use face3d::{newell_normal, Face3D};
pub use plane::Plane;
pub use polygon::{closest_point_on_segment, Polygon2D};
pub use transform::{scale_point, AxisRotation};
pub use units::Units;
pub use vector::{Vector2, Vector3};
