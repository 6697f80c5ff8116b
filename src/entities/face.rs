//! Room faces

use super::{impl_common, Aperture, Door, ModelObject, ObjectCommon};
use crate::types::{BoundingBox3D, Face3D, Vector3};
use std::fmt;

/// Faces tilted less than this from +Z are roofs
const ROOF_MAX_ANGLE_DEG: f64 = 60.0;
/// Faces tilted more than this from +Z are floors
const FLOOR_MIN_ANGLE_DEG: f64 = 130.0;

/// Kind of room face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceType {
    Wall,
    Floor,
    RoofCeiling,
    /// Non-physical separation between volumes
    AirBoundary,
}

impl FaceType {
    /// Default type for a face with the given normal
    pub fn from_normal(normal: Vector3) -> Self {
        let angle = normal.angle(&Vector3::UNIT_Z).to_degrees();
        if angle < ROOF_MAX_ANGLE_DEG {
            FaceType::RoofCeiling
        } else if angle > FLOOR_MIN_ANGLE_DEG {
            FaceType::Floor
        } else {
            FaceType::Wall
        }
    }

    /// Floors and roofs are the horizontal classes
    pub fn is_horizontal(&self) -> bool {
        matches!(self, FaceType::Floor | FaceType::RoofCeiling)
    }
}

impl fmt::Display for FaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FaceType::Wall => "Wall",
            FaceType::Floor => "Floor",
            FaceType::RoofCeiling => "RoofCeiling",
            FaceType::AirBoundary => "AirBoundary",
        };
        write!(f, "{}", name)
    }
}

/// Exterior condition of a face
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BoundaryCondition {
    #[default]
    Outdoors,
    Ground,
    Adiabatic,
    /// Adjacent to the face with this identifier
    Surface(String),
}

impl BoundaryCondition {
    /// Ground for faces entirely at or below z = 0, otherwise outdoors
    pub fn from_geometry(geometry: &Face3D) -> Self {
        if geometry.max_z() <= 0.0 {
            BoundaryCondition::Ground
        } else {
            BoundaryCondition::Outdoors
        }
    }

    pub fn is_ground(&self) -> bool {
        matches!(self, BoundaryCondition::Ground)
    }
}

/// A planar face of a room, hosting apertures and doors
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub common: ObjectCommon,
    pub geometry: Face3D,
    pub face_type: FaceType,
    pub boundary_condition: BoundaryCondition,
    pub apertures: Vec<Aperture>,
    pub doors: Vec<Door>,
}

impl_common!(Face);

impl Face {
    /// Create a face with type and boundary condition derived from geometry
    pub fn new(identifier: impl Into<String>, geometry: Face3D) -> Self {
        let face_type = FaceType::from_normal(geometry.normal());
        let boundary_condition = BoundaryCondition::from_geometry(&geometry);
        Self {
            common: ObjectCommon::new(identifier),
            geometry,
            face_type,
            boundary_condition,
            apertures: Vec::new(),
            doors: Vec::new(),
        }
    }

    /// Create an air boundary face
    pub fn air_boundary(identifier: impl Into<String>, geometry: Face3D) -> Self {
        Self::new(identifier, geometry).with_type(FaceType::AirBoundary)
    }

    pub fn with_type(mut self, face_type: FaceType) -> Self {
        self.face_type = face_type;
        self
    }

    pub fn with_boundary_condition(mut self, bc: BoundaryCondition) -> Self {
        self.boundary_condition = bc;
        self
    }

    pub fn add_apertures(&mut self, apertures: impl IntoIterator<Item = Aperture>) {
        self.apertures.extend(apertures);
    }

    pub fn add_doors(&mut self, doors: impl IntoIterator<Item = Door>) {
        self.doors.extend(doors);
    }

    pub fn has_sub_faces(&self) -> bool {
        !self.apertures.is_empty() || !self.doors.is_empty()
    }

    pub fn is_air_boundary(&self) -> bool {
        self.face_type == FaceType::AirBoundary
    }
}

impl ModelObject for Face {
    fn common(&self) -> &ObjectCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ObjectCommon {
        &mut self.common
    }

    fn bounding_box(&self) -> Option<BoundingBox3D> {
        self.geometry.bounds()
    }

    fn scale(&mut self, factor: f64) {
        self.geometry = self.geometry.scale(factor);
        for aperture in &mut self.apertures {
            aperture.scale(factor);
        }
        for door in &mut self.doors {
            door.scale(factor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal(z: f64, up: bool) -> Face3D {
        let mut pts = vec![
            Vector3::new(0.0, 0.0, z),
            Vector3::new(1.0, 0.0, z),
            Vector3::new(1.0, 1.0, z),
            Vector3::new(0.0, 1.0, z),
        ];
        if !up {
            pts.reverse();
        }
        Face3D::new(pts)
    }

    #[test]
    fn test_face_type_from_normal() {
        assert_eq!(FaceType::from_normal(Vector3::UNIT_Z), FaceType::RoofCeiling);
        assert_eq!(FaceType::from_normal(-Vector3::UNIT_Z), FaceType::Floor);
        assert_eq!(FaceType::from_normal(Vector3::UNIT_X), FaceType::Wall);
    }

    #[test]
    fn test_boundary_condition_defaults() {
        let floor = Face::new("floor", horizontal(0.0, false));
        assert_eq!(floor.face_type, FaceType::Floor);
        assert!(floor.boundary_condition.is_ground());

        let roof = Face::new("roof", horizontal(3.0, true));
        assert_eq!(roof.face_type, FaceType::RoofCeiling);
        assert_eq!(roof.boundary_condition, BoundaryCondition::Outdoors);
    }

    #[test]
    fn test_display_name_falls_back_to_identifier() {
        let face = Face::new("f1", horizontal(0.0, true));
        assert_eq!(face.display_name(), "f1");
        let named = face.with_display_name("North");
        assert_eq!(named.display_name(), "North");
    }
}
