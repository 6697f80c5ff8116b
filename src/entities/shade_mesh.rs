//! Indexed shade meshes

use super::{impl_common, ModelObject, ObjectCommon};
use crate::types::{BoundingBox3D, Face3D, Vector3};

/// A shading object stored as shared vertices and 0-based face index lists
#[derive(Debug, Clone, PartialEq)]
pub struct ShadeMesh {
    pub common: ObjectCommon,
    pub vertices: Vec<Vector3>,
    pub faces: Vec<Vec<usize>>,
    pub is_detached: bool,
}

impl_common!(ShadeMesh);

impl ShadeMesh {
    pub fn new(identifier: impl Into<String>, vertices: Vec<Vector3>, faces: Vec<Vec<usize>>) -> Self {
        Self {
            common: ObjectCommon::new(identifier),
            vertices,
            faces,
            is_detached: true,
        }
    }

    pub fn detached(mut self, is_detached: bool) -> Self {
        self.is_detached = is_detached;
        self
    }

    /// Each face as standalone geometry; out-of-range indices are skipped
    pub fn face_geometries(&self) -> Vec<Face3D> {
        self.faces
            .iter()
            .map(|f| {
                Face3D::new(
                    f.iter()
                        .filter_map(|&i| self.vertices.get(i).copied())
                        .collect(),
                )
            })
            .collect()
    }
}

impl ModelObject for ShadeMesh {
    fn common(&self) -> &ObjectCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ObjectCommon {
        &mut self.common
    }

    fn bounding_box(&self) -> Option<BoundingBox3D> {
        BoundingBox3D::from_points(&self.vertices)
    }

    fn scale(&mut self, factor: f64) {
        for v in &mut self.vertices {
            *v = *v * factor;
        }
    }
}
