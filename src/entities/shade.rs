//! Shades

use super::{impl_common, ModelObject, ObjectCommon};
use crate::types::{BoundingBox3D, Face3D};

/// A single shading surface.
///
/// Detached shades are context geometry (neighbouring buildings, terrain);
/// attached shades belong to the building being modelled.
#[derive(Debug, Clone, PartialEq)]
pub struct Shade {
    pub common: ObjectCommon,
    pub geometry: Face3D,
    pub is_detached: bool,
}

impl_common!(Shade);

impl Shade {
    pub fn new(identifier: impl Into<String>, geometry: Face3D) -> Self {
        Self {
            common: ObjectCommon::new(identifier),
            geometry,
            is_detached: false,
        }
    }

    pub fn detached(mut self, is_detached: bool) -> Self {
        self.is_detached = is_detached;
        self
    }
}

impl ModelObject for Shade {
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
    }
}
