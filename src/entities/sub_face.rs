//! Apertures and doors hosted by room faces

use super::{impl_common, ModelObject, ObjectCommon, Shade};
use crate::types::{BoundingBox3D, Face3D};

/// A glazed opening in a face
#[derive(Debug, Clone, PartialEq)]
pub struct Aperture {
    pub common: ObjectCommon,
    pub geometry: Face3D,
    /// Shades attached to the aperture (louvers, fins)
    pub shades: Vec<Shade>,
}

impl_common!(Aperture);

impl Aperture {
    pub fn new(identifier: impl Into<String>, geometry: Face3D) -> Self {
        Self {
            common: ObjectCommon::new(identifier),
            geometry,
            shades: Vec::new(),
        }
    }
}

/// An opaque (or glass) door in a face
#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    pub common: ObjectCommon,
    pub geometry: Face3D,
    pub shades: Vec<Shade>,
}

impl_common!(Door);

impl Door {
    pub fn new(identifier: impl Into<String>, geometry: Face3D) -> Self {
        Self {
            common: ObjectCommon::new(identifier),
            geometry,
            shades: Vec::new(),
        }
    }
}

impl ModelObject for Aperture {
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
        for shade in &mut self.shades {
            shade.scale(factor);
        }
    }
}

impl ModelObject for Door {
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
        for shade in &mut self.shades {
            shade.scale(factor);
        }
    }
}
