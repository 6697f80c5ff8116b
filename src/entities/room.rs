//! Rooms (closed volumes of faces)

use super::{impl_common, Face, ModelObject, ObjectCommon, Shade};
use crate::types::BoundingBox3D;

/// A room made of faces, with optional room-level shades
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub common: ObjectCommon,
    pub faces: Vec<Face>,
    /// Shades attached directly to the room
    pub shades: Vec<Shade>,
    /// Unconditioned rooms map to the GEM unconditioned space type
    pub is_conditioned: bool,
}

impl_common!(Room);

impl Room {
    pub fn new(identifier: impl Into<String>, faces: Vec<Face>) -> Self {
        Self {
            common: ObjectCommon::new(identifier),
            faces,
            shades: Vec::new(),
            is_conditioned: true,
        }
    }

    pub fn with_conditioning(mut self, is_conditioned: bool) -> Self {
        self.is_conditioned = is_conditioned;
        self
    }

    pub fn add_shades(&mut self, shades: impl IntoIterator<Item = Shade>) {
        self.shades.extend(shades);
    }

    /// Room shades followed by aperture shades and door shades, face by face
    pub fn all_shades(&self) -> Vec<&Shade> {
        let mut shades: Vec<&Shade> = self.shades.iter().collect();
        for face in &self.faces {
            for aperture in &face.apertures {
                shades.extend(aperture.shades.iter());
            }
            for door in &face.doors {
                shades.extend(door.shades.iter());
            }
        }
        shades
    }

    pub fn aperture_count(&self) -> usize {
        self.faces.iter().map(|f| f.apertures.len()).sum()
    }

    pub fn door_count(&self) -> usize {
        self.faces.iter().map(|f| f.doors.len()).sum()
    }
}

impl ModelObject for Room {
    fn common(&self) -> &ObjectCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ObjectCommon {
        &mut self.common
    }

    fn bounding_box(&self) -> Option<BoundingBox3D> {
        let mut boxes = self.faces.iter().filter_map(|f| f.bounding_box());
        let mut bbox = boxes.next()?;
        for other in boxes {
            bbox.expand_to_include(other.min);
            bbox.expand_to_include(other.max);
        }
        Some(bbox)
    }

    fn scale(&mut self, factor: f64) {
        for face in &mut self.faces {
            face.scale(factor);
        }
        for shade in &mut self.shades {
            shade.scale(factor);
        }
    }
}
