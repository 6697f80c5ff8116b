//! Building model objects produced and consumed by the GEM codec

pub mod face;
pub mod metadata;
pub mod room;
pub mod shade;
pub mod shade_mesh;
pub mod sub_face;

pub use face::{BoundaryCondition, Face, FaceType};
pub use metadata::{GemMetadata, SpecialShadeKind};
pub use room::Room;
pub use shade::Shade;
pub use shade_mesh::ShadeMesh;
pub use sub_face::{Aperture, Door};

use crate::types::BoundingBox3D;

/// Base trait for every identified model object
pub trait ModelObject {
    /// Shared identity and metadata
    fn common(&self) -> &ObjectCommon;

    /// Mutable access to the shared identity and metadata
    fn common_mut(&mut self) -> &mut ObjectCommon;

    /// Bounding box of the object's geometry
    fn bounding_box(&self) -> Option<BoundingBox3D>;

    /// Uniformly scale the geometry about the world origin
    fn scale(&mut self, factor: f64);

    /// Unique identifier
    fn identifier(&self) -> &str {
        &self.common().identifier
    }

    fn set_identifier(&mut self, identifier: String) {
        self.common_mut().identifier = identifier;
    }

    /// Display name, falling back to the identifier
    fn display_name(&self) -> &str {
        let common = self.common();
        common
            .display_name
            .as_deref()
            .unwrap_or(common.identifier.as_str())
    }

    fn set_display_name(&mut self, name: String) {
        self.common_mut().display_name = Some(name);
    }

    fn metadata(&self) -> &GemMetadata {
        &self.common().metadata
    }

    fn metadata_mut(&mut self) -> &mut GemMetadata {
        &mut self.common_mut().metadata
    }
}

/// Identity data shared by all model objects
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectCommon {
    /// Unique identifier
    pub identifier: String,
    /// Optional human readable name
    pub display_name: Option<String>,
    /// Round-trip markers
    pub metadata: GemMetadata,
}

impl ObjectCommon {
    pub fn new(identifier: impl Into<String>) -> Self {
        ObjectCommon {
            identifier: identifier.into(),
            display_name: None,
            metadata: GemMetadata::default(),
        }
    }
}

/// Implements the boilerplate parts of [`ModelObject`] for a struct with a
/// `common` field.
macro_rules! impl_common {
    ($ty:ty) => {
        impl $ty {
            /// Set the display name
            pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
                self.common.display_name = Some(name.into());
                self
            }

            /// Replace the metadata markers
            pub fn with_metadata(mut self, metadata: $crate::entities::GemMetadata) -> Self {
                self.common.metadata = metadata;
                self
            }
        }
    };
}

pub(crate) use impl_common;
