//! Geometry operations combined by the GEM codec
//!
//! - [`boolean`]: coplanar difference, intersection and split-through-holes
//! - [`offset`]: inward polygon offset and edge nudging
//! - [`snap`]: snapping onto a reference boundary
//! - [`polyface`]: vertex sharing, closed volumes and extrusion

pub mod boolean;
pub mod offset;
pub mod polyface;
pub mod snap;

pub use boolean::{polygon_difference, polygon_intersection, split_through_holes, PolygonWithHoles};
pub use offset::{nudge_off_edge, offset_polygon_inward};
pub use polyface::{extrude_face, Polyface, VertexIndex};
pub use snap::{snap_point_to_polygon, snap_polygon_to_polygon};
