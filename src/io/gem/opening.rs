//! Opening coordinate transform shared by the reader and the writer.
//!
//! GEM stores openings (apertures, doors, holes) as 2D offsets from a
//! reference corner of the parent face:
//!
//! - horizontal parents (normal exactly up or down) measure from the
//!   upper-right corner, with both plane axes reversed so the offsets grow
//!   toward the face interior;
//! - every other parent measures from the lower-left corner along the plane
//!   axes.
//!
//! The writer projects with [`OpeningFrame::to_offsets`] and the reader
//! lifts with [`OpeningFrame::to_point`], so a write/read round trip
//! reproduces each opening vertex.

use crate::geometry::{nudge_off_edge, offset_polygon_inward};
use crate::notification::NotificationCollection;
use crate::types::{Face3D, Vector2, Vector3};

/// Opening kinds and their GEM codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpeningKind {
    Aperture,
    Door,
    Hole,
}

impl OpeningKind {
    pub fn code(&self) -> i64 {
        match self {
            OpeningKind::Aperture => 0,
            OpeningKind::Door => 1,
            OpeningKind::Hole => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(OpeningKind::Aperture),
            1 => Some(OpeningKind::Door),
            2 => Some(OpeningKind::Hole),
            _ => None,
        }
    }
}

/// Reference corner and axes that opening offsets are measured in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningFrame {
    pub origin: Vector3,
    pub x_axis: Vector3,
    pub y_axis: Vector3,
}

impl OpeningFrame {
    pub fn for_face(face: &Face3D) -> Self {
        let plane = face.plane();
        if plane.is_horizontal() {
            OpeningFrame {
                origin: face.upper_right_corner(),
                x_axis: -plane.x_axis,
                y_axis: -plane.y_axis,
            }
        } else {
            OpeningFrame {
                origin: face.lower_left_corner(),
                x_axis: plane.x_axis,
                y_axis: plane.y_axis,
            }
        }
    }

    /// 3D point at the given offsets
    pub fn to_point(&self, x_m: f64, y_m: f64) -> Vector3 {
        self.origin + self.x_axis * x_m + self.y_axis * y_m
    }

    /// Offsets of a 3D point lying in the parent plane
    pub fn to_offsets(&self, point: Vector3) -> Vector2 {
        let d = point - self.origin;
        Vector2::new(d.dot(&self.x_axis), d.dot(&self.y_axis))
    }
}

/// Offsets of every vertex of `opening` relative to `parent`
pub fn encode_opening(parent: &Face3D, opening: &[Vector3]) -> Vec<Vector2> {
    let frame = OpeningFrame::for_face(parent);
    opening.iter().map(|p| frame.to_offsets(*p)).collect()
}

/// Rebuilds opening vertices inside a parent face
pub struct OpeningDecoder<'a> {
    parent: &'a Face3D,
    frame: OpeningFrame,
    tolerance: f64,
}

impl<'a> OpeningDecoder<'a> {
    /// `tolerance` is the edge snapping distance (a multiple of the model tolerance)
    pub fn new(parent: &'a Face3D, tolerance: f64) -> Self {
        Self {
            parent,
            frame: OpeningFrame::for_face(parent),
            tolerance,
        }
    }

    /// Lift one offset pair, pushing aperture and door vertices off the parent
    /// boundary so they never touch it.
    pub fn decode_vertex(
        &self,
        x_m: f64,
        y_m: f64,
        kind: OpeningKind,
        notifications: &mut NotificationCollection,
    ) -> Vector3 {
        let point = self.frame.to_point(x_m, y_m);
        if kind == OpeningKind::Hole {
            return point;
        }
        let plane = self.parent.plane();
        let boundary = self.parent.boundary_polygon2d();
        let local = plane.xyz_to_xy(point);
        let edges = boundary.edges_near_point(local, self.tolerance);

        let corrected: Vector2 = match edges.len() {
            0 => return point,
            1 => {
                let n = boundary.len();
                let a = boundary.vertices[edges[0]];
                let b = boundary.vertices[(edges[0] + 1) % n];
                nudge_off_edge(local, a, b, self.tolerance, &boundary)
            }
            2 => {
                let inner = offset_polygon_inward(&boundary, self.tolerance);
                match inner.closest_point_on_boundary(local) {
                    Some(p) => p,
                    None => return point,
                }
            }
            count => {
                notifications.warn(format!(
                    "Opening vertex ({:.6}, {:.6}) touches {} edges of its parent face; left unchanged",
                    x_m, y_m, count
                ));
                return point;
            }
        };
        plane.xy_to_xyz(corrected)
    }

    /// Lift a whole opening loop
    pub fn decode(
        &self,
        offsets: &[Vector2],
        kind: OpeningKind,
        notifications: &mut NotificationCollection,
    ) -> Vec<Vector3> {
        offsets
            .iter()
            .map(|o| self.decode_vertex(o.x, o.y, kind, notifications))
            .collect()
    }
}
