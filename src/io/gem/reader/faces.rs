//! Building rooms, shades and meshes from polyface bodies.
//!
//! Holes are resolved here. A face whose holes cover nearly all of it
//! becomes a void (an air boundary in rooms, a suppressed shade otherwise).
//! Anything less is cut out of the face with a coplanar difference; holes
//! that do not survive as holes of a resulting fragment are emitted as
//! separate tagged faces.

use super::body::{FaceRecord, PolyfaceBody};
use super::segment::GemSegment;
use super::GemReaderConfiguration;
use crate::entities::{
    Aperture, BoundaryCondition, Door, Face, GemMetadata, ModelObject, Room, Shade, ShadeMesh,
};
use crate::geometry::{polygon_difference, snap_polygon_to_polygon};
use crate::io::gem::object_type::GemObjectType;
use crate::io::gem::opening::{OpeningDecoder, OpeningKind};
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::{Face3D, Polygon2D, Vector3};

/// Outcome of cutting holes out of a face
#[derive(Debug, Clone)]
pub enum HoleResolution {
    /// No holes were given
    Intact(Face3D),
    /// Holes cover the face; the boundary and every hole as standalone faces
    Covered { boundary: Face3D, holes: Vec<Face3D> },
    /// Fragments left after the difference, plus holes no fragment absorbed
    Split {
        fragments: Vec<Face3D>,
        unmatched: Vec<Face3D>,
    },
}

/// Loop oriented like the parent face
fn oriented_like(parent: &Face3D, points: Vec<Vector3>) -> Vec<Vector3> {
    if parent.project_loop(&points).is_clockwise() {
        points.into_iter().rev().collect()
    } else {
        points
    }
}

/// Cut `holes` out of `face`
pub fn resolve_holes(
    face: &Face3D,
    holes: Vec<Vec<Vector3>>,
    config: &GemReaderConfiguration,
) -> HoleResolution {
    if holes.is_empty() {
        return HoleResolution::Intact(face.clone());
    }
    let plane = *face.plane();
    let boundary_area = face.boundary_area();
    let hole_area: f64 = holes.iter().map(|h| face.project_loop(h).area()).sum();

    if boundary_area <= 0.0 || hole_area / boundary_area >= config.hole_area_threshold {
        let holes = holes
            .into_iter()
            .map(|h| Face3D::with_plane(oriented_like(face, h), Vec::new(), plane))
            .collect();
        return HoleResolution::Covered {
            boundary: face.without_holes(),
            holes,
        };
    }

    let tolerance = config.snap_tolerance();
    let boundary2d = face.boundary_polygon2d();
    let snapped: Vec<Polygon2D> = holes
        .iter()
        .map(|h| snap_polygon_to_polygon(&face.project_loop(h), &boundary2d, tolerance))
        .collect();

    let pieces = polygon_difference(&boundary2d, &snapped);
    let mut matched = vec![false; snapped.len()];
    for piece in &pieces {
        for piece_hole in &piece.holes {
            let centroid = piece_hole.centroid();
            if let Some(i) = snapped
                .iter()
                .enumerate()
                .position(|(i, h)| !matched[i] && h.centroid().distance(&centroid) <= tolerance)
            {
                matched[i] = true;
            }
        }
    }

    // every hole sits inside the face: keep the original boundary vertices
    let fragments = if pieces.len() == 1 && matched.iter().all(|m| *m) {
        let lifted = snapped
            .iter()
            .map(|h| h.vertices.iter().map(|v| plane.xy_to_xyz(*v)).collect())
            .collect();
        vec![Face3D::with_plane(face.boundary().to_vec(), lifted, plane)]
    } else {
        pieces
            .iter()
            .map(|p| Face3D::from_polygons2d(&plane, &p.boundary, &p.holes))
            .collect()
    };

    let unmatched = snapped
        .iter()
        .zip(&matched)
        .filter(|(_, m)| !**m)
        .map(|(h, _)| Face3D::from_polygons2d(&plane, &h.to_ccw(), &[]))
        .collect();

    HoleResolution::Split {
        fragments,
        unmatched,
    }
}

/// Index of the fragment containing `point`, falling back to the first
fn host_fragment(fragments: &[Face3D], point: Vector3) -> usize {
    fragments
        .iter()
        .position(|f| {
            f.boundary_polygon2d()
                .is_point_inside(f.plane().xyz_to_xy(point))
        })
        .unwrap_or(0)
}

/// Openings of one face record, decoded into 3D
struct DecodedOpenings {
    apertures: Vec<Vec<Vector3>>,
    doors: Vec<Vec<Vector3>>,
    holes: Vec<Vec<Vector3>>,
}

fn decode_openings(
    parent: &Face3D,
    record: &FaceRecord,
    config: &GemReaderConfiguration,
    notifications: &mut NotificationCollection,
) -> DecodedOpenings {
    let decoder = OpeningDecoder::new(parent, config.snap_tolerance());
    let mut decoded = DecodedOpenings {
        apertures: Vec::new(),
        doors: Vec::new(),
        holes: Vec::new(),
    };
    for opening in &record.openings {
        let points = decoder.decode(&opening.offsets, opening.kind, notifications);
        match opening.kind {
            OpeningKind::Aperture => decoded.apertures.push(points),
            OpeningKind::Door => decoded.doors.push(points),
            OpeningKind::Hole => decoded.holes.push(points),
        }
    }
    decoded
}

/// Rooms hold faces; apertures and doors keep running numbers per room
struct RoomBuilder<'a> {
    room_id: &'a str,
    faces: Vec<Face>,
    aperture_count: usize,
    door_count: usize,
}

impl<'a> RoomBuilder<'a> {
    fn new(room_id: &'a str) -> Self {
        Self {
            room_id,
            faces: Vec::new(),
            aperture_count: 0,
            door_count: 0,
        }
    }

    fn next_face_id(&self) -> String {
        format!("{}_Face{}", self.room_id, self.faces.len())
    }

    fn push(&mut self, face: Face) {
        self.faces.push(face);
    }

    fn aperture(&mut self, points: Vec<Vector3>) -> Aperture {
        let aperture = Aperture::new(
            format!("{}_Aperture{}", self.room_id, self.aperture_count),
            Face3D::new(points),
        );
        self.aperture_count += 1;
        aperture
    }

    fn door(&mut self, points: Vec<Vector3>) -> Door {
        let door = Door::new(
            format!("{}_Door{}", self.room_id, self.door_count),
            Face3D::new(points),
        );
        self.door_count += 1;
        door
    }
}

/// Apertures and doors cannot face the ground
fn coerce_boundary_condition(face: &mut Face, notifications: &mut NotificationCollection) {
    if face.has_sub_faces() && face.boundary_condition.is_ground() {
        face.boundary_condition = BoundaryCondition::Outdoors;
        notifications.notify(
            NotificationType::Warning,
            format!(
                "Face {} has apertures or doors; boundary condition changed from Ground to Outdoors",
                face.identifier()
            ),
        );
    }
}

/// Decode a Space or UnconditionedSpace record
pub fn read_room(
    segment: &GemSegment,
    body: &PolyfaceBody,
    config: &GemReaderConfiguration,
    notifications: &mut NotificationCollection,
) -> Room {
    let mut builder = RoomBuilder::new(&segment.identifier);

    for record in &body.faces {
        let geometry = Face3D::new(record.boundary(&body.vertices));
        let openings = decode_openings(&geometry, record, config, notifications);
        let has_sub_faces = !openings.apertures.is_empty() || !openings.doors.is_empty();

        match resolve_holes(&geometry, openings.holes, config) {
            HoleResolution::Intact(geometry) => {
                let mut face = Face::new(builder.next_face_id(), geometry);
                let apertures: Vec<Aperture> =
                    openings.apertures.into_iter().map(|p| builder.aperture(p)).collect();
                let doors: Vec<Door> = openings.doors.into_iter().map(|p| builder.door(p)).collect();
                face.add_apertures(apertures);
                face.add_doors(doors);
                coerce_boundary_condition(&mut face, notifications);
                builder.push(face);
            }
            HoleResolution::Covered { boundary, holes } => {
                if has_sub_faces {
                    notifications.warn(format!(
                        "Apertures and doors on void face {} in {} were dropped",
                        builder.next_face_id(),
                        segment.identifier
                    ));
                }
                if holes.len() == 1 {
                    let face = Face::air_boundary(builder.next_face_id(), boundary);
                    builder.push(face);
                } else {
                    for hole in holes {
                        let face = Face::air_boundary(builder.next_face_id(), hole);
                        builder.push(face);
                    }
                }
            }
            HoleResolution::Split {
                fragments,
                unmatched,
            } => {
                let mut faces: Vec<Face> = Vec::with_capacity(fragments.len());
                for fragment in &fragments {
                    let id = format!("{}_Face{}", segment.identifier, builder.faces.len() + faces.len());
                    faces.push(Face::new(id, fragment.clone()));
                }
                if faces.is_empty() && has_sub_faces {
                    notifications.warn(format!(
                        "Apertures and doors of a fully cut face in {} were dropped",
                        segment.identifier
                    ));
                } else {
                    for points in openings.apertures {
                        let aperture = builder.aperture(points);
                        let host = host_fragment(&fragments, aperture.geometry.centroid());
                        faces[host].apertures.push(aperture);
                    }
                    for points in openings.doors {
                        let door = builder.door(points);
                        let host = host_fragment(&fragments, door.geometry.centroid());
                        faces[host].doors.push(door);
                    }
                }
                for mut face in faces {
                    coerce_boundary_condition(&mut face, notifications);
                    builder.push(face);
                }
                for hole in unmatched {
                    let face = Face::air_boundary(builder.next_face_id(), hole)
                        .with_metadata(GemMetadata::hole_import());
                    builder.push(face);
                }
            }
        }
    }

    Room::new(segment.identifier.clone(), builder.faces)
        .with_display_name(segment.display_name.clone())
        .with_conditioning(segment.object_type != GemObjectType::UnconditionedSpace)
}

/// Decode the faces of any shade-like record (shades, context buildings,
/// topography, translucent shades)
pub fn parse_generic_faces(
    segment: &GemSegment,
    body: &PolyfaceBody,
    config: &GemReaderConfiguration,
    notifications: &mut NotificationCollection,
) -> Vec<Shade> {
    let object_type = segment.object_type;
    let mut metadata = GemMetadata::new().with_group_id(segment.identifier.clone());
    if let Some(kind) = object_type.special_kind() {
        metadata = metadata.with_gem_type(kind);
    }

    let mut geometries: Vec<(Face3D, bool)> = Vec::with_capacity(body.faces.len());
    for record in &body.faces {
        let boundary = record.boundary(&body.vertices);
        if object_type == GemObjectType::TranslucentShade {
            geometries.push((Face3D::new(boundary), false));
            continue;
        }

        let parent = Face3D::new(boundary);
        let openings = decode_openings(&parent, record, config, notifications);
        if !openings.apertures.is_empty() || !openings.doors.is_empty() {
            notifications.notify(
                NotificationType::NotSupported,
                format!(
                    "Apertures and doors on shade {} are not supported and were ignored",
                    segment.identifier
                ),
            );
        }

        if object_type == GemObjectType::Topography {
            let holes = openings
                .holes
                .into_iter()
                .map(|h| oriented_like(&parent, h).into_iter().rev().collect())
                .collect();
            geometries.push((Face3D::with_holes(parent.boundary().to_vec(), holes), false));
            continue;
        }

        match resolve_holes(&parent, openings.holes, config) {
            HoleResolution::Intact(geometry) => geometries.push((geometry, false)),
            HoleResolution::Covered { boundary, holes } => {
                if holes.len() == 1 {
                    geometries.push((boundary, true));
                } else {
                    geometries.extend(holes.into_iter().map(|h| (h, true)));
                }
            }
            HoleResolution::Split {
                fragments,
                unmatched,
            } => {
                geometries.extend(fragments.into_iter().map(|f| (f, false)));
                geometries.extend(unmatched.into_iter().map(|h| (h, true)));
            }
        }
    }

    let single = geometries.len() == 1;
    geometries
        .into_iter()
        .enumerate()
        .map(|(i, (geometry, hole_import))| {
            let identifier = if single {
                segment.identifier.clone()
            } else {
                format!("{}_{}", segment.identifier, i)
            };
            let mut meta = metadata.clone();
            meta.hole_import = hole_import;
            Shade::new(identifier, geometry)
                .with_display_name(segment.display_name.clone())
                .with_metadata(meta)
                .detached(object_type.is_detached())
        })
        .collect()
}

/// Read a context building as one indexed mesh.
///
/// Only applies to bodies of several faces, none with openings and none
/// with more than four vertices; returns `None` otherwise.
pub fn try_mesh_parse(segment: &GemSegment, body: &PolyfaceBody) -> Option<ShadeMesh> {
    if body.faces.len() <= 1 || body.has_openings() || body.faces.iter().any(|f| f.indices.len() > 4) {
        return None;
    }
    let faces = body.faces.iter().map(|f| f.indices.clone()).collect();
    Some(
        ShadeMesh::new(segment.identifier.clone(), body.vertices.clone(), faces)
            .with_display_name(segment.display_name.clone())
            .detached(true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GemReaderConfiguration {
        GemReaderConfiguration::default()
    }

    fn square(size: f64) -> Face3D {
        Face3D::new(vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(size, 0.0, 0.0),
            Vector3::new(size, 0.0, size),
            Vector3::new(0.0, 0.0, size),
        ])
    }

    fn wall_rect(x0: f64, z0: f64, x1: f64, z1: f64) -> Vec<Vector3> {
        vec![
            Vector3::new(x0, 0.0, z0),
            Vector3::new(x1, 0.0, z0),
            Vector3::new(x1, 0.0, z1),
            Vector3::new(x0, 0.0, z1),
        ]
    }

    #[test]
    fn test_full_cover_is_void() {
        let face = square(10.0);
        let hole = wall_rect(0.0, 0.0, 10.0, 9.85);
        match resolve_holes(&face, vec![hole], &config()) {
            HoleResolution::Covered { holes, .. } => assert_eq!(holes.len(), 1),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_inner_hole_is_kept() {
        let face = square(10.0);
        let hole = wall_rect(2.0, 2.0, 4.0, 4.0);
        match resolve_holes(&face, vec![hole], &config()) {
            HoleResolution::Split {
                fragments,
                unmatched,
            } => {
                assert_eq!(fragments.len(), 1);
                assert_eq!(fragments[0].holes().len(), 1);
                assert!(unmatched.is_empty());
                assert!((fragments[0].area() - 96.0).abs() < 1e-6);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_hole_touching_edge_is_unmatched() {
        let face = square(10.0);
        let hole = wall_rect(0.0, 0.0, 4.0, 10.0);
        match resolve_holes(&face, vec![hole], &config()) {
            HoleResolution::Split {
                fragments,
                unmatched,
            } => {
                assert_eq!(fragments.len(), 1);
                assert!(fragments[0].holes().is_empty());
                assert_eq!(unmatched.len(), 1);
                assert!((unmatched[0].area() - 40.0).abs() < 1e-6);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_covered_hole_faces_follow_parent_orientation() {
        let face = square(10.0);
        let mut hole = wall_rect(0.0, 0.0, 10.0, 10.0);
        hole.reverse();
        if let HoleResolution::Covered { holes, .. } = resolve_holes(&face, vec![hole], &config()) {
            assert!(!face.project_loop(holes[0].boundary()).is_clockwise());
        } else {
            panic!("expected a covered face");
        }
    }
}
