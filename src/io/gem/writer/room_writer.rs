//! Room records

use super::text_writer::{face_block, polyface_record, OpeningLoop};
use crate::entities::{Face, ModelObject, Room};
use crate::error::Result;
use crate::geometry::{split_through_holes, Polyface};
use crate::io::gem::object_type::GemObjectType;
use crate::io::gem::opening::OpeningKind;
use crate::notification::NotificationCollection;
use crate::types::{Face3D, Vector3};

/// A face ready to be written: its boundary and its openings in write order
struct FacePlan {
    geometry: Face3D,
    openings: Vec<OpeningLoop>,
}

fn sub_face_openings<'a>(
    apertures: impl Iterator<Item = &'a Face3D>,
    doors: impl Iterator<Item = &'a Face3D>,
) -> Vec<OpeningLoop> {
    apertures
        .map(|g| OpeningLoop::new(OpeningKind::Aperture, g.boundary().to_vec()))
        .chain(doors.map(|g| OpeningLoop::new(OpeningKind::Door, g.boundary().to_vec())))
        .collect()
}

/// Apertures, doors and holes of an unsplit face
fn plain_plan(face: &Face) -> FacePlan {
    let mut openings = sub_face_openings(
        face.apertures.iter().map(|a| &a.geometry),
        face.doors.iter().map(|d| &d.geometry),
    );
    openings.extend(
        face.geometry
            .holes()
            .iter()
            .map(|h| OpeningLoop::new(OpeningKind::Hole, h.clone())),
    );
    FacePlan {
        geometry: face.geometry.without_holes(),
        openings,
    }
}

/// Fragment of `pieces` hosting `point`, falling back to the first
fn host_piece(pieces: &[Face3D], point: Vector3) -> usize {
    pieces
        .iter()
        .position(|p| p.boundary_polygon2d().is_point_inside(p.plane().xyz_to_xy(point)))
        .unwrap_or(0)
}

/// Floors and roofs with holes are cut into hole-free pieces
fn split_plan(
    face: &Face,
    tolerance: f64,
    notifications: &mut NotificationCollection,
) -> Vec<FacePlan> {
    let geometry = &face.geometry;
    let pieces = match split_through_holes(
        &geometry.boundary_polygon2d(),
        &geometry.hole_polygons2d(),
        tolerance,
    ) {
        Ok(pieces) if !pieces.is_empty() => pieces,
        Ok(_) => return vec![plain_plan(face)],
        Err(e) => {
            notifications.warn(format!(
                "Failed to split face {} through its holes ({}); writing it with holes",
                face.identifier(),
                e
            ));
            return vec![plain_plan(face)];
        }
    };

    let plane = geometry.plane();
    let pieces: Vec<Face3D> = pieces
        .iter()
        .map(|p| Face3D::from_polygons2d(plane, &p.to_ccw(), &[]))
        .collect();
    let mut plans: Vec<FacePlan> = pieces
        .iter()
        .map(|p| FacePlan {
            geometry: p.clone(),
            openings: Vec::new(),
        })
        .collect();
    for aperture in &face.apertures {
        let host = host_piece(&pieces, aperture.geometry.centroid());
        plans[host].openings.push(OpeningLoop::new(
            OpeningKind::Aperture,
            aperture.geometry.boundary().to_vec(),
        ));
    }
    for door in &face.doors {
        let host = host_piece(&pieces, door.geometry.centroid());
        plans[host]
            .openings
            .push(OpeningLoop::new(OpeningKind::Door, door.geometry.boundary().to_vec()));
    }
    plans
}

/// Encode one room as a Space (or UnconditionedSpace) record.
///
/// Faces synthesized while reading holes are left out; air boundaries are
/// written as a face whose only opening is its own outline as a hole.
pub fn write_room(
    room: &Room,
    tolerance: f64,
    notifications: &mut NotificationCollection,
) -> Result<Option<String>> {
    let mut plans = Vec::with_capacity(room.faces.len());
    for face in &room.faces {
        if face.metadata().hole_import {
            continue;
        }
        if face.geometry.unique_vertex_count(tolerance) < 3 {
            notifications.warn(format!(
                "Face {} in room {} has fewer than 3 unique vertices and was skipped",
                face.identifier(),
                room.identifier()
            ));
            continue;
        }
        if face.is_air_boundary() {
            let outline = face.geometry.without_holes();
            plans.push(FacePlan {
                openings: vec![OpeningLoop::new(OpeningKind::Hole, outline.boundary().to_vec())],
                geometry: outline,
            });
        } else if face.face_type.is_horizontal() && face.geometry.has_holes() {
            plans.extend(split_plan(face, tolerance, notifications));
        } else {
            plans.push(plain_plan(face));
        }
    }

    if plans.is_empty() {
        notifications.warn(format!(
            "Room {} has no faces to write and was skipped",
            room.identifier()
        ));
        return Ok(None);
    }

    let (geometries, openings): (Vec<Face3D>, Vec<Vec<OpeningLoop>>) =
        plans.into_iter().map(|p| (p.geometry, p.openings)).unzip();
    let polyface = Polyface::from_faces(geometries, tolerance, room.identifier())?;
    let blocks: Vec<String> = polyface
        .face_indices
        .iter()
        .zip(&openings)
        .map(|(indices, openings)| face_block(indices, &polyface.vertices, openings))
        .collect();

    let object_type = if room.is_conditioned {
        GemObjectType::Space
    } else {
        GemObjectType::UnconditionedSpace
    };
    Ok(Some(polyface_record(
        object_type,
        room.display_name(),
        room.identifier(),
        &polyface.vertices,
        &blocks,
    )))
}
