//! Shade, shade group, PV, tree and mesh records

use super::text_writer::{
    face_block, polyface_record, record_header, round_to, short_number, translucent_face_block,
    OpeningLoop,
};
use crate::entities::{ModelObject, Shade, ShadeMesh, SpecialShadeKind};
use crate::error::Result;
use crate::geometry::{extrude_face, Polyface};
use crate::io::gem::identifier::IdentifierMapper;
use crate::io::gem::object_type::GemObjectType;
use crate::io::gem::opening::OpeningKind;
use crate::io::gem::reader::TREE_SCALE;
use crate::notification::NotificationCollection;
use crate::types::{Face3D, Vector3};
use indexmap::IndexMap;

/// Tree variant written when a tree shade carries none
pub const DEFAULT_TREE_TYPE: u32 = 1;

/// One shade record to write
#[derive(Debug, Clone)]
pub enum ShadeJob {
    /// An ungrouped shade (generic, topography or translucent)
    Single { shade: Shade, identifier: String },
    /// Shades sharing a group id, merged into one closed volume
    Group { shades: Vec<Shade>, identifier: String },
    Pv { shade: Shade, identifier: String },
    Tree { shade: Shade, identifier: String },
    Mesh(ShadeMesh),
}

/// GEM type a shade is written as
pub fn shade_object_type(shade: &Shade) -> GemObjectType {
    match GemObjectType::from_metadata(shade.metadata()) {
        Some(object_type) => object_type,
        None if shade.is_detached => GemObjectType::ContextBuilding,
        None => GemObjectType::Shade,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Slot {
    Group(String),
    Alone(usize),
}

/// Turn shades (in write order) into record jobs.
///
/// PV panels and trees take a fresh identifier each, even when they are
/// import-only and end up not written. Groups of several shades and special
/// single shades are renamed; generic single shades keep their identifier.
pub fn plan_shades(
    shades: Vec<Shade>,
    meshes: Vec<ShadeMesh>,
    mapper: &mut IdentifierMapper,
) -> Vec<ShadeJob> {
    let mut slots: IndexMap<Slot, (Vec<Shade>, Option<String>)> = IndexMap::new();

    for (index, shade) in shades.into_iter().enumerate() {
        let kind = shade.metadata().gem_type;
        if matches!(kind, Some(SpecialShadeKind::Pv) | Some(SpecialShadeKind::Tree)) {
            let identifier = mapper.next_identifier(shade.display_name());
            if !shade.metadata().is_suppressed() {
                slots.insert(Slot::Alone(index), (vec![shade], Some(identifier)));
            }
            continue;
        }
        if shade.metadata().is_suppressed() {
            continue;
        }
        let slot = match &shade.metadata().group_id {
            Some(group) => Slot::Group(group.clone()),
            None => Slot::Alone(index),
        };
        slots.entry(slot).or_default().0.push(shade);
    }

    let mut jobs = Vec::with_capacity(slots.len() + meshes.len());
    for (_, (mut members, assigned)) in slots {
        if let Some(identifier) = assigned {
            let shade = members.remove(0);
            match shade.metadata().gem_type {
                Some(SpecialShadeKind::Tree) => jobs.push(ShadeJob::Tree { shade, identifier }),
                _ => jobs.push(ShadeJob::Pv { shade, identifier }),
            }
            continue;
        }
        if members.len() > 1 {
            let identifier = mapper.next_identifier(members[0].display_name());
            jobs.push(ShadeJob::Group {
                shades: members,
                identifier,
            });
            continue;
        }
        let shade = members.remove(0);
        let identifier = if shade.metadata().gem_type.is_some() {
            mapper.next_identifier(shade.display_name())
        } else {
            shade.identifier().to_string()
        };
        jobs.push(ShadeJob::Single { shade, identifier });
    }
    jobs.extend(meshes.into_iter().map(ShadeJob::Mesh));
    jobs
}

/// Degrees east of north of a horizontal direction, in `[0, 360)`
fn compass_azimuth(direction: Vector3) -> f64 {
    let angle = direction.x.atan2(direction.y).to_degrees();
    if angle < 0.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Degrees above the horizon
fn altitude(direction: Vector3) -> f64 {
    direction.normalize().z.clamp(-1.0, 1.0).asin().to_degrees()
}

/// `x y z width height xy yz` of a PV rectangle
pub fn encode_pv(geometry: &Face3D) -> Option<String> {
    let b = geometry.boundary();
    if b.len() < 4 {
        return None;
    }
    let origin = b[0];
    let width_direction = b[1] - b[0];
    let width = width_direction.length();
    let height = (b[3] - b[0]).length();
    let xy = (90.0 - compass_azimuth(width_direction)).abs();
    let yz = 90.0 - altitude(geometry.normal());
    let values = [
        round_to(origin.x, 4),
        round_to(origin.y, 4),
        round_to(origin.z, 4),
        round_to(width, 4),
        round_to(height, 4),
        round_to(xy, 6),
        round_to(yz, 6),
    ];
    Some(join_numbers(&values))
}

/// `x y z sx sy sz xy yz` of a tree billboard
pub fn encode_tree(geometry: &Face3D) -> Option<String> {
    let b = geometry.boundary();
    if b.len() < 4 {
        return None;
    }
    let centre = (b[0] + b[3]) / 2.0;
    let width = (b[3] - b[0]).length() / TREE_SCALE[0];
    let height = (b[1] - b[0]).length() / TREE_SCALE[2];
    let normal = geometry.normal();
    let xy = (360.0 - compass_azimuth(normal)).abs();
    let yz = altitude(normal);
    let values = [
        round_to(centre.x, 4),
        round_to(centre.y, 4),
        round_to(centre.z, 4),
        round_to(width, 4),
        round_to(width, 4),
        round_to(height, 4),
        round_to(xy, 6),
        round_to(yz, 6),
    ];
    Some(join_numbers(&values))
}

fn join_numbers(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| short_number(*v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Polyface record of `faces`, holes written as openings
fn faces_record(
    object_type: GemObjectType,
    display_name: &str,
    identifier: &str,
    faces: Vec<Face3D>,
    tolerance: f64,
    notifications: &mut NotificationCollection,
) -> Result<Option<String>> {
    let polyface = Polyface::from_faces(faces, tolerance, identifier)?;
    if polyface.vertex_count() < 3 {
        notifications.warn(format!(
            "Shade {} has fewer than 3 unique vertices and was not written",
            identifier
        ));
        return Ok(None);
    }
    let blocks: Vec<String> = polyface
        .face_indices
        .iter()
        .zip(&polyface.faces)
        .map(|(indices, face)| {
            if object_type == GemObjectType::TranslucentShade {
                translucent_face_block(indices, &polyface.vertices)
            } else {
                let holes: Vec<OpeningLoop> = face
                    .holes()
                    .iter()
                    .map(|h| OpeningLoop::new(OpeningKind::Hole, h.clone()))
                    .collect();
                face_block(indices, &polyface.vertices, &holes)
            }
        })
        .collect();
    Ok(Some(polyface_record(
        object_type,
        display_name,
        identifier,
        &polyface.vertices,
        &blocks,
    )))
}

fn write_single(
    shade: &Shade,
    identifier: &str,
    thickness: f64,
    tolerance: f64,
    notifications: &mut NotificationCollection,
) -> Result<Option<String>> {
    if shade.geometry.unique_vertex_count(tolerance) < 3 {
        notifications.warn(format!(
            "Shade {} has fewer than 3 unique vertices and was not written",
            shade.identifier()
        ));
        return Ok(None);
    }
    let object_type = shade_object_type(shade);
    let faces = match object_type {
        GemObjectType::TranslucentShade => vec![shade.geometry.without_holes()],
        GemObjectType::Shade | GemObjectType::ContextBuilding if thickness > 0.0 => {
            extrude_face(&shade.geometry, thickness)
        }
        _ => vec![shade.geometry.clone()],
    };
    faces_record(
        object_type,
        shade.display_name(),
        identifier,
        faces,
        tolerance,
        notifications,
    )
}

/// Encode one shade job; `None` when the object was dropped
pub fn write_shade_job(
    job: &ShadeJob,
    thickness: f64,
    tolerance: f64,
    notifications: &mut NotificationCollection,
) -> Result<Option<String>> {
    match job {
        ShadeJob::Single { shade, identifier } => {
            write_single(shade, identifier, thickness, tolerance, notifications)
        }
        ShadeJob::Group { shades, identifier } => {
            let object_type = shade_object_type(&shades[0]);
            let faces = shades.iter().map(|s| s.geometry.clone()).collect();
            faces_record(
                object_type,
                shades[0].display_name(),
                identifier,
                faces,
                tolerance,
                notifications,
            )
        }
        ShadeJob::Pv { shade, identifier } => match encode_pv(&shade.geometry) {
            Some(line) => Ok(Some(format!(
                "{}\n{}",
                record_header(GemObjectType::Pv, shade.display_name(), identifier),
                line
            ))),
            None => {
                notifications.warn(format!(
                    "PV {} is not a rectangle and was not written",
                    shade.identifier()
                ));
                Ok(None)
            }
        },
        ShadeJob::Tree { shade, identifier } => match encode_tree(&shade.geometry) {
            Some(line) => Ok(Some(format!(
                "{}\n2D Tree {}\n{}",
                record_header(GemObjectType::Tree, shade.display_name(), identifier),
                shade.metadata().tree_type.unwrap_or(DEFAULT_TREE_TYPE),
                line
            ))),
            None => {
                notifications.warn(format!(
                    "Tree {} is not a billboard and was not written",
                    shade.identifier()
                ));
                Ok(None)
            }
        },
        ShadeJob::Mesh(mesh) => write_mesh(mesh, notifications),
    }
}

fn write_mesh(mesh: &ShadeMesh, notifications: &mut NotificationCollection) -> Result<Option<String>> {
    if mesh.vertices.len() < 3 {
        notifications.warn(format!(
            "Shade mesh {} has fewer than 3 vertices and was not written",
            mesh.identifier()
        ));
        return Ok(None);
    }
    let count = mesh.vertices.len();
    let mut blocks = Vec::with_capacity(mesh.faces.len());
    for face in &mesh.faces {
        if face.len() < 3 || face.iter().any(|&i| i >= count) {
            notifications.warn(format!(
                "Skipped an invalid face of shade mesh {}",
                mesh.identifier()
            ));
            continue;
        }
        blocks.push(face_block(face, &mesh.vertices, &[]));
    }
    let object_type = if mesh.is_detached {
        GemObjectType::ContextBuilding
    } else {
        GemObjectType::Shade
    };
    Ok(Some(polyface_record(
        object_type,
        mesh.display_name(),
        mesh.identifier(),
        &mesh.vertices,
        &blocks,
    )))
}
