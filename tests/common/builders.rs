//! Model builders shared by the integration tests.

#![allow(dead_code)]

use gem_tools_rs::{
    Aperture, Face, Face3D, GemMetadata, Model, Room, Shade, SpecialShadeKind, Vector3,
};

pub fn v(x: f64, y: f64, z: f64) -> Vector3 {
    Vector3::new(x, y, z)
}

/// Rectangle in the XZ plane at `y`, normal -Y
pub fn wall_rect(x0: f64, x1: f64, y: f64, z0: f64, z1: f64) -> Face3D {
    Face3D::new(vec![v(x0, y, z0), v(x1, y, z0), v(x1, y, z1), v(x0, y, z1)])
}

/// Square in a horizontal plane, normal +Z
pub fn horizontal_square(x0: f64, y0: f64, size: f64, z: f64) -> Face3D {
    Face3D::new(vec![
        v(x0, y0, z),
        v(x0 + size, y0, z),
        v(x0 + size, y0 + size, z),
        v(x0, y0 + size, z),
    ])
}

/// The six outward-facing faces of an axis aligned box:
/// floor, roof, south, north, west, east
pub fn box_faces(origin: Vector3, dx: f64, dy: f64, dz: f64) -> Vec<Face3D> {
    let p = |x: f64, y: f64, z: f64| v(origin.x + x * dx, origin.y + y * dy, origin.z + z * dz);
    vec![
        Face3D::new(vec![p(0.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(1.0, 1.0, 0.0), p(1.0, 0.0, 0.0)]),
        Face3D::new(vec![p(0.0, 0.0, 1.0), p(1.0, 0.0, 1.0), p(1.0, 1.0, 1.0), p(0.0, 1.0, 1.0)]),
        Face3D::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 0.0, 1.0), p(0.0, 0.0, 1.0)]),
        Face3D::new(vec![p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0), p(0.0, 1.0, 1.0), p(1.0, 1.0, 1.0)]),
        Face3D::new(vec![p(0.0, 1.0, 0.0), p(0.0, 0.0, 0.0), p(0.0, 0.0, 1.0), p(0.0, 1.0, 1.0)]),
        Face3D::new(vec![p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(1.0, 1.0, 1.0), p(1.0, 0.0, 1.0)]),
    ]
}

/// Box room with faces named `<id>_Face<n>`
pub fn box_room(identifier: &str, name: &str, origin: Vector3, size: (f64, f64, f64)) -> Room {
    let faces = box_faces(origin, size.0, size.1, size.2)
        .into_iter()
        .enumerate()
        .map(|(i, g)| Face::new(format!("{}_Face{}", identifier, i), g))
        .collect();
    Room::new(identifier, faces).with_display_name(name)
}

/// Box room with one window on its south wall
pub fn box_room_with_window(identifier: &str) -> Room {
    let mut room = box_room(identifier, "Office", v(0.0, 0.0, 0.0), (6.0, 4.0, 3.0));
    room.faces[2].add_apertures(vec![Aperture::new(
        format!("{}_Aperture0", identifier),
        wall_rect(1.0, 4.0, 0.0, 0.8, 2.2),
    )]);
    room
}

/// Model holding the given rooms
pub fn model_with_rooms(rooms: Vec<Room>) -> Model {
    let mut model = Model::new("Building");
    for room in rooms {
        model.add_room(room);
    }
    model
}

/// Shades forming a closed box, sharing one group id
pub fn grouped_box_shades(group: &str, name: &str, kind: Option<SpecialShadeKind>) -> Vec<Shade> {
    let mut metadata = GemMetadata::new().with_group_id(group);
    if let Some(kind) = kind {
        metadata = metadata.with_gem_type(kind);
    }
    box_faces(v(20.0, 0.0, 0.0), 2.0, 2.0, 2.0)
        .into_iter()
        .enumerate()
        .map(|(i, g)| {
            Shade::new(format!("{}_{}", group, i), g)
                .with_display_name(name)
                .with_metadata(metadata.clone())
                .detached(true)
        })
        .collect()
}
