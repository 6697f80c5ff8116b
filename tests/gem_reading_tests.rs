//! Integration tests for reading GEM documents.
//!
//! Records are assembled from their header tuple and body text, read into a
//! model and the resulting rooms, shades and meshes are checked.

mod common;

use approx::assert_relative_eq;
use common::*;
use gem_tools_rs::io::gem::{GemObjectType, GemReaderConfiguration};
use gem_tools_rs::{
    model_from_gem_bytes, BoundaryCondition, FaceType, GemError, ModelObject, NotificationType,
    SpecialShadeKind,
};

fn wall_body(openings: &[(i64, &[(f64, f64)])]) -> String {
    let mut body = format!(
        "4 1\n{}\n4 1 2 3 4\n{}",
        vertex_block(&[
            (0.0, 0.0, 0.0),
            (10.0, 0.0, 0.0),
            (10.0, 0.0, 10.0),
            (0.0, 0.0, 10.0)
        ]),
        openings.len()
    );
    for (kind, offsets) in openings {
        body.push_str(&format!("\n{} {}\n{}", offsets.len(), kind, offset_block(offsets)));
    }
    body
}

fn box_body() -> String {
    format!(
        "8 6\n{}\n4 1 4 3 2\n0\n4 5 6 7 8\n0\n4 1 2 6 5\n0\n4 2 3 7 6\n0\n4 3 4 8 7\n0\n4 4 1 5 8\n0",
        vertex_block(&[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (1.0, 1.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, 0.0, 1.0),
            (1.0, 0.0, 1.0),
            (1.0, 1.0, 1.0),
            (0.0, 1.0, 1.0)
        ])
    )
}

// ===========================================================================
// Rooms
// ===========================================================================

/// A space record becomes one room with its faces and name
#[test]
fn test_read_space_record() {
    let text = document(&[record(GemObjectType::Space, "Office [Office_1]", &box_body())]);
    let model = read(&text);

    assert_eq!(model.room_count(), 1);
    let room = &model.rooms[0];
    assert_eq!(room.identifier(), "Office_1");
    assert_eq!(room.display_name(), "Office");
    assert_eq!(room.faces.len(), 6);
    assert!(room.is_conditioned);
    assert_eq!(room.faces[0].identifier(), "Office_1_Face0");
    assert_eq!(room.faces[0].face_type, FaceType::Floor);
    assert_eq!(room.faces[1].face_type, FaceType::RoofCeiling);
}

/// Untagged names derive the identifier from the display name
#[test]
fn test_identifier_from_untagged_name() {
    let text = document(&[record(GemObjectType::Space, "Meeting Room", &box_body())]);
    let model = read(&text);
    assert_eq!(model.rooms[0].identifier(), "Meeting_Room");
    assert_eq!(model.rooms[0].display_name(), "Meeting Room");
}

/// Repeated identifiers are made unique in document order
#[test]
fn test_duplicate_identifiers_are_suffixed() {
    let text = document(&[
        record(GemObjectType::Space, "Room [R]", &box_body()),
        record(GemObjectType::Space, "Room [R]", &box_body()),
    ]);
    let model = read(&text);
    assert_eq!(model.rooms[0].identifier(), "R");
    assert_eq!(model.rooms[1].identifier(), "R_1");
}

#[test]
fn test_unconditioned_space() {
    let text = document(&[record(GemObjectType::UnconditionedSpace, "Void", &box_body())]);
    let model = read(&text);
    assert!(!model.rooms[0].is_conditioned);
}

/// Apertures and doors are decoded from their corner offsets
#[test]
fn test_read_apertures_and_doors() {
    let body = wall_body(&[
        (0, &[(1.0, 1.0), (4.0, 1.0), (4.0, 3.0), (1.0, 3.0)]),
        (1, &[(6.0, 0.5), (7.0, 0.5), (7.0, 2.5), (6.0, 2.5)]),
    ]);
    let model = read(&document(&[record(GemObjectType::Space, "Room [RM]", &body)]));
    let face = &model.rooms[0].faces[0];

    assert_eq!(face.apertures.len(), 1);
    assert_eq!(face.doors.len(), 1);
    assert_eq!(face.apertures[0].identifier(), "RM_Aperture0");
    assert_eq!(face.doors[0].identifier(), "RM_Door0");
    assert_relative_eq!(face.apertures[0].geometry.area(), 6.0, epsilon = 1e-6);

    let first = face.apertures[0].geometry.boundary()[0];
    assert_relative_eq!(first.x, 1.0, epsilon = 1e-6);
    assert_relative_eq!(first.y, 0.0, epsilon = 1e-6);
    assert_relative_eq!(first.z, 1.0, epsilon = 1e-6);
}

/// Openings sharing the face corner are pulled strictly inside the face
#[test]
fn test_corner_aperture_lands_inside_face() {
    let body = wall_body(&[(0, &[(0.0, 0.0), (3.0, 0.0), (3.0, 2.0), (0.0, 2.0)])]);
    let model = read(&document(&[record(GemObjectType::Space, "Room [RM]", &body)]));
    let aperture = &model.rooms[0].faces[0].apertures[0];

    for p in aperture.geometry.boundary() {
        assert!(p.x > 0.0 && p.x < 10.0, "x = {}", p.x);
        assert!(p.z > 0.0 && p.z < 10.0, "z = {}", p.z);
        assert!(p.y.abs() < 1e-9);
    }
}

/// A ground floor hosting an aperture is switched to outdoors with a warning
#[test]
fn test_ground_face_with_aperture_becomes_outdoors() {
    let body = format!(
        "4 1\n{}\n4 1 2 3 4\n1\n4 0\n{}",
        vertex_block(&[
            (0.0, 0.0, 0.0),
            (0.0, 10.0, 0.0),
            (10.0, 10.0, 0.0),
            (10.0, 0.0, 0.0)
        ]),
        offset_block(&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0)])
    );
    let model = read(&document(&[record(GemObjectType::Space, "Room [RM]", &body)]));
    let face = &model.rooms[0].faces[0];

    assert_eq!(face.boundary_condition, BoundaryCondition::Outdoors);
    assert_eq!(model.notifications.of_type(NotificationType::Warning).len(), 1);
}

// ===========================================================================
// Holes
// ===========================================================================

/// A hole covering 98.5 % of the face turns it into an air boundary
#[test]
fn test_covering_hole_becomes_air_boundary() {
    let body = wall_body(&[(2, &[(0.0, 0.0), (10.0, 0.0), (10.0, 9.85), (0.0, 9.85)])]);
    let model = read(&document(&[record(GemObjectType::Space, "Room [RM]", &body)]));
    let faces = &model.rooms[0].faces;

    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].face_type, FaceType::AirBoundary);
    assert!(!faces[0].metadata().hole_import);
    assert_relative_eq!(faces[0].geometry.area(), 100.0, epsilon = 1e-6);
}

/// Exactly 98 % coverage is enough for an air boundary
#[test]
fn test_hole_at_threshold_becomes_air_boundary() {
    let body = wall_body(&[(2, &[(0.0, 0.0), (10.0, 0.0), (10.0, 9.8), (0.0, 9.8)])]);
    let model = read(&document(&[record(GemObjectType::Space, "Room [RM]", &body)]));
    let faces = &model.rooms[0].faces;

    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].face_type, FaceType::AirBoundary);
}

/// Just under the threshold the face keeps a solid part
#[test]
fn test_hole_under_threshold_keeps_solid_face() {
    let body = wall_body(&[(2, &[(0.0, 0.0), (10.0, 0.0), (10.0, 9.7), (0.0, 9.7)])]);
    let model = read(&document(&[record(GemObjectType::Space, "Room [RM]", &body)]));
    let faces = &model.rooms[0].faces;

    assert!(faces.iter().any(|f| !f.is_air_boundary()));
    assert!(faces
        .iter()
        .filter(|f| f.is_air_boundary())
        .all(|f| f.metadata().hole_import));
}

/// The coverage threshold is taken from the reader configuration
#[test]
fn test_configured_hole_threshold() {
    let body = wall_body(&[(2, &[(0.5, 0.5), (9.5, 0.5), (9.5, 9.5), (0.5, 9.5)])]);
    let text = document(&[record(GemObjectType::Space, "Room [RM]", &body)]);

    let default = read(&text);
    assert_eq!(default.rooms[0].faces.len(), 1);
    assert!(!default.rooms[0].faces[0].is_air_boundary());
    assert_eq!(default.rooms[0].faces[0].geometry.holes().len(), 1);

    let lowered = read_with(
        &text,
        GemReaderConfiguration {
            hole_area_threshold: 0.8,
            ..GemReaderConfiguration::default()
        },
    );
    assert_eq!(lowered.rooms[0].faces.len(), 1);
    assert_eq!(lowered.rooms[0].faces[0].face_type, FaceType::AirBoundary);
}

/// The corner snapping distance scales with the configured snap factor
#[test]
fn test_configured_snap_factor() {
    let body = wall_body(&[(0, &[(0.0, 0.0), (3.0, 0.0), (3.0, 2.0), (0.0, 2.0)])]);
    let text = document(&[record(GemObjectType::Space, "Room [RM]", &body)]);

    let corner = |model: &gem_tools_rs::Model| {
        model.rooms[0].faces[0].apertures[0]
            .geometry
            .boundary()
            .iter()
            .copied()
            .min_by(|a, b| (a.x + a.z).total_cmp(&(b.x + b.z)))
            .unwrap()
    };

    let default = corner(&read(&text));
    assert!(default.x > 0.0 && default.x < 1e-3);
    assert!(default.z > 0.0 && default.z < 1e-3);

    let wide = corner(&read_with(
        &text,
        GemReaderConfiguration {
            snap_factor: 20.0,
            ..GemReaderConfiguration::default()
        },
    ));
    assert!(wide.x > 1.5e-3 && wide.x < 1e-2);
    assert!(wide.z > 1.5e-3 && wide.z < 1e-2);
}

/// A smaller hole stays a hole of the face
#[test]
fn test_partial_hole_is_cut_out() {
    let body = wall_body(&[(2, &[(2.0, 2.0), (7.0, 2.0), (7.0, 7.0), (2.0, 7.0)])]);
    let model = read(&document(&[record(GemObjectType::Space, "Room [RM]", &body)]));
    let faces = &model.rooms[0].faces;

    let solid: Vec<_> = faces.iter().filter(|f| !f.is_air_boundary()).collect();
    assert!(!solid.is_empty());
    assert_eq!(solid[0].geometry.holes().len(), 1);
    assert_relative_eq!(solid[0].geometry.area(), 75.0, epsilon = 1e-6);
}

/// A hole touching the boundary is split off as a tagged air boundary
#[test]
fn test_edge_hole_becomes_tagged_face() {
    let body = wall_body(&[(2, &[(0.0, 0.0), (4.0, 0.0), (4.0, 10.0), (0.0, 10.0)])]);
    let model = read(&document(&[record(GemObjectType::Space, "Room [RM]", &body)]));
    let faces = &model.rooms[0].faces;

    assert_eq!(faces.len(), 2);
    assert!(!faces[0].is_air_boundary());
    assert_relative_eq!(faces[0].geometry.area(), 60.0, epsilon = 1e-6);
    assert!(faces[1].is_air_boundary());
    assert!(faces[1].metadata().hole_import);
}

/// Topography keeps holes natively instead of cutting them
#[test]
fn test_topography_keeps_holes() {
    let body = format!(
        "4 1\n{}\n4 1 2 3 4\n1\n4 2\n{}",
        vertex_block(&[
            (0.0, 0.0, 0.0),
            (10.0, 0.0, 0.0),
            (10.0, 10.0, 0.0),
            (0.0, 10.0, 0.0)
        ]),
        offset_block(&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0)])
    );
    let model = read(&document(&[record(GemObjectType::Topography, "Site [ST]", &body)]));
    let shade = &model.orphaned_shades[0];

    assert_eq!(shade.geometry.holes().len(), 1);
    assert_eq!(shade.metadata().gem_type, Some(SpecialShadeKind::Topography));
    assert!(shade.is_detached);
}

// ===========================================================================
// Shades and context
// ===========================================================================

/// Unknown header tuples read as shades with a single notification
#[test]
fn test_unknown_tuple_reads_as_shade() {
    let body = "3 1\n0 0 0\n1 0 0\n0 1 0\n3 1 2 3\n0";
    let text = document(&[raw_record(7, 7, 7, "IES Mystery [MY]", body)]);
    let model = read(&text);

    assert_eq!(model.orphaned_shades.len(), 1);
    assert_eq!(model.notifications.len(), 1);
    assert!(model.notifications.has_type(NotificationType::NotSupported));
}

/// Unknown PV and tree tuples keep their parametric bodies
#[test]
fn test_unknown_parametric_tuples_read() {
    let text = document(&[
        raw_record(3, 203, 0, "PVP Panel [PN]", "0.0 0.0 3.0 4.0 1.0 180.0 30.0"),
        raw_record(1, 5, 0, "LAN Oak [OK]", "2D Tree 1\n5 5 0 1 1 1 0 0"),
    ]);
    let model = read(&text);

    assert_eq!(model.orphaned_shades.len(), 3);
    assert_eq!(model.orphaned_shades[0].metadata().gem_type, Some(SpecialShadeKind::Pv));
    assert_eq!(model.orphaned_shades[1].metadata().gem_type, Some(SpecialShadeKind::Tree));
    assert_eq!(model.notifications.of_type(NotificationType::NotSupported).len(), 2);
}

/// Shades of one record share the record id as group id
#[test]
fn test_shade_faces_are_grouped() {
    let body = "4 2\n0 0 0\n1 0 0\n1 1 0\n0 1 1\n3 1 2 3\n0\n3 1 3 4\n0";
    let model = read(&document(&[record(GemObjectType::Shade, "Canopy [CN]", body)]));

    assert_eq!(model.orphaned_shades.len(), 2);
    assert_eq!(model.orphaned_shades[0].identifier(), "CN_0");
    assert_eq!(model.orphaned_shades[1].identifier(), "CN_1");
    for shade in &model.orphaned_shades {
        assert_eq!(shade.metadata().group_id.as_deref(), Some("CN"));
        assert!(!shade.is_detached);
    }
}

/// Apertures on a shade are ignored with a notification
#[test]
fn test_shade_aperture_not_supported() {
    let body = wall_body(&[(0, &[(1.0, 1.0), (4.0, 1.0), (4.0, 3.0), (1.0, 3.0)])]);
    let model = read(&document(&[record(GemObjectType::Shade, "Fin [FN]", &body)]));

    assert_eq!(model.orphaned_shades.len(), 1);
    assert!(model.notifications.has_type(NotificationType::NotSupported));
}

/// Translucent shades drop their openings and keep the boundary
#[test]
fn test_translucent_shade() {
    let body = format!(
        "4 1\n{}\n4 1 2 3 4\n1\n4 0\n{}",
        vertex_block(&[
            (0.0, 0.0, 3.0),
            (5.0, 0.0, 3.0),
            (5.0, 5.0, 3.0),
            (0.0, 5.0, 3.0)
        ]),
        vertex_block(&[
            (0.0, 0.0, 3.0),
            (5.0, 0.0, 3.0),
            (5.0, 5.0, 3.0),
            (0.0, 5.0, 3.0)
        ])
    );
    let model = read(&document(&[record(GemObjectType::TranslucentShade, "Glass Roof [GR]", &body)]));
    let shade = &model.orphaned_shades[0];

    assert_eq!(shade.metadata().gem_type, Some(SpecialShadeKind::TranslucentShade));
    assert!(!shade.geometry.has_holes());
    assert!(model.notifications.is_empty());
}

/// Context buildings of small planar faces become one mesh
#[test]
fn test_context_building_reads_as_mesh() {
    let model = read(&document(&[record(GemObjectType::ContextBuilding, "Block [BK]", &box_body())]));

    assert!(model.orphaned_shades.is_empty());
    assert_eq!(model.shade_meshes.len(), 1);
    let mesh = &model.shade_meshes[0];
    assert_eq!(mesh.vertices.len(), 8);
    assert_eq!(mesh.faces.len(), 6);
    assert_eq!(mesh.faces[0], vec![0, 3, 2, 1]);
    assert!(mesh.is_detached);
}

/// A face with more than four vertices forces the shade path
#[test]
fn test_context_building_with_large_face_reads_as_shades() {
    let body = format!(
        "6 2\n{}\n5 1 2 3 4 5\n0\n3 1 2 6\n0",
        vertex_block(&[
            (0.0, 0.0, 0.0),
            (2.0, 0.0, 0.0),
            (3.0, 1.0, 0.0),
            (1.0, 2.0, 0.0),
            (-1.0, 1.0, 0.0),
            (0.0, 0.0, 1.0)
        ])
    );
    let model = read(&document(&[record(GemObjectType::ContextBuilding, "Block [BK]", &body)]));

    assert!(model.shade_meshes.is_empty());
    assert_eq!(model.orphaned_shades.len(), 2);
    assert!(model.orphaned_shades.iter().all(|s| s.is_detached));
}

// ===========================================================================
// Parametric records
// ===========================================================================

/// A PV record is a width x height rectangle from its corner
#[test]
fn test_read_pv_panel() {
    let text = document(&[record(
        GemObjectType::Pv,
        "PV Panel",
        "0.0315 -25.9269 8.54 4.0 1.0 225.0 120.0",
    )]);
    let model = read(&text);
    let shade = &model.orphaned_shades[0];
    let b = shade.geometry.boundary();

    assert_eq!(shade.metadata().gem_type, Some(SpecialShadeKind::Pv));
    assert_relative_eq!(b[0].x, 0.0315, epsilon = 1e-12);
    assert_relative_eq!(b[0].z, 8.54, epsilon = 1e-12);
    assert_relative_eq!((b[1] - b[0]).length(), 4.0, epsilon = 1e-9);
    assert_relative_eq!((b[3] - b[0]).length(), 1.0, epsilon = 1e-9);
    assert_relative_eq!(shade.geometry.area(), 4.0, epsilon = 1e-9);
}

/// Trees read as two crossing billboards; the side one is display only
#[test]
fn test_read_tree() {
    let text = document(&[record(
        GemObjectType::Tree,
        "Tree [OAK]",
        "2D Tree 2\n0.0 0.0 0.0 1.0 1.0 1.0 0.0 0.0",
    )]);
    let model = read(&text);
    let shades = &model.orphaned_shades;

    assert_eq!(shades.len(), 2);
    assert_eq!(shades[0].identifier(), "OAK_0");
    assert!(shades[0].metadata().import_only);
    assert!(!shades[1].metadata().import_only);
    assert_eq!(shades[1].metadata().tree_type, Some(2));
    assert_relative_eq!(shades[1].geometry.area(), 3.0 * 8.0, epsilon = 1e-9);
    assert_relative_eq!(shades[1].geometry.max_z(), 8.0, epsilon = 1e-9);
}

// ===========================================================================
// Failures
// ===========================================================================

#[test]
fn test_missing_keyword_is_fatal() {
    let text = document(&[raw_record(1, 4, 0, "XYZ Shade", "3 1\n0 0 0\n1 0 0\n0 1 0\n3 1 2 3\n0")]);
    let err = gem_tools_rs::model_from_gem_str(&text, "Test").unwrap_err();
    assert!(matches!(err, GemError::MissingKeyword(_)));
}

#[test]
fn test_bad_number_is_fatal_and_carries_segment() {
    let text = document(&[record(
        GemObjectType::Shade,
        "Fin [FN]",
        "3 1\n0 0 0\n1 zero 0\n0 1 0\n3 1 2 3\n0",
    )]);
    let err = gem_tools_rs::model_from_gem_str(&text, "Test").unwrap_err();
    assert!(matches!(err, GemError::Parse { .. }));
    assert!(err.to_string().contains("IES Fin [FN]"));
}

/// Counts larger than the record are parse errors, not allocations
#[test]
fn test_oversized_count_is_fatal() {
    let text = document(&[record(GemObjectType::Shade, "Fin [FN]", "1000000000000 1")]);
    let err = gem_tools_rs::model_from_gem_str(&text, "Test").unwrap_err();
    assert!(matches!(err, GemError::Parse { .. }));
    assert!(err.to_string().contains("IES Fin [FN]"));
}

#[test]
fn test_unsupported_opening_type_is_fatal() {
    let body = wall_body(&[(5, &[(1.0, 1.0), (4.0, 1.0), (4.0, 3.0)])]);
    let text = document(&[record(GemObjectType::Space, "Room [RM]", &body)]);
    let err = gem_tools_rs::model_from_gem_str(&text, "Test").unwrap_err();
    assert!(matches!(
        err,
        GemError::UnsupportedOpeningType { opening_type: 5, .. }
    ));
}

#[test]
fn test_unsupported_tree_is_fatal() {
    let text = document(&[record(
        GemObjectType::Tree,
        "Tree",
        "3D Tree 1\n0 0 0 1 1 1 0 0",
    )]);
    let err = gem_tools_rs::model_from_gem_str(&text, "Test").unwrap_err();
    assert!(matches!(err, GemError::UnsupportedTreeType { .. }));
}

#[test]
fn test_malformed_identifier_is_fatal() {
    let text = document(&[record(GemObjectType::Space, "Room [bad id]", &box_body())]);
    let err = gem_tools_rs::model_from_gem_str(&text, "Test").unwrap_err();
    assert!(matches!(err, GemError::MalformedIdentifier(_)));
}

// ===========================================================================
// Input handling
// ===========================================================================

/// Non UTF-8 input is decoded as Windows-1252
#[test]
fn test_windows_1252_names() {
    let text = document(&[record(GemObjectType::Space, "Caf\u{e9} [CF]", &box_body())]);
    let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(&text);
    assert!(std::str::from_utf8(&bytes).is_err());

    let model = model_from_gem_bytes(&bytes, "Test").unwrap();
    assert_eq!(model.rooms[0].display_name(), "Caf\u{e9}");
}

/// The parallel path produces the same model as the sequential one
#[test]
fn test_parallel_read_matches_sequential() {
    let text = document(&[
        record(GemObjectType::Space, "Room [A]", &box_body()),
        record(GemObjectType::ContextBuilding, "Block [B]", &box_body()),
        record(GemObjectType::Tree, "Tree [T]", "2D Tree 1\n5 5 0 1 1 1 30 0"),
        record(GemObjectType::Space, "Room [C]", &wall_body(&[])),
    ]);
    let sequential = read(&text);
    let parallel = read_parallel(&text);

    assert_eq!(sequential.rooms, parallel.rooms);
    assert_eq!(sequential.orphaned_shades, parallel.orphaned_shades);
    assert_eq!(sequential.shade_meshes, parallel.shade_meshes);
}

/// Reading from disk names the model after the file
#[test]
fn test_read_file_uses_stem_as_name() {
    let path = test_output_path("reading_stem_test.gem");
    std::fs::write(&path, document(&[record(GemObjectType::Space, "Room", &box_body())])).unwrap();

    let model = gem_tools_rs::model_from_gem_file(&path).unwrap();
    assert_eq!(model.display_name(), "reading_stem_test");
    assert_eq!(model.room_count(), 1);
}
