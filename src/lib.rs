//! # gem-tools-rs
//!
//! A pure Rust library for translating building geometry to and from the
//! GEM format used by the IES VE simulation tool.
//!
//! GEM stores rooms, shades, context buildings, terrain, trees and PV panels
//! as line-oriented text records. This crate reads those records into a
//! small building model and writes models back, including the parts of the
//! format that need real geometry work: opening placement relative to a
//! face corner, holes and air boundaries, shade grouping into closed
//! volumes and the parametric encodings of trees and PV panels.
//!
//! ## Features
//!
//! - Read GEM text, bytes or files into a [`Model`]
//! - Write a [`Model`] to GEM text with room identifier remapping
//! - Holes covering a face become air boundaries; partial holes are cut out
//!   with a coplanar boolean difference
//! - Shade thickness extrusion and merging of grouped shades
//! - Optional parallel reading and writing with `rayon`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gem_tools_rs::io::gem::{model_from_gem_file, model_to_gem};
//!
//! // Read a GEM file
//! let model = model_from_gem_file("building.gem")?;
//!
//! for room in &model.rooms {
//!     println!("Room: {} ({} faces)", room.display_name(), room.faces.len());
//! }
//!
//! // Write it back with 10 cm thick shades
//! let output = model_to_gem(&model, 0.1)?;
//! std::fs::write("building_out.gem", &output.text)?;
//! println!("{}", output.identifier_map.to_json()?);
//! # Ok::<(), gem_tools_rs::error::GemError>(())
//! ```
//!
//! ## Architecture
//!
//! - `types` - Vectors, planes, polygons and planar faces
//! - `geometry` - Boolean difference, snapping, offsetting, polyfaces
//! - `entities` - Rooms, faces, apertures, doors, shades and meshes behind
//!   the `ModelObject` trait
//! - `Model` - Central document structure
//! - `io::gem` - Object type registry, identifier handling, opening
//!   transform, reader and writer
//!
//! Non-fatal problems found while reading or writing are collected in a
//! [`NotificationCollection`] and also emitted as `tracing` events.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod document;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod io;
pub mod notification;
pub mod types;

// Re-export commonly used types
pub use error::{GemError, Result};
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use types::{BoundingBox2D, BoundingBox3D, Face3D, Plane, Polygon2D, Units, Vector2, Vector3};

// Re-export entity types
pub use entities::{
    Aperture, BoundaryCondition, Door, Face, FaceType, GemMetadata, ModelObject, Room, Shade,
    ShadeMesh, SpecialShadeKind,
};

// Re-export document
pub use document::Model;

// Re-export I/O types
pub use io::gem::{
    model_from_gem_bytes, model_from_gem_file, model_from_gem_str, model_to_gem,
    model_to_gem_file, GemOutput, GemReader, GemWriter,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
