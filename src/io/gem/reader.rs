//! GEM file reader

mod body;
mod faces;
mod segment;
mod special;
mod tokens;

pub use body::{parse_polyface_body, FaceRecord, OpeningRecord, PolyfaceBody};
pub use faces::{resolve_holes, HoleResolution};
pub use segment::{split_segments, GemSegment};
pub use special::TREE_SCALE;

use crate::document::{Model, DEFAULT_TOLERANCE};
use crate::entities::{Room, Shade, ShadeMesh};
use crate::error::Result;
use crate::io::gem::identifier::{clean_string, IdentifierDeduplicator};
use crate::io::gem::object_type::GemObjectType;
use crate::notification::NotificationCollection;
use crate::types::Units;
use rayon::prelude::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Holes covering at least this share of their face turn it into a void
pub const HOLE_AREA_THRESHOLD: f64 = 0.98;

/// Opening and hole snapping distance, as a multiple of the model tolerance
pub const SNAP_FACTOR: f64 = 5.0;

/// Configuration for the GEM reader.
#[derive(Debug, Clone)]
pub struct GemReaderConfiguration {
    /// Tolerance of the produced model (meters)
    ///
    /// Default: `1e-4`.
    pub tolerance: f64,
    /// Decode records on the rayon thread pool. Output order is unchanged.
    ///
    /// Default: `false`.
    pub parallel: bool,
    /// Default: [`HOLE_AREA_THRESHOLD`].
    pub hole_area_threshold: f64,
    /// Default: [`SNAP_FACTOR`].
    pub snap_factor: f64,
}

impl GemReaderConfiguration {
    /// Distance within which openings and holes are snapped to their parent
    pub fn snap_tolerance(&self) -> f64 {
        self.tolerance * self.snap_factor
    }
}

impl Default for GemReaderConfiguration {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            parallel: false,
            hole_area_threshold: HOLE_AREA_THRESHOLD,
            snap_factor: SNAP_FACTOR,
        }
    }
}

/// What one record decodes to
#[derive(Debug, Clone)]
pub enum ParsedObject {
    Room(Room),
    Shades(Vec<Shade>),
    Mesh(ShadeMesh),
}

/// Decode text from a file: UTF-8, falling back to Windows-1252
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            tracing::debug!("GEM input is not UTF-8, decoded as Windows-1252");
            text.into_owned()
        }
    }
}

/// Decode the body of one record
pub fn decode_segment(
    segment: &GemSegment,
    config: &GemReaderConfiguration,
) -> Result<(ParsedObject, NotificationCollection)> {
    let mut notifications = NotificationCollection::new();
    let object = match segment.object_type {
        GemObjectType::Pv => ParsedObject::Shades(vec![special::read_pv(segment)?]),
        GemObjectType::Tree => ParsedObject::Shades(special::read_tree(segment)?),
        GemObjectType::Space | GemObjectType::UnconditionedSpace => {
            let body = parse_polyface_body(segment)?;
            ParsedObject::Room(faces::read_room(segment, &body, config, &mut notifications))
        }
        GemObjectType::ContextBuilding => {
            let body = parse_polyface_body(segment)?;
            match faces::try_mesh_parse(segment, &body) {
                Some(mesh) => ParsedObject::Mesh(mesh),
                None => ParsedObject::Shades(faces::parse_generic_faces(
                    segment,
                    &body,
                    config,
                    &mut notifications,
                )),
            }
        }
        GemObjectType::TranslucentShade
        | GemObjectType::Shade
        | GemObjectType::Shade2
        | GemObjectType::Topography => {
            let body = parse_polyface_body(segment)?;
            ParsedObject::Shades(faces::parse_generic_faces(
                segment,
                &body,
                config,
                &mut notifications,
            ))
        }
    };
    Ok((object, notifications))
}

/// GEM file reader
pub struct GemReader {
    text: String,
    name: String,
    config: GemReaderConfiguration,
}

impl GemReader {
    /// Reader over GEM text; `name` becomes the model name
    pub fn from_text(text: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            name: name.into(),
            config: GemReaderConfiguration::default(),
        }
    }

    /// Reader over raw bytes (UTF-8 or Windows-1252)
    pub fn from_bytes(bytes: &[u8], name: impl Into<String>) -> Self {
        Self::from_text(decode_text(bytes), name)
    }

    /// Reader over any stream
    pub fn from_reader<R: Read>(mut reader: R, name: impl Into<String>) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from_bytes(&bytes, name))
    }

    /// Reader over a file; the model is named after the file stem
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Model".to_string());
        let file = File::open(path)?;
        Self::from_reader(file, name)
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: GemReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Read the document into a model
    pub fn read(self) -> Result<Model> {
        let mut notifications = NotificationCollection::new();
        let mut deduplicator = IdentifierDeduplicator::new();

        let mut segments = Vec::new();
        for raw in split_segments(&self.text) {
            let mut segment = GemSegment::parse(raw, &mut notifications)?;
            segment.identifier = deduplicator.unique(&segment.identifier);
            segments.push(segment);
        }
        tracing::debug!(records = segments.len(), name = %self.name, "reading GEM document");

        let config = &self.config;
        let decoded: Vec<(ParsedObject, NotificationCollection)> = if config.parallel {
            segments
                .par_iter()
                .map(|s| decode_segment(s, config))
                .collect::<Result<Vec<_>>>()?
        } else {
            segments
                .iter()
                .map(|s| decode_segment(s, config))
                .collect::<Result<Vec<_>>>()?
        };

        let mut model = Model::new(clean_string(&self.name))
            .with_display_name(self.name.clone())
            .with_units(Units::Meters)
            .with_tolerance(config.tolerance);
        for (object, local) in decoded {
            notifications.extend(local);
            match object {
                ParsedObject::Room(room) => model.add_room(room),
                ParsedObject::Shades(shades) => {
                    for shade in shades {
                        model.add_shade(shade);
                    }
                }
                ParsedObject::Mesh(mesh) => model.add_shade_mesh(mesh),
            }
        }
        model.notifications = notifications;
        Ok(model)
    }
}
