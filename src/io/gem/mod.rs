//! GEM reading and writing
//!
//! GEM is the line-oriented geometry exchange format of the IES VE
//! simulation tool. A document is a two-line header followed by records,
//! each opening with a `LAYER` line:
//!
//! ```text
//! LAYER
//! 1
//! COLOUR
//! 0
//! CATEGORY
//! 1
//! TYPE
//! 1
//! SUBTYPE
//! 2001
//! COLOURRGB
//! 16711680
//! IES Room [RM000000]
//! <vertex count> <face count>
//! <vertices>
//! <faces with their openings>
//! ```
//!
//! [`GemReader`] turns a document into a [`Model`]; [`GemWriter`] turns a
//! model into a document plus the map of renamed room identifiers.

pub mod identifier;
pub mod object_type;
pub mod opening;
mod reader;
mod writer;

pub use identifier::{IdentifierMap, IdentifierMapper};
pub use object_type::{GemHeader, GemKeyword, GemObjectType};
pub use opening::{encode_opening, OpeningDecoder, OpeningFrame, OpeningKind};
pub use reader::{
    decode_segment, decode_text, parse_polyface_body, resolve_holes, split_segments, FaceRecord,
    GemReader, GemReaderConfiguration, GemSegment, HoleResolution, OpeningRecord, ParsedObject,
    PolyfaceBody, HOLE_AREA_THRESHOLD, SNAP_FACTOR, TREE_SCALE,
};
pub use writer::{
    encode_pv, encode_tree, plan_shades, shade_object_type, write_room, write_shade_job,
    GemOutput, GemWriter, GemWriterConfiguration, ShadeJob, DEFAULT_TREE_TYPE, GEM_HEADER,
};

use crate::document::Model;
use crate::error::Result;
use std::path::Path;

/// Parse GEM text into a model named `name`
pub fn model_from_gem_str(text: &str, name: &str) -> Result<Model> {
    GemReader::from_text(text, name).read()
}

/// Parse GEM bytes (UTF-8 or Windows-1252)
pub fn model_from_gem_bytes(bytes: &[u8], name: &str) -> Result<Model> {
    GemReader::from_bytes(bytes, name).read()
}

/// Parse a GEM file; the model is named after the file stem
pub fn model_from_gem_file<P: AsRef<Path>>(path: P) -> Result<Model> {
    GemReader::from_file(path)?.read()
}

/// Encode a model as GEM text. The model is left untouched.
pub fn model_to_gem(model: &Model, shade_thickness: f64) -> Result<GemOutput> {
    GemWriter::new(model.duplicate())
        .with_configuration(GemWriterConfiguration {
            shade_thickness,
            ..GemWriterConfiguration::default()
        })
        .write()
}

/// Encode a model and write it to `path`
pub fn model_to_gem_file<P: AsRef<Path>>(
    model: &Model,
    shade_thickness: f64,
    path: P,
) -> Result<GemOutput> {
    GemWriter::new(model.duplicate())
        .with_configuration(GemWriterConfiguration {
            shade_thickness,
            ..GemWriterConfiguration::default()
        })
        .write_to_file(path)
}
