//! GEM writer module

mod room_writer;
mod shade_writer;
mod text_writer;

pub use room_writer::write_room;
pub use shade_writer::{
    encode_pv, encode_tree, plan_shades, shade_object_type, write_shade_job, ShadeJob,
    DEFAULT_TREE_TYPE,
};
pub use text_writer::{offset_line, record_header, vertex_line};

use crate::document::Model;
use crate::entities::{ModelObject, Room};
use crate::error::Result;
use crate::io::gem::identifier::{IdentifierMap, IdentifierMapper};
use crate::notification::NotificationCollection;
use crate::types::Units;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The two lines opening every written document
pub const GEM_HEADER: [&str; 2] = ["COM GEM data file exported by Pollination Rhino", "ANT"];

/// Configuration for the GEM writer.
#[derive(Debug, Clone)]
pub struct GemWriterConfiguration {
    /// Thickness ungrouped generic shades are extruded to; `0.0` writes flat shades
    pub shade_thickness: f64,
    pub header: [&'static str; 2],
    /// Vertex merging tolerance; defaults to the model tolerance
    pub tolerance: Option<f64>,
    /// Encode records on the rayon thread pool. Output order is unchanged.
    pub parallel: bool,
}

impl Default for GemWriterConfiguration {
    fn default() -> Self {
        Self {
            shade_thickness: 0.0,
            header: GEM_HEADER,
            tolerance: None,
            parallel: false,
        }
    }
}

/// Result of a write: the document text and its side outputs
#[derive(Debug, Clone)]
pub struct GemOutput {
    pub text: String,
    /// Old room identifier to written identifier
    pub identifier_map: IdentifierMap,
    pub notifications: NotificationCollection,
}

/// One record to encode
enum RecordJob {
    Room(Room),
    Shade(ShadeJob),
}

/// GEM file writer
pub struct GemWriter {
    model: Model,
    config: GemWriterConfiguration,
}

impl GemWriter {
    /// Create a writer over a model. The model is never modified.
    pub fn new(model: Model) -> Self {
        Self {
            model,
            config: GemWriterConfiguration::default(),
        }
    }

    /// Set the writer configuration.
    pub fn with_configuration(mut self, config: GemWriterConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Get a reference to the model
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Rename rooms and decide which records to write, in output order
    fn plan(&self, model: Model, mapper: &mut IdentifierMapper) -> Vec<RecordJob> {
        let mut jobs = Vec::new();
        for mut room in model.rooms {
            let identifier = mapper.remap_room(room.identifier(), room.display_name());
            let room_shades: Vec<_> = room.all_shades().into_iter().cloned().collect();
            room.set_identifier(identifier);
            jobs.push(RecordJob::Room(room));
            jobs.extend(
                plan_shades(room_shades, Vec::new(), mapper)
                    .into_iter()
                    .map(RecordJob::Shade),
            );
        }
        jobs.extend(
            plan_shades(model.orphaned_shades, model.shade_meshes, mapper)
                .into_iter()
                .map(RecordJob::Shade),
        );
        jobs
    }

    fn render(
        &self,
        job: &RecordJob,
        tolerance: f64,
    ) -> Result<(Option<String>, NotificationCollection)> {
        let mut notifications = NotificationCollection::new();
        let text = match job {
            RecordJob::Room(room) => write_room(room, tolerance, &mut notifications)?,
            RecordJob::Shade(job) => write_shade_job(
                job,
                self.config.shade_thickness,
                tolerance,
                &mut notifications,
            )?,
        };
        Ok((text, notifications))
    }

    /// Encode the model
    pub fn write(&self) -> Result<GemOutput> {
        let mut model = self.model.duplicate();
        model.convert_to_units(Units::Meters);
        let tolerance = self.config.tolerance.unwrap_or(model.tolerance);

        let mut mapper = IdentifierMapper::new();
        let jobs = self.plan(model, &mut mapper);
        tracing::debug!(records = jobs.len(), "writing GEM document");

        let rendered: Vec<(Option<String>, NotificationCollection)> = if self.config.parallel {
            jobs.par_iter()
                .map(|job| self.render(job, tolerance))
                .collect::<Result<Vec<_>>>()?
        } else {
            jobs.iter()
                .map(|job| self.render(job, tolerance))
                .collect::<Result<Vec<_>>>()?
        };

        let mut notifications = NotificationCollection::new();
        let mut records = Vec::with_capacity(rendered.len());
        for (record, local) in rendered {
            notifications.extend(local);
            records.extend(record);
        }

        let mut text = format!("{}\n{}\n", self.config.header[0], self.config.header[1]);
        if !records.is_empty() {
            text.push_str(&records.join("\n"));
            text.push('\n');
        }

        Ok(GemOutput {
            text,
            identifier_map: mapper.into_map(),
            notifications,
        })
    }

    /// Write to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<GemOutput> {
        let file = File::create(path)?;
        self.write_to_writer(BufWriter::new(file))
    }

    /// Write to any writer
    pub fn write_to_writer<W: Write>(&self, mut writer: W) -> Result<GemOutput> {
        let output = self.write()?;
        writer.write_all(output.text.as_bytes())?;
        writer.flush()?;
        Ok(output)
    }

    /// Write to a byte vector (useful for testing)
    pub fn write_to_vec(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to_writer(&mut buffer)?;
        Ok(buffer)
    }
}
