//! I/O module for reading and writing building geometry in GEM format

pub mod gem;

pub use gem::{GemOutput, GemReader, GemReaderConfiguration, GemWriter, GemWriterConfiguration};
