//! Shared test utilities for gem-tools-rs integration tests.
//!
//! Helpers for building raw GEM records and documents, reading them and
//! running write/read roundtrips. All test crates import this via
//! `mod common;`.

#![allow(dead_code)]

pub mod builders;

use gem_tools_rs::io::gem::{GemObjectType, GemReader, GemReaderConfiguration};
use gem_tools_rs::{model_from_gem_str, model_to_gem, Model};
use std::path::PathBuf;

// ===========================================================================
// Raw GEM text
// ===========================================================================

/// Header lines plus name line of a record of `object_type`
pub fn record_start(object_type: GemObjectType, name: &str) -> String {
    let h = object_type.header();
    format!(
        "LAYER\n{}\nCOLOUR\n{}\nCATEGORY\n{}\nTYPE\n{}\nSUBTYPE\n{}\nCOLOURRGB\n{}\n{} {}",
        h.layer, h.colour, h.category, h.object_type, h.subtype, h.colour_rgb, h.keyword, name
    )
}

/// Full record: header, name line and body
pub fn record(object_type: GemObjectType, name: &str, body: &str) -> String {
    format!("{}\n{}", record_start(object_type, name), body)
}

/// Record with an arbitrary header tuple
pub fn raw_record(category: i64, object_type: i64, subtype: i64, name_line: &str, body: &str) -> String {
    format!(
        "LAYER\n1\nCOLOUR\n0\nCATEGORY\n{}\nTYPE\n{}\nSUBTYPE\n{}\nCOLOURRGB\n0\n{}\n{}",
        category, object_type, subtype, name_line, body
    )
}

/// Document with the standard two-line header
pub fn document(records: &[String]) -> String {
    format!(
        "COM GEM data file exported by Pollination Rhino\nANT\n{}\n",
        records.join("\n")
    )
}

/// `   x    y    z` lines
pub fn vertex_block(vertices: &[(f64, f64, f64)]) -> String {
    vertices
        .iter()
        .map(|(x, y, z)| format!("   {:.6}    {:.6}    {:.6}", x, y, z))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `   x    y` lines
pub fn offset_block(offsets: &[(f64, f64)]) -> String {
    offsets
        .iter()
        .map(|(x, y)| format!("   {:.6}    {:.6}", x, y))
        .collect::<Vec<_>>()
        .join("\n")
}

// ===========================================================================
// Read / write helpers
// ===========================================================================

/// Read GEM text, panicking on failure
pub fn read(text: &str) -> Model {
    model_from_gem_str(text, "Test").expect("GEM text should parse")
}

/// Read with the rayon path enabled
pub fn read_parallel(text: &str) -> Model {
    GemReader::from_text(text, "Test")
        .with_configuration(GemReaderConfiguration {
            parallel: true,
            ..GemReaderConfiguration::default()
        })
        .read()
        .expect("GEM text should parse")
}

/// Read with a custom reader configuration
pub fn read_with(text: &str, config: GemReaderConfiguration) -> Model {
    GemReader::from_text(text, "Test")
        .with_configuration(config)
        .read()
        .expect("GEM text should parse")
}

/// Write a model with flat shades, panicking on failure
pub fn write(model: &Model) -> String {
    model_to_gem(model, 0.0).expect("model should encode").text
}

/// Write then read back
pub fn roundtrip(model: &Model) -> Model {
    read(&write(model))
}

/// Lines following the record whose name line contains `marker`
pub fn record_lines<'a>(text: &'a str, marker: &str) -> Vec<&'a str> {
    let lines: Vec<&str> = text.lines().collect();
    match lines.iter().position(|l| l.contains(marker)) {
        Some(i) => lines[i + 1..]
            .iter()
            .take_while(|l| **l != "LAYER")
            .copied()
            .collect(),
        None => Vec::new(),
    }
}

// ===========================================================================
// Output paths
// ===========================================================================

/// Path in a per-test temporary directory, creating it if needed
pub fn test_output_path(filename: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("gem_tools_rs_tests");
    let _ = std::fs::create_dir_all(&dir);
    dir.join(filename)
}
