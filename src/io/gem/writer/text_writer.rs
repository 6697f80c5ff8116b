//! GEM record text

use crate::io::gem::identifier::collapse_whitespace;
use crate::io::gem::object_type::GemObjectType;
use crate::io::gem::opening::{encode_opening, OpeningKind};
use crate::types::{Face3D, Vector2, Vector3};

/// `-0.0` prints as `0.0`
fn unsigned_zero(value: f64) -> f64 {
    value + 0.0
}

/// `   x    y    z` with six decimals
pub fn vertex_line(v: &Vector3) -> String {
    format!(
        "   {:.6}    {:.6}    {:.6}",
        unsigned_zero(v.x),
        unsigned_zero(v.y),
        unsigned_zero(v.z)
    )
}

/// `   x    y` with six decimals
pub fn offset_line(v: &Vector2) -> String {
    format!("   {:.6}    {:.6}", unsigned_zero(v.x), unsigned_zero(v.y))
}

pub fn vertex_lines(vertices: &[Vector3]) -> String {
    vertices.iter().map(vertex_line).collect::<Vec<_>>().join("\n")
}

/// Round to `digits` decimals
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

/// Shortest representation that reads back to the same value (`4.0`, `0.0315`)
pub fn short_number(value: f64) -> String {
    format!("{:?}", unsigned_zero(value))
}

/// The fixed header lines plus the keyword line of a record
pub fn record_header(object_type: GemObjectType, display_name: &str, identifier: &str) -> String {
    let h = object_type.header();
    format!(
        "LAYER\n{}\nCOLOUR\n{}\nCATEGORY\n{}\nTYPE\n{}\nSUBTYPE\n{}\nCOLOURRGB\n{}\n{} {} [{}]",
        h.layer,
        h.colour,
        h.category,
        h.object_type,
        h.subtype,
        h.colour_rgb,
        h.keyword,
        collapse_whitespace(display_name),
        identifier
    )
}

/// One opening loop of a face, in 3D
#[derive(Debug, Clone)]
pub struct OpeningLoop {
    pub kind: OpeningKind,
    pub points: Vec<Vector3>,
}

impl OpeningLoop {
    pub fn new(kind: OpeningKind, points: Vec<Vector3>) -> Self {
        Self { kind, points }
    }
}

fn index_line(indices: &[usize]) -> String {
    let mut line = indices.len().to_string();
    for i in indices {
        line.push(' ');
        line.push_str(&(i + 1).to_string());
    }
    line
}

/// Face line, opening count and every opening.
///
/// Offsets are measured in the face as rebuilt from the shared vertex list,
/// the same face a reader reconstructs.
pub fn face_block(indices: &[usize], vertices: &[Vector3], openings: &[OpeningLoop]) -> String {
    let mut block = format!("{}\n{}", index_line(indices), openings.len());
    if openings.is_empty() {
        return block;
    }
    let parent = Face3D::new(indices.iter().map(|&i| vertices[i]).collect());
    for opening in openings {
        let offsets = encode_opening(&parent, &opening.points);
        block.push_str(&format!("\n{} {}\n", offsets.len(), opening.kind.code()));
        block.push_str(
            &offsets
                .iter()
                .map(offset_line)
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }
    block
}

/// Face line followed by the trivial opening translucent shades carry
pub fn translucent_face_block(indices: &[usize], vertices: &[Vector3]) -> String {
    let points: Vec<Vector3> = indices.iter().map(|&i| vertices[i]).collect();
    format!(
        "{}\n1\n{} 0\n{}",
        index_line(indices),
        points.len(),
        vertex_lines(&points)
    )
}

/// Full polyface record
pub fn polyface_record(
    object_type: GemObjectType,
    display_name: &str,
    identifier: &str,
    vertices: &[Vector3],
    face_blocks: &[String],
) -> String {
    format!(
        "{}\n{} {}\n{}\n{}",
        record_header(object_type, display_name, identifier),
        vertices.len(),
        face_blocks.len(),
        vertex_lines(vertices),
        face_blocks.join("\n")
    )
}
