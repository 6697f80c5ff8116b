//! Vertex/face bodies of polyface records

use super::segment::GemSegment;
use super::tokens::LineCursor;
use crate::error::{GemError, Result};
use crate::io::gem::opening::OpeningKind;
use crate::types::{Vector2, Vector3};

/// One opening as stored in the file: kind plus 2D offsets
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningRecord {
    pub kind: OpeningKind,
    pub offsets: Vec<Vector2>,
}

/// One face: 0-based vertex indices and its openings
#[derive(Debug, Clone, PartialEq)]
pub struct FaceRecord {
    pub indices: Vec<usize>,
    pub openings: Vec<OpeningRecord>,
}

impl FaceRecord {
    pub fn boundary(&self, vertices: &[Vector3]) -> Vec<Vector3> {
        self.indices.iter().map(|&i| vertices[i]).collect()
    }
}

/// Decoded body of a polyface record
#[derive(Debug, Clone, PartialEq)]
pub struct PolyfaceBody {
    pub vertices: Vec<Vector3>,
    pub faces: Vec<FaceRecord>,
}

impl PolyfaceBody {
    pub fn has_openings(&self) -> bool {
        self.faces.iter().any(|f| !f.openings.is_empty())
    }
}

/// Parse `vc fc`, the vertex lines, then every face with its openings
pub fn parse_polyface_body(segment: &GemSegment) -> Result<PolyfaceBody> {
    let mut cursor = LineCursor::new(&segment.body, &segment.raw);
    let counts = cursor.next_integers_exact(2)?;
    let (vertex_count, face_count) = match (usize::try_from(counts[0]), usize::try_from(counts[1])) {
        (Ok(v), Ok(f)) => (v, f),
        _ => return Err(cursor.error("negative vertex or face count")),
    };

    let mut vertices = Vec::with_capacity(vertex_count.min(cursor.remaining()));
    for _ in 0..vertex_count {
        let values = cursor.next_floats()?;
        if values.len() != 3 {
            return Err(cursor.error(format!("vertex needs 3 coordinates, found {}", values.len())));
        }
        vertices.push(Vector3::new(values[0], values[1], values[2]));
    }

    let mut faces = Vec::with_capacity(face_count.min(cursor.remaining()));
    for face_number in 0..face_count {
        let values = cursor.next_integers()?;
        let (count, indices) = match values.split_first() {
            Some((count, indices)) => (*count, indices),
            None => return Err(cursor.error("empty face line")),
        };
        if count < 0 || count as usize != indices.len() {
            return Err(cursor.error(format!(
                "face {} declares {} vertices but lists {}",
                face_number + 1,
                count,
                indices.len()
            )));
        }
        let indices = indices
            .iter()
            .map(|&i| {
                if i >= 1 && (i as usize) <= vertex_count {
                    Ok(i as usize - 1)
                } else {
                    Err(cursor.error(format!(
                        "face {} references vertex {} of {}",
                        face_number + 1,
                        i,
                        vertex_count
                    )))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let opening_count = cursor.next_count()?;
        let mut openings = Vec::with_capacity(opening_count.min(cursor.remaining()));
        for _ in 0..opening_count {
            openings.push(parse_opening(&mut cursor)?);
        }
        faces.push(FaceRecord { indices, openings });
    }

    Ok(PolyfaceBody { vertices, faces })
}

/// `cnt type` followed by `cnt` offset lines
fn parse_opening(cursor: &mut LineCursor<'_>) -> Result<OpeningRecord> {
    let header = cursor.next_integers_exact(2)?;
    let count = usize::try_from(header[0])
        .map_err(|_| cursor.error(format!("negative opening vertex count {}", header[0])))?;
    let kind = OpeningKind::from_code(header[1]).ok_or_else(|| GemError::UnsupportedOpeningType {
        opening_type: header[1],
        segment: cursor.segment().to_string(),
    })?;

    let mut offsets = Vec::with_capacity(count.min(cursor.remaining()));
    for _ in 0..count {
        let values = cursor.next_floats()?;
        if values.len() < 2 || values.len() > 3 {
            return Err(cursor.error(format!(
                "opening vertex needs 2 coordinates, found {}",
                values.len()
            )));
        }
        offsets.push(Vector2::new(values[0], values[1]));
    }
    Ok(OpeningRecord { kind, offsets })
}
