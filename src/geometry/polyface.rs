//! Indexed face sets: shared vertex lists, closed volumes and extrusion

use crate::error::{GemError, Result};
use crate::types::{Face3D, Vector3};
use ahash::AHashMap;

type CellKey = (i64, i64, i64);

/// Tolerance-aware vertex deduplication backed by a uniform hash grid
#[derive(Debug, Clone)]
pub struct VertexIndex {
    tolerance: f64,
    cell: f64,
    vertices: Vec<Vector3>,
    grid: AHashMap<CellKey, Vec<usize>>,
}

impl VertexIndex {
    pub fn new(tolerance: f64) -> Self {
        let tolerance = tolerance.max(f64::EPSILON);
        Self {
            tolerance,
            cell: tolerance * 2.0,
            vertices: Vec::new(),
            grid: AHashMap::new(),
        }
    }

    fn key(&self, point: &Vector3) -> CellKey {
        (
            (point.x / self.cell).floor() as i64,
            (point.y / self.cell).floor() as i64,
            (point.z / self.cell).floor() as i64,
        )
    }

    /// Index of an existing vertex within tolerance of `point`
    pub fn find(&self, point: &Vector3) -> Option<usize> {
        let (kx, ky, kz) = self.key(point);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if let Some(bucket) = self.grid.get(&(kx + dx, ky + dy, kz + dz)) {
                        if let Some(&i) = bucket
                            .iter()
                            .find(|&&i| self.vertices[i].is_equivalent(point, self.tolerance))
                        {
                            return Some(i);
                        }
                    }
                }
            }
        }
        None
    }

    /// Index of `point`, inserting it when no equivalent vertex exists
    pub fn insert(&mut self, point: Vector3) -> usize {
        if let Some(i) = self.find(&point) {
            return i;
        }
        let index = self.vertices.len();
        let key = self.key(&point);
        self.vertices.push(point);
        self.grid.entry(key).or_default().push(index);
        index
    }

    /// Like [`find`](Self::find) but fails with [`GemError::VertexNotFound`]
    pub fn lookup(&self, point: &Vector3, object: &str) -> Result<usize> {
        self.find(point).ok_or_else(|| GemError::VertexNotFound {
            x: point.x,
            y: point.y,
            z: point.z,
            object: object.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn into_vertices(self) -> Vec<Vector3> {
        self.vertices
    }
}

/// A set of faces sharing one vertex list.
///
/// Faces keep their own geometry (holes included) next to the 0-based index
/// list of their boundary.
#[derive(Debug, Clone)]
pub struct Polyface {
    pub vertices: Vec<Vector3>,
    pub faces: Vec<Face3D>,
    pub face_indices: Vec<Vec<usize>>,
}

impl Polyface {
    /// Join faces into one indexed set, merging vertices within `tolerance`.
    ///
    /// `object` names the owner in lookup errors.
    pub fn from_faces(faces: Vec<Face3D>, tolerance: f64, object: &str) -> Result<Self> {
        let mut index = VertexIndex::new(tolerance);
        for face in &faces {
            for v in face.boundary() {
                index.insert(*v);
            }
        }
        let mut face_indices = Vec::with_capacity(faces.len());
        for face in &faces {
            let mut ids: Vec<usize> = Vec::with_capacity(face.boundary().len());
            for v in face.boundary() {
                let i = index.lookup(v, object)?;
                if ids.last() != Some(&i) {
                    ids.push(i);
                }
            }
            while ids.len() > 1 && ids.first() == ids.last() {
                ids.pop();
            }
            face_indices.push(ids);
        }
        Ok(Self {
            vertices: index.into_vertices(),
            faces,
            face_indices,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

/// Turn a planar face into a closed slab of `thickness`.
///
/// The face is first moved back along its normal by half the thickness, then
/// extruded forward by the full thickness. Side walls are emitted for the
/// boundary and for every hole.
pub fn extrude_face(face: &Face3D, thickness: f64) -> Vec<Face3D> {
    let normal = face.normal();
    let base = face.translate(-normal * (thickness / 2.0));
    let offset = normal * thickness;
    let top = base.translate(offset);

    let mut faces = Vec::with_capacity(2 + face.boundary().len());
    faces.push(base.flip());
    faces.push(top);

    let mut walls = |ring: &[Vector3]| {
        let n = ring.len();
        for i in 0..n {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            faces.push(Face3D::new(vec![a, b, b + offset, a + offset]));
        }
    };
    walls(base.boundary());
    for hole in base.holes() {
        let reversed: Vec<Vector3> = hole.iter().rev().copied().collect();
        walls(&reversed);
    }
    faces
}
