//! Building model document

use crate::entities::{ModelObject, Room, Shade, ShadeMesh};
use crate::notification::NotificationCollection;
use crate::types::{Face3D, Units};
use ahash::AHashSet;

/// Default spatial tolerance of a model read from GEM
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Top-level container of rooms, orphaned shades and shade meshes
#[derive(Debug, Clone)]
pub struct Model {
    /// Unique identifier
    pub identifier: String,
    /// Human readable name
    pub display_name: Option<String>,
    /// Length units of every coordinate
    pub units: Units,
    /// Spatial tolerance in model units
    pub tolerance: f64,
    pub rooms: Vec<Room>,
    /// Shades not attached to any room
    pub orphaned_shades: Vec<Shade>,
    pub shade_meshes: Vec<ShadeMesh>,
    /// Notifications collected while the model was read
    pub notifications: NotificationCollection,
}

impl Model {
    /// Create an empty model in meters
    pub fn new(identifier: impl Into<String>) -> Self {
        Model {
            identifier: identifier.into(),
            display_name: None,
            units: Units::Meters,
            tolerance: DEFAULT_TOLERANCE,
            rooms: Vec::new(),
            orphaned_shades: Vec::new(),
            shade_meshes: Vec::new(),
            notifications: NotificationCollection::new(),
        }
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Display name, falling back to the identifier
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }

    pub fn add_room(&mut self, room: Room) {
        self.rooms.push(room);
    }

    pub fn add_shade(&mut self, shade: Shade) {
        self.orphaned_shades.push(shade);
    }

    pub fn add_shade_mesh(&mut self, mesh: ShadeMesh) {
        self.shade_meshes.push(mesh);
    }

    /// Deep copy for writers that rename objects in place
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Scale every geometry and the tolerance into `units`
    pub fn convert_to_units(&mut self, units: Units) {
        if self.units == units {
            return;
        }
        let factor = self.units.conversion_factor(units);
        for room in &mut self.rooms {
            room.scale(factor);
        }
        for shade in &mut self.orphaned_shades {
            shade.scale(factor);
        }
        for mesh in &mut self.shade_meshes {
            mesh.scale(factor);
        }
        self.tolerance *= factor;
        self.units = units;
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn face_count(&self) -> usize {
        self.rooms.iter().map(|r| r.faces.len()).sum()
    }

    /// Every shade in the model: room-hosted first, then orphaned
    pub fn shades(&self) -> Vec<&Shade> {
        let mut shades: Vec<&Shade> = self.rooms.iter().flat_map(|r| r.all_shades()).collect();
        shades.extend(self.orphaned_shades.iter());
        shades
    }

    /// Lightweight checks worth running before a GEM export.
    ///
    /// Reports duplicate room identifiers, degenerate faces and non-planar
    /// faces. An empty list means the model is ready to export.
    pub fn check_for_gem(&self, tolerance: f64) -> Vec<String> {
        let mut messages = Vec::new();

        let mut seen = AHashSet::new();
        for room in &self.rooms {
            if !seen.insert(room.identifier()) {
                messages.push(format!("Duplicate room identifier: {}", room.identifier()));
            }
        }

        let mut check = |owner: &str, geometry: &Face3D| {
            if geometry.unique_vertex_count(tolerance) < 3 {
                messages.push(format!("{} has fewer than 3 unique vertices", owner));
            } else if !geometry.is_planar(tolerance) {
                messages.push(format!("{} is not planar within {}", owner, tolerance));
            }
        };
        for room in &self.rooms {
            for face in &room.faces {
                check(&format!("Face {} in room {}", face.identifier(), room.identifier()), &face.geometry);
                for aperture in &face.apertures {
                    check(&format!("Aperture {}", aperture.identifier()), &aperture.geometry);
                }
                for door in &face.doors {
                    check(&format!("Door {}", door.identifier()), &door.geometry);
                }
            }
        }
        for shade in &self.orphaned_shades {
            check(&format!("Shade {}", shade.identifier()), &shade.geometry);
        }
        messages
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new("Model")
    }
}
