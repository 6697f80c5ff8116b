//! GEM object type registry.
//!
//! Every GEM record starts with a fixed header:
//!
//! ```text
//! LAYER / <layer> / COLOUR / <colour> / CATEGORY / <category> / TYPE / <type>
//! SUBTYPE / <subtype> / COLOURRGB / <rgb> / <KEYWORD> <display name>
//! ```
//!
//! The `(category, type, subtype, keyword)` tuple selects the object kind.
//! Layer and colour values are informational and only matter on write.

use crate::entities::{GemMetadata, SpecialShadeKind};
use crate::notification::{NotificationCollection, NotificationType};
use std::fmt;

/// Keyword opening the name line of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GemKeyword {
    /// Geometry objects (spaces, shades, buildings, terrain)
    Ies,
    /// Landscape objects (trees)
    Lan,
    /// Photovoltaic panels
    Pvp,
}

impl GemKeyword {
    pub const ALL: [GemKeyword; 3] = [GemKeyword::Ies, GemKeyword::Lan, GemKeyword::Pvp];

    pub fn as_str(&self) -> &'static str {
        match self {
            GemKeyword::Ies => "IES",
            GemKeyword::Lan => "LAN",
            GemKeyword::Pvp => "PVP",
        }
    }

    pub fn from_str_opt(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == value)
    }
}

impl fmt::Display for GemKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed header values of one object type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GemHeader {
    pub category: i64,
    pub object_type: i64,
    pub subtype: i64,
    pub layer: i64,
    pub colour: i64,
    pub colour_rgb: i64,
    pub keyword: GemKeyword,
}

/// Kinds of GEM records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GemObjectType {
    Space,
    UnconditionedSpace,
    TranslucentShade,
    ContextBuilding,
    Shade,
    /// Second local shade flavour; read as a shade, never written
    Shade2,
    Topography,
    Tree,
    Pv,
}

impl GemObjectType {
    pub const ALL: [GemObjectType; 9] = [
        GemObjectType::Space,
        GemObjectType::UnconditionedSpace,
        GemObjectType::TranslucentShade,
        GemObjectType::ContextBuilding,
        GemObjectType::Shade,
        GemObjectType::Shade2,
        GemObjectType::Topography,
        GemObjectType::Tree,
        GemObjectType::Pv,
    ];

    /// Header values written for this type
    pub fn header(&self) -> GemHeader {
        let (category, object_type, subtype, layer, colour, colour_rgb, keyword) = match self {
            GemObjectType::Space => (1, 1, 2001, 1, 0, 16711680, GemKeyword::Ies),
            GemObjectType::UnconditionedSpace => (1, 1, 2002, 1, 0, 16711680, GemKeyword::Ies),
            GemObjectType::TranslucentShade => (1, 1, 2102, 64, 0, 0, GemKeyword::Ies),
            GemObjectType::ContextBuilding => (1, 2, 0, 62, 0, 16711935, GemKeyword::Ies),
            GemObjectType::Pv => (3, 202, 0, 1, 0, 32767, GemKeyword::Pvp),
            GemObjectType::Tree => (1, 3, 0, 65, 0, 2399294, GemKeyword::Lan),
            GemObjectType::Topography => (1, 3, 0, 63, 0, 38400, GemKeyword::Ies),
            GemObjectType::Shade => (1, 4, 0, 64, 62, 65280, GemKeyword::Ies),
            GemObjectType::Shade2 => (1, 4, 1, 64, 62, 65280, GemKeyword::Ies),
        };
        GemHeader {
            category,
            object_type,
            subtype,
            layer,
            colour,
            colour_rgb,
            keyword,
        }
    }

    /// Exact lookup of a header tuple
    pub fn lookup(category: i64, object_type: i64, subtype: i64, keyword: GemKeyword) -> Option<Self> {
        use GemKeyword::*;
        match (category, object_type, subtype, keyword) {
            (1, 1, 2001, Ies) => Some(GemObjectType::Space),
            (1, 1, 2002, Ies) => Some(GemObjectType::UnconditionedSpace),
            (1, 1, 2102, Ies) => Some(GemObjectType::TranslucentShade),
            (1, 2, 0, Ies) => Some(GemObjectType::ContextBuilding),
            (3, 202, 0, Pvp) => Some(GemObjectType::Pv),
            (1, 3, 0, Lan) => Some(GemObjectType::Tree),
            (1, 3, 0, Ies) => Some(GemObjectType::Topography),
            (1, 4, 0, Ies) => Some(GemObjectType::Shade),
            (1, 4, 1, Ies) => Some(GemObjectType::Shade2),
            _ => None,
        }
    }

    /// Classify a header tuple, degrading unknown tuples to [`GemObjectType::Shade`]
    /// with one `NotSupported` notification.
    ///
    /// Unknown `PVP` and `LAN` tuples carry a parametric body rather than
    /// vertices and faces, so they degrade to [`GemObjectType::Pv`] and
    /// [`GemObjectType::Tree`] instead.
    pub fn classify(
        category: i64,
        object_type: i64,
        subtype: i64,
        keyword: GemKeyword,
        notifications: &mut NotificationCollection,
    ) -> Self {
        match Self::lookup(category, object_type, subtype, keyword) {
            Some(t) => t,
            None => {
                let fallback = match keyword {
                    GemKeyword::Ies => GemObjectType::Shade,
                    GemKeyword::Pvp => GemObjectType::Pv,
                    GemKeyword::Lan => GemObjectType::Tree,
                };
                notifications.notify(
                    NotificationType::NotSupported,
                    format!(
                        "Unknown GEM object {}-{}-{}-{}; reading it as {}",
                        category, object_type, subtype, keyword, fallback
                    ),
                );
                fallback
            }
        }
    }

    /// Special type recorded in round-trip metadata
    pub fn from_metadata(metadata: &GemMetadata) -> Option<Self> {
        metadata.gem_type.map(Self::from_special)
    }

    pub fn from_special(kind: SpecialShadeKind) -> Self {
        match kind {
            SpecialShadeKind::Topography => GemObjectType::Topography,
            SpecialShadeKind::TranslucentShade => GemObjectType::TranslucentShade,
            SpecialShadeKind::Pv => GemObjectType::Pv,
            SpecialShadeKind::Tree => GemObjectType::Tree,
        }
    }

    /// Special shade kind this type decodes to, if any
    pub fn special_kind(&self) -> Option<SpecialShadeKind> {
        match self {
            GemObjectType::Topography => Some(SpecialShadeKind::Topography),
            GemObjectType::TranslucentShade => Some(SpecialShadeKind::TranslucentShade),
            GemObjectType::Pv => Some(SpecialShadeKind::Pv),
            GemObjectType::Tree => Some(SpecialShadeKind::Tree),
            _ => None,
        }
    }

    /// Spaces decode to rooms, everything else to shades
    pub fn is_room(&self) -> bool {
        matches!(self, GemObjectType::Space | GemObjectType::UnconditionedSpace)
    }

    /// Context objects not attached to the modelled building
    pub fn is_detached(&self) -> bool {
        matches!(
            self,
            GemObjectType::ContextBuilding | GemObjectType::Topography | GemObjectType::Tree
        )
    }

    /// Parametric records without a vertex/face body
    pub fn is_parametric(&self) -> bool {
        matches!(self, GemObjectType::Pv | GemObjectType::Tree)
    }
}

impl fmt::Display for GemObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GemObjectType::Space => "Space",
            GemObjectType::UnconditionedSpace => "UnconditionedSpace",
            GemObjectType::TranslucentShade => "TranslucentShade",
            GemObjectType::ContextBuilding => "ContextBuilding",
            GemObjectType::Shade => "Shade",
            GemObjectType::Shade2 => "Shade_2",
            GemObjectType::Topography => "Topography",
            GemObjectType::Tree => "Tree",
            GemObjectType::Pv => "PV",
        };
        f.write_str(name)
    }
}
