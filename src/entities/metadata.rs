//! Round-trip markers attached to model objects

use serde_json::{Map, Value};
use std::fmt;

/// Key holding the shade group identifier
pub const GROUP_ID_KEY: &str = "__group_id__";
/// Key holding the special shade kind
pub const GEM_TYPE_KEY: &str = "__gem_type__";
/// Older files used this key for the special shade kind
pub const LEGACY_GEM_TYPE_KEY: &str = "__ies_type__";
/// Key holding the tree variant number
pub const TREE_TYPE_KEY: &str = "__tree_type__";
/// Key marking objects synthesized to cover an imported hole
pub const HOLE_IMPORT_KEY: &str = "__ies_import__";
/// Key marking objects that exist only for display after import
pub const IMPORT_ONLY_KEY: &str = "__import_only__";

/// Shade flavours that carry their own GEM encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialShadeKind {
    Topography,
    TranslucentShade,
    Pv,
    Tree,
}

impl SpecialShadeKind {
    /// Tag string stored in user data
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialShadeKind::Topography => "topography",
            SpecialShadeKind::TranslucentShade => "translucent_shade",
            SpecialShadeKind::Pv => "pv",
            SpecialShadeKind::Tree => "tree",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "topography" => Some(SpecialShadeKind::Topography),
            "translucent_shade" => Some(SpecialShadeKind::TranslucentShade),
            "pv" => Some(SpecialShadeKind::Pv),
            "tree" => Some(SpecialShadeKind::Tree),
            _ => None,
        }
    }

    /// Read the kind from a user-data object, accepting the legacy key
    pub fn from_user_data(user_data: &Value) -> Option<Self> {
        let map = user_data.as_object()?;
        let tag = map
            .get(GEM_TYPE_KEY)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .or_else(|| map.get(LEGACY_GEM_TYPE_KEY).and_then(Value::as_str))?;
        Self::from_tag(tag)
    }
}

impl fmt::Display for SpecialShadeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed replacement for the free-form user-data dictionary.
///
/// Every marker the codec reads or writes has its own field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GemMetadata {
    /// Shades sharing a group id are merged into one closed volume on write
    pub group_id: Option<String>,
    /// Special encoding (tree, PV, topography, translucent shade)
    pub gem_type: Option<SpecialShadeKind>,
    /// Tree variant from a `2D Tree N` record
    pub tree_type: Option<u32>,
    /// Synthesized while rebuilding holes on import; never written back
    pub hole_import: bool,
    /// Display-only geometry created on import; never written back
    pub import_only: bool,
}

impl GemMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn with_gem_type(mut self, kind: SpecialShadeKind) -> Self {
        self.gem_type = Some(kind);
        self
    }

    pub fn with_tree_type(mut self, tree_type: u32) -> Self {
        self.tree_type = Some(tree_type);
        self
    }

    pub fn hole_import() -> Self {
        Self {
            hole_import: true,
            ..Self::default()
        }
    }

    /// Object must not be written to GEM
    pub fn is_suppressed(&self) -> bool {
        self.hole_import || self.import_only
    }

    /// Build from a JSON user-data object
    pub fn from_user_data(user_data: &Value) -> Self {
        let map = match user_data.as_object() {
            Some(map) => map,
            None => return Self::default(),
        };
        let flag = |key: &str| map.get(key).and_then(Value::as_bool).unwrap_or(false);
        Self {
            group_id: map
                .get(GROUP_ID_KEY)
                .and_then(Value::as_str)
                .map(str::to_string),
            gem_type: SpecialShadeKind::from_user_data(user_data),
            tree_type: map
                .get(TREE_TYPE_KEY)
                .and_then(Value::as_u64)
                .and_then(|v| u32::try_from(v).ok()),
            hole_import: flag(HOLE_IMPORT_KEY),
            import_only: flag(IMPORT_ONLY_KEY),
        }
    }

    /// Export as a JSON user-data object (only set markers are emitted)
    pub fn to_user_data(&self) -> Value {
        let mut map = Map::new();
        if let Some(group_id) = &self.group_id {
            map.insert(GROUP_ID_KEY.to_string(), Value::from(group_id.as_str()));
        }
        if let Some(kind) = self.gem_type {
            map.insert(GEM_TYPE_KEY.to_string(), Value::from(kind.as_str()));
        }
        if let Some(tree_type) = self.tree_type {
            map.insert(TREE_TYPE_KEY.to_string(), Value::from(tree_type));
        }
        if self.hole_import {
            map.insert(HOLE_IMPORT_KEY.to_string(), Value::Bool(true));
        }
        if self.import_only {
            map.insert(IMPORT_ONLY_KEY.to_string(), Value::Bool(true));
        }
        Value::Object(map)
    }
}
