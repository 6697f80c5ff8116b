//! Error types for gem-tools-rs

use std::io;
use thiserror::Error;

/// Main error type for GEM translation
#[derive(Debug, Error)]
pub enum GemError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing a GEM segment
    #[error("Parse error: {message}\n--- segment ---\n{segment}")]
    Parse { message: String, segment: String },

    /// A segment has none of the `IES`, `LAN` or `PVP` keyword sections
    #[error("Missing keyword section (IES, LAN or PVP) in segment:\n{0}")]
    MissingKeyword(String),

    /// Opening type other than 0 (aperture), 1 (door) or 2 (hole)
    #[error("Unsupported opening type {opening_type} in segment:\n{segment}")]
    UnsupportedOpeningType { opening_type: i64, segment: String },

    /// Tree record that is not a `2D Tree N`
    #[error("Unsupported tree type '{tree_type}' in segment:\n{segment}")]
    UnsupportedTreeType { tree_type: String, segment: String },

    /// Display name with a broken `<name> [<id>]` tag
    #[error("Malformed identifier tag in display name: {0:?}")]
    MalformedIdentifier(String),

    /// Display name that cannot produce a two letter identifier code
    #[error("Invalid display name for identifier generation: {0:?}")]
    InvalidName(String),

    /// A face vertex could not be found in the object vertex list
    #[error("Vertex ({x}, {y}, {z}) not found in vertex list of {object}")]
    VertexNotFound { x: f64, y: f64, z: f64, object: String },

    /// Geometry operation failed
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// JSON serialization of side outputs failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

impl GemError {
    /// Build a parse error that carries the raw segment text
    pub fn parse(message: impl Into<String>, segment: &str) -> Self {
        GemError::Parse {
            message: message.into(),
            segment: segment.to_string(),
        }
    }
}

/// Result type alias for gem-tools-rs operations
pub type Result<T> = std::result::Result<T, GemError>;

impl From<String> for GemError {
    fn from(s: String) -> Self {
        GemError::Custom(s)
    }
}

impl From<&str> for GemError {
    fn from(s: &str) -> Self {
        GemError::Custom(s.to_string())
    }
}
