//! Error types for solvere-export.

use thiserror::Error;

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can occur while turning an animation into text.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A value that VRML97 cannot represent.
    #[error("entity '{tag}': non-finite value in {field}")]
    NonFinite { tag: String, field: &'static str },

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
