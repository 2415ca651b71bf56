//! Schema error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while building, exporting, or importing schemas.
///
/// Validation of block data against a compiled schema is deliberately not
/// here -- it surfaces as a list of [`ValidationIssue`]s on the per-block
/// render outcome, never as an error that could fail a page.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A shape exported to a JSON Schema node that `jsonschema` rejects.
    #[error("schema compilation failed for '{id}': {reason}")]
    Compile { id: String, reason: String },

    /// A catalog document node could not be mapped back to a shape.
    #[error("malformed catalog document: {0}")]
    MalformedDocument(String),

    /// A declarative block source file could not be parsed.
    #[error("invalid block source {path}: {reason}")]
    Source { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One structured validation failure for a block's stored data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// JSON Pointer into the instance that failed (`""` for the root).
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}
