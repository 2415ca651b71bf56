//! Cross-cutting error types for Plinth.
//!
//! Domain-specific errors (`SchemaError`, `SyncError`, `RenderError`,
//! `ConfigError`) are defined in their respective crates; everything
//! converges into `anyhow` at the CLI boundary.

use thiserror::Error;

/// Errors that can be raised by any Plinth crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Lookup returned no result.
    #[error("not found: {entity} {key}")]
    NotFound { entity: String, key: String },

    /// Data failed validation (schema, format, constraints).
    #[error("validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
