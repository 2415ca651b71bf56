//! # plinth-schema
//!
//! Block shape declaration, schema catalog, and catalog export for Plinth.
//!
//! This crate provides:
//! - [`Shape`]: a composable validator AST (objects, arrays, enums, unions,
//!   lazy references, primitives), each node optionally carrying a default
//!   and a description
//! - [`SchemaCatalog`]: the process-wide table of block-type identifiers to
//!   compiled validators and metadata, with atomic replace-on-register
//!   semantics for live editing
//! - [`synthesize`]: default-value synthesis so authoring tools and the
//!   catalog export always have a usable example value
//! - [`CatalogDocument`]: the serialized, transmissible snapshot of the
//!   catalog in an OpenAPI-3.0-compatible JSON Schema dialect
//! - [`builtins`]: the stock section shapes every installation starts with
//! - [`source`]: declarative TOML block definitions for the build walk
//!
//! ## Architecture
//!
//! Shapes are authored as data, either in Rust ([`builtins`]) or in TOML
//! files ([`source`]). Registration exports each shape to a JSON Schema
//! node and compiles a `jsonschema` validator up front, so runtime
//! validation of untrusted block data is a single lookup + check. The
//! catalog handle is passed into every component that needs lookup -- there
//! is no ambient global registry.

pub mod builtins;
pub mod source;

mod catalog;
mod error;
mod export;
mod shape;
mod synth;

pub use catalog::{BlockMeta, SchemaCatalog, SchemaEntry};
pub use error::{SchemaError, ValidationIssue};
pub use export::{CatalogDocument, export, import};
pub use shape::{Field, Shape, ShapeKind};
pub use synth::synthesize;
