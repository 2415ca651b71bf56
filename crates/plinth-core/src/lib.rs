//! # plinth-core
//!
//! Core types and error types for Plinth.
//!
//! This crate provides the foundational types shared across all Plinth crates:
//! - `Page`: the self-referencing page-tree node the resolver traverses
//! - `BlockRecord`: a stored block reference (`type` + untrusted `data`)
//! - `RendererRef`: the opaque handle to whatever paints a validated block
//! - Status enums for pages
//! - Cross-cutting error types
//!
//! Persistence of pages and blocks lives behind collaborator traits in
//! `plinth-render`; this crate only defines the shapes they exchange.

pub mod block;
pub mod enums;
pub mod errors;
pub mod page;

pub use block::{BlockRecord, RendererRef};
pub use enums::{PageKind, PageStatus};
pub use errors::CoreError;
pub use page::Page;
