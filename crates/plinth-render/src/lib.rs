//! # plinth-render
//!
//! The request-facing half of Plinth: resolve a request path to a page in
//! the tree, validate-and-resolve that page's blocks against the schema
//! catalog, and compose the response payload.
//!
//! Everything here is request-scoped and stateless -- storage, block
//! filtering, and SEO meta come in through collaborator traits
//! ([`PageLookup`], [`ActiveBlocks`], [`MetaProvider`]), and the only
//! shared state touched is the read-mostly [`plinth_schema::SchemaCatalog`].
//!
//! Failure is deliberately local: a routing miss is a [`PageNotFound`]
//! result, and a bad block degrades to an unrenderable
//! [`RenderOutcome`] without disturbing its siblings or the page.

mod assemble;
mod blocks;
mod error;
mod resolver;

pub use assemble::{ChildPages, FrontPage, MetaProvider, PageMeta, RenderData, RenderRequest, assemble, robots_tag};
pub use blocks::{
    ActiveBlocks, RenderOutcome, renderable, resolve_block, resolve_blocks, resolve_page_blocks,
};
pub use error::PageNotFound;
pub use resolver::{PageLookup, PageSet, resolve, resolve_request, split_path};
