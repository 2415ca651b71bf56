//! Hierarchical page resolution.
//!
//! A request path is an ordered sequence of slug segments; each segment
//! narrows the search to children of the page matched so far. Lookups go
//! through the storage collaborator one segment at a time -- each depends
//! on the previous result, so latency is proportional to path depth, and
//! the depth cap belongs to the caller ([`resolve_request`]), not to the
//! walk itself.

use plinth_core::Page;

use crate::error::PageNotFound;

/// Storage collaborator for the page tree.
///
/// Implementations are expected to serve only pages a visitor may see;
/// the resolver applies no status filtering of its own.
pub trait PageLookup {
    /// `(slug, parent_id)` is unique, so this returns at most one page.
    fn find_by_slug_and_parent(&self, slug: &str, parent_id: Option<i64>) -> Option<Page>;

    /// One page of a page's children, pre-sorted by the storage side.
    fn children_of(&self, parent_id: i64, page_no: u32, per_page: u32) -> PageSet;
}

/// One pagination window of child pages.
#[derive(Debug, Clone, Default)]
pub struct PageSet {
    pub items: Vec<Page>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

/// Resolve `segments` against the page tree.
///
/// An empty sequence looks up the empty slug -- the root/home page. Any
/// unmatched segment fails the whole resolution; there is no partial
/// result and no fallback to a parent.
///
/// The walk is bounded only by input length. Callers must cap the
/// segment count before calling (see [`resolve_request`]).
///
/// # Errors
///
/// Returns [`PageNotFound`] when any segment has no page under the
/// current parent.
pub fn resolve<L>(lookup: &L, segments: &[&str]) -> Result<Page, PageNotFound>
where
    L: PageLookup + ?Sized,
{
    let mut parent_id = None;
    let mut remaining = segments;

    loop {
        // A missing slug is the empty string -- the root/home lookup.
        let (slug, rest) = match remaining.split_first() {
            Some((first, rest)) => (*first, rest),
            None => ("", &[][..]),
        };

        let page = lookup
            .find_by_slug_and_parent(slug, parent_id)
            .ok_or(PageNotFound)?;

        if rest.is_empty() {
            return Ok(page);
        }
        parent_id = Some(page.id);
        remaining = rest;
    }
}

/// Resolve a raw request path, enforcing the routing layer's maximum
/// nesting depth before any lookup happens.
///
/// Paths deeper than `max_depth` are a routing miss -- needless deep
/// lookups on malicious paths never reach storage.
///
/// # Errors
///
/// Returns [`PageNotFound`] for over-deep paths and for unmatched
/// segments.
pub fn resolve_request<L>(lookup: &L, path: &str, max_depth: usize) -> Result<Page, PageNotFound>
where
    L: PageLookup + ?Sized,
{
    let segments = split_path(path);
    if segments.len() > max_depth {
        tracing::debug!(path, max_depth, "request path deeper than routing limit");
        return Err(PageNotFound);
    }
    resolve(lookup, &segments)
}

/// Split a request path into slug segments, dropping empty ones.
#[must_use]
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}
