//! Render error types.

use thiserror::Error;

/// Routing miss: no page answers the requested path.
///
/// This is a normal control-flow outcome, not an exception -- callers
/// surface it as a not-found response and never retry. Resolution has no
/// partial result: any unmatched segment fails the whole path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("page not found")]
pub struct PageNotFound;
