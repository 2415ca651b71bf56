//! Status and kind enums for pages.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// PageKind
// ---------------------------------------------------------------------------

/// What a page-tree node represents.
///
/// A `Category` groups child pages (its render data leans on the paginated
/// children list); a plain `Page` is a leaf with its own block content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    #[default]
    Page,
    Category,
}

impl PageKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PageStatus
// ---------------------------------------------------------------------------

/// Publication status of a page.
///
/// The core never filters on status itself; the page-lookup collaborator
/// is expected to serve only pages a visitor may see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    Draft,
    #[default]
    Published,
    Archived,
}

impl PageStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(PageKind::Category).unwrap(),
            serde_json::json!("category")
        );
    }

    #[test]
    fn page_status_roundtrip() {
        for status in [PageStatus::Draft, PageStatus::Published, PageStatus::Archived] {
            let json = serde_json::to_string(&status).unwrap();
            let back: PageStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
            assert_eq!(json.trim_matches('"'), status.as_str());
        }
    }
}
