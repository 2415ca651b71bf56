use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{PageKind, PageStatus};

/// A node in the self-referencing page tree.
///
/// `(slug, parent_id)` is unique; the root page has `parent_id = None` and
/// the empty slug. The core only ever traverses pages -- creation and editing
/// happen through external CRUD collaborators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i64>,
    pub kind: PageKind,
    pub status: PageStatus,
    pub sorting: u32,
    /// Levels below the root, maintained by the storage side.
    pub depth: i16,
    pub is_root: bool,
    /// Whether search engines may index this page (`X-Robots-Tag`).
    pub is_index: bool,
    pub image: Option<String>,
    pub banner: Option<String>,
    pub heading: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    /// True for the tree root (empty slug, no parent).
    #[must_use]
    pub fn is_home(&self) -> bool {
        self.parent_id.is_none() && self.slug.is_empty()
    }
}
