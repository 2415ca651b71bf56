//! Page render-data assembly.
//!
//! Pure composition: the resolved page, one pagination window of child
//! pages (fetched once, not re-queried per field), the fully resolved
//! block list, and the SEO meta fields, shaped into a single response
//! payload.

use plinth_core::Page;
use plinth_schema::SchemaCatalog;
use serde::Serialize;

use crate::blocks::{ActiveBlocks, RenderOutcome, resolve_page_blocks};
use crate::resolver::{PageLookup, split_path};

/// The per-request inputs: the already-split path and which window of
/// children to fetch.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    pub segments: Vec<String>,
    /// 1-based child pagination window.
    pub child_page: u32,
}

impl RenderRequest {
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        Self {
            segments: split_path(path).into_iter().map(String::from).collect(),
            child_page: 1,
        }
    }

    #[must_use]
    pub const fn with_child_page(mut self, child_page: u32) -> Self {
        self.child_page = child_page;
        self
    }

    /// The canonical URL for this request (`/` for the root).
    #[must_use]
    pub fn url(&self) -> String {
        if self.segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", self.segments.join("/"))
        }
    }
}

/// SEO fields for one page, supplied by the meta collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
}

/// Meta/SEO collaborator.
pub trait MetaProvider {
    fn meta_for(&self, page: &Page) -> PageMeta;
}

/// The externally-shaped page resource embedded in the response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontPage {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub slug: String,
    pub url: String,
    pub image: Option<String>,
    pub banner: Option<String>,
    pub heading: Option<String>,
    pub summary: Option<String>,
    pub is_root: bool,
    pub depth: i16,
}

impl FrontPage {
    #[must_use]
    pub fn new(page: &Page, url: impl Into<String>) -> Self {
        Self {
            id: page.id,
            parent_id: page.parent_id,
            name: page.name.clone(),
            slug: page.slug.clone(),
            url: url.into(),
            image: page.image.clone(),
            banner: page.banner.clone(),
            heading: page.heading.clone(),
            summary: page.summary.clone(),
            is_root: page.is_root,
            depth: page.depth,
        }
    }
}

/// One pagination window of externally-shaped child pages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChildPages {
    pub items: Vec<FrontPage>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

/// Everything needed to paint one resolved page.
#[derive(Debug, Clone, Serialize)]
pub struct RenderData {
    pub page: FrontPage,
    pub children: ChildPages,
    pub blocks: Vec<RenderOutcome>,
    pub meta: PageMeta,
}

/// Compose the response payload for `page`.
///
/// Children are fetched once through the lookup collaborator; their URLs
/// derive from the request path, so no per-child queries happen. Blocks
/// are the fixed header + page + footer concatenation from
/// [`resolve_page_blocks`].
pub fn assemble<L, B, M>(
    page: &Page,
    request: &RenderRequest,
    catalog: &SchemaCatalog,
    lookup: &L,
    blocks: &B,
    meta: &M,
    child_page_size: u32,
) -> RenderData
where
    L: PageLookup + ?Sized,
    B: ActiveBlocks + ?Sized,
    M: MetaProvider + ?Sized,
{
    let base_url = request.url();
    let child_url = |slug: &str| {
        if base_url == "/" {
            format!("/{slug}")
        } else {
            format!("{base_url}/{slug}")
        }
    };

    let window = lookup.children_of(page.id, request.child_page, child_page_size);
    let children = ChildPages {
        items: window
            .items
            .iter()
            .map(|child| FrontPage::new(child, child_url(&child.slug)))
            .collect(),
        total: window.total,
        page: window.page,
        per_page: window.per_page,
    };

    RenderData {
        page: FrontPage::new(page, base_url),
        children,
        blocks: resolve_page_blocks(catalog, blocks, page),
        meta: meta.meta_for(page),
    }
}

/// The `X-Robots-Tag` value the serving layer should attach for `page`.
#[must_use]
pub const fn robots_tag(page: &Page) -> &'static str {
    if page.is_index {
        "index, follow"
    } else {
        "noindex, nofollow"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use plinth_core::{BlockRecord, PageKind, PageStatus};
    use plinth_schema::{BlockMeta, Field, Shape};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::resolver::PageSet;

    fn page(id: i64, slug: &str, parent_id: Option<i64>) -> Page {
        Page {
            id,
            name: slug.to_string(),
            slug: slug.to_string(),
            parent_id,
            kind: PageKind::Category,
            status: PageStatus::Published,
            sorting: 0,
            depth: i16::from(parent_id.is_some()),
            is_root: parent_id.is_none(),
            is_index: parent_id.is_none(),
            image: None,
            banner: None,
            heading: Some(format!("{slug} heading")),
            summary: None,
            content: None,
            published_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    struct FakeStore {
        children: Vec<Page>,
    }

    impl PageLookup for FakeStore {
        fn find_by_slug_and_parent(&self, _: &str, _: Option<i64>) -> Option<Page> {
            None
        }

        fn children_of(&self, _parent_id: i64, page_no: u32, per_page: u32) -> PageSet {
            PageSet {
                items: self.children.clone(),
                total: self.children.len() as u64,
                page: page_no,
                per_page,
            }
        }
    }

    struct PageBlocksOnly;
    impl ActiveBlocks for PageBlocksOnly {
        fn header_blocks(&self) -> Vec<BlockRecord> {
            Vec::new()
        }
        fn blocks_for(&self, _page: &Page) -> Vec<BlockRecord> {
            vec![
                BlockRecord::new("Banner", json!({"title": "Ok"})),
                BlockRecord::new("Ghost", json!({})),
            ]
        }
        fn footer_blocks(&self) -> Vec<BlockRecord> {
            Vec::new()
        }
    }

    struct StaticMeta;
    impl MetaProvider for StaticMeta {
        fn meta_for(&self, page: &Page) -> PageMeta {
            PageMeta {
                title: format!("{} | Plinth", page.name),
                description: "A page".to_string(),
                image: None,
                canonical: None,
            }
        }
    }

    fn catalog() -> SchemaCatalog {
        let catalog = SchemaCatalog::new();
        catalog
            .register(
                BlockMeta::keyed("Banner").renderer("banner"),
                Shape::object([Field::new("title", Shape::string())]),
            )
            .unwrap();
        catalog
    }

    #[test]
    fn assembles_page_children_blocks_and_meta() {
        let docs = page(10, "docs", None);
        let store = FakeStore {
            children: vec![page(11, "install", Some(10)), page(12, "usage", Some(10))],
        };
        let request = RenderRequest::from_path("/docs");

        let data = assemble(
            &docs,
            &request,
            &catalog(),
            &store,
            &PageBlocksOnly,
            &StaticMeta,
            12,
        );

        assert_eq!(data.page.url, "/docs");
        assert_eq!(data.children.items.len(), 2);
        assert_eq!(data.children.items[0].url, "/docs/install");
        assert_eq!(data.children.total, 2);
        assert_eq!(data.children.per_page, 12);

        // One rendered banner, one unknown type -- both present, in order.
        assert_eq!(data.blocks.len(), 2);
        assert!(data.blocks[0].is_rendered());
        assert!(!data.blocks[1].is_rendered());

        assert_eq!(data.meta.title, "docs | Plinth");
    }

    #[test]
    fn root_request_builds_child_urls_from_slash() {
        let home = page(1, "", None);
        let store = FakeStore {
            children: vec![page(2, "about", Some(1))],
        };
        let request = RenderRequest::from_path("/");

        let data = assemble(
            &home,
            &request,
            &catalog(),
            &store,
            &PageBlocksOnly,
            &StaticMeta,
            12,
        );

        assert_eq!(data.page.url, "/");
        assert_eq!(data.children.items[0].url, "/about");
    }

    #[test]
    fn payload_serializes_with_expected_sections() {
        let docs = page(10, "docs", None);
        let store = FakeStore { children: Vec::new() };
        let data = assemble(
            &docs,
            &RenderRequest::from_path("/docs"),
            &catalog(),
            &store,
            &PageBlocksOnly,
            &StaticMeta,
            12,
        );

        let value = serde_json::to_value(&data).unwrap();
        for key in ["page", "children", "blocks", "meta"] {
            assert!(value.get(key).is_some(), "missing payload section {key}");
        }
        assert_eq!(value["page"]["slug"], json!("docs"));
    }

    #[test]
    fn robots_tag_follows_is_index() {
        let indexed = page(1, "", None);
        let hidden = page(2, "about", Some(1));
        assert_eq!(robots_tag(&indexed), "index, follow");
        assert_eq!(robots_tag(&hidden), "noindex, nofollow");
    }
}
