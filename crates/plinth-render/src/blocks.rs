//! Per-block validation and render resolution.
//!
//! A stored block is untrusted `{type, data}`. Resolution looks the type
//! up in the catalog, validates the data, and produces a tagged outcome --
//! never an error. Both failure outcomes render as nothing to the visitor
//! but stay observable to diagnostics, because one bad block must not
//! fail an entire page.

use plinth_core::{BlockRecord, Page, RendererRef};
use plinth_schema::{SchemaCatalog, ValidationIssue};
use serde::Serialize;
use serde_json::Value;

/// The tagged result of attempting to validate-and-render one block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RenderOutcome {
    /// The block validated; `data` is safe to hand to `renderer`.
    Rendered { renderer: RendererRef, data: Value },
    /// No catalog entry (or no renderer) for this type.
    UnknownType { block_type: String },
    /// The stored data does not match the current schema version.
    InvalidData {
        block_type: String,
        issues: Vec<ValidationIssue>,
    },
}

impl RenderOutcome {
    #[must_use]
    pub const fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// Supplies the block lists a page renders, pre-filtered by status and
/// time window and pre-sorted by the storage side.
pub trait ActiveBlocks {
    /// Process-wide blocks rendered before every page's own.
    fn header_blocks(&self) -> Vec<BlockRecord>;

    /// The page's own active blocks, in their explicit sort order.
    fn blocks_for(&self, page: &Page) -> Vec<BlockRecord>;

    /// Process-wide blocks rendered after every page's own.
    fn footer_blocks(&self) -> Vec<BlockRecord>;
}

/// Resolve one stored block against the current catalog.
pub fn resolve_block(catalog: &SchemaCatalog, record: &BlockRecord) -> RenderOutcome {
    let Some(entry) = catalog.lookup(&record.block_type) else {
        tracing::debug!(block_type = %record.block_type, "block type not in catalog");
        return RenderOutcome::UnknownType {
            block_type: record.block_type.clone(),
        };
    };

    // An entry nothing can paint renders as nothing, same as an unknown type.
    let Some(renderer) = entry.meta.renderer.clone() else {
        tracing::debug!(block_type = %record.block_type, "block type has no renderer");
        return RenderOutcome::UnknownType {
            block_type: record.block_type.clone(),
        };
    };

    match entry.validate(&record.data) {
        Ok(()) => RenderOutcome::Rendered {
            renderer,
            data: record.data.clone(),
        },
        Err(issues) => {
            tracing::debug!(
                block_type = %record.block_type,
                issues = issues.len(),
                "block data failed validation"
            );
            RenderOutcome::InvalidData {
                block_type: record.block_type.clone(),
                issues,
            }
        }
    }
}

/// Lazily resolve a sequence of stored blocks.
pub fn resolve_blocks<'a, I>(
    catalog: &'a SchemaCatalog,
    records: I,
) -> impl Iterator<Item = RenderOutcome> + 'a
where
    I: IntoIterator<Item = BlockRecord>,
    I::IntoIter: 'a,
{
    records
        .into_iter()
        .map(move |record| resolve_block(catalog, &record))
}

/// A page's full block list: process-wide header blocks, the page's own
/// active blocks, then process-wide footer blocks -- in that fixed order.
pub fn resolve_page_blocks<B>(
    catalog: &SchemaCatalog,
    blocks: &B,
    page: &Page,
) -> Vec<RenderOutcome>
where
    B: ActiveBlocks + ?Sized,
{
    let records = blocks
        .header_blocks()
        .into_iter()
        .chain(blocks.blocks_for(page))
        .chain(blocks.footer_blocks());
    resolve_blocks(catalog, records).collect()
}

/// The subset of outcomes a visitor actually sees.
#[must_use]
pub fn renderable(outcomes: Vec<RenderOutcome>) -> Vec<RenderOutcome> {
    outcomes
        .into_iter()
        .filter(RenderOutcome::is_rendered)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use plinth_schema::{BlockMeta, Field, Shape};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn catalog() -> SchemaCatalog {
        let catalog = SchemaCatalog::new();
        catalog
            .register(
                BlockMeta::keyed("Banner").renderer("banner"),
                Shape::object([Field::new("title", Shape::string())]),
            )
            .unwrap();
        catalog
            .register(
                BlockMeta::keyed("Unpaintable"),
                Shape::object([Field::new("title", Shape::string())]),
            )
            .unwrap();
        catalog
    }

    #[test]
    fn known_type_with_valid_data_renders() {
        let outcome = resolve_block(&catalog(), &BlockRecord::new("Banner", json!({"title": "Ok"})));
        assert_eq!(
            outcome,
            RenderOutcome::Rendered {
                renderer: RendererRef::new("banner"),
                data: json!({"title": "Ok"}),
            }
        );
    }

    #[test]
    fn unknown_type_never_throws_and_does_not_affect_siblings() {
        let catalog = catalog();
        let records = vec![
            BlockRecord::new("Banner", json!({"title": "Ok"})),
            BlockRecord::new("Ghost", json!({})),
        ];

        let outcomes: Vec<RenderOutcome> = resolve_blocks(&catalog, records).collect();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].is_rendered());
        assert_eq!(
            outcomes[1],
            RenderOutcome::UnknownType {
                block_type: "Ghost".to_string()
            }
        );
        assert_eq!(renderable(outcomes).len(), 1);
    }

    #[test]
    fn invalid_data_carries_structured_issues() {
        let outcome = resolve_block(&catalog(), &BlockRecord::new("Banner", json!({"title": 5})));
        let RenderOutcome::InvalidData { block_type, issues } = outcome else {
            panic!("expected invalid data");
        };
        assert_eq!(block_type, "Banner");
        assert_eq!(issues[0].path, "/title");
    }

    #[test]
    fn entry_without_renderer_is_unknown() {
        let outcome = resolve_block(
            &catalog(),
            &BlockRecord::new("Unpaintable", json!({"title": "Ok"})),
        );
        assert_eq!(
            outcome,
            RenderOutcome::UnknownType {
                block_type: "Unpaintable".to_string()
            }
        );
    }

    fn home_page() -> Page {
        use chrono::Utc;
        use plinth_core::{PageKind, PageStatus};

        Page {
            id: 1,
            name: "Home".into(),
            slug: String::new(),
            parent_id: None,
            kind: PageKind::Page,
            status: PageStatus::Published,
            sorting: 0,
            depth: 0,
            is_root: true,
            is_index: true,
            image: None,
            banner: None,
            heading: None,
            summary: None,
            content: None,
            published_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn page_blocks_keep_header_page_footer_order() {
        struct FixedBlocks;
        impl ActiveBlocks for FixedBlocks {
            fn header_blocks(&self) -> Vec<BlockRecord> {
                vec![BlockRecord::new("Banner", json!({"title": "header"}))]
            }
            fn blocks_for(&self, _page: &Page) -> Vec<BlockRecord> {
                vec![BlockRecord::new("Banner", json!({"title": "page"}))]
            }
            fn footer_blocks(&self) -> Vec<BlockRecord> {
                vec![BlockRecord::new("Banner", json!({"title": "footer"}))]
            }
        }

        let outcomes = resolve_page_blocks(&catalog(), &FixedBlocks, &home_page());
        let titles: Vec<&str> = outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                RenderOutcome::Rendered { data, .. } => data["title"].as_str(),
                _ => None,
            })
            .collect();
        assert_eq!(titles, vec!["header", "page", "footer"]);
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let outcome = RenderOutcome::UnknownType {
            block_type: "Ghost".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"outcome": "unknown_type", "block_type": "Ghost"})
        );
    }
}
