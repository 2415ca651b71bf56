//! The schema catalog: block-type id → compiled validator + metadata.
//!
//! The catalog is the single shared table behind the rendering pipeline.
//! It is read-mostly: requests look entries up while authoring triggers
//! occasionally re-register them. Entries are `Arc`ed and the maps live
//! behind `RwLock`s, so a replace is atomic -- an in-flight render observes
//! either the old or the new entry in full, never a torn one.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use plinth_core::RendererRef;
use serde_json::Value;

use crate::error::{SchemaError, ValidationIssue};
use crate::export;
use crate::shape::Shape;

/// Authoring metadata attached to a registered shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockMeta {
    /// Stable identifier, unique within the catalog. `None` makes the
    /// entry anonymous: it accumulates and is never replaceable.
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Handle to whatever paints validated data for this block type.
    pub renderer: Option<RendererRef>,
    /// Hint for how an authoring UI should present this shape
    /// (e.g. "link", "image", "menu").
    pub input_type: Option<String>,
}

impl BlockMeta {
    #[must_use]
    pub fn keyed(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn renderer(mut self, renderer: impl Into<RendererRef>) -> Self {
        self.renderer = Some(renderer.into());
        self
    }

    #[must_use]
    pub fn input_type(mut self, hint: impl Into<String>) -> Self {
        self.input_type = Some(hint.into());
        self
    }
}

/// One registered block type: shape, metadata, exported schema node, and
/// the validator compiled from it.
pub struct SchemaEntry {
    pub meta: BlockMeta,
    pub shape: Shape,
    /// The wire-dialect JSON Schema node this entry exports as.
    pub schema: Value,
    validator: jsonschema::Validator,
}

impl SchemaEntry {
    /// Validate untrusted block data against this entry's shape.
    ///
    /// # Errors
    ///
    /// Returns every structural issue found, with its instance path.
    pub fn validate(&self, instance: &Value) -> Result<(), Vec<ValidationIssue>> {
        let issues: Vec<ValidationIssue> = self
            .validator
            .iter_errors(instance)
            .map(|error| ValidationIssue {
                path: error.instance_path.to_string(),
                message: error.to_string(),
            })
            .collect();

        if issues.is_empty() { Ok(()) } else { Err(issues) }
    }

    /// The catalog id, or `"<anonymous>"` for unkeyed entries.
    #[must_use]
    pub fn id(&self) -> &str {
        self.meta.id.as_deref().unwrap_or("<anonymous>")
    }
}

impl std::fmt::Debug for SchemaEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaEntry")
            .field("meta", &self.meta)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

/// The in-memory mapping from block-type identifiers to validators and
/// metadata, plus the named definitions lazy references resolve against.
#[derive(Debug, Default)]
pub struct SchemaCatalog {
    keyed: RwLock<HashMap<String, Arc<SchemaEntry>>>,
    anonymous: RwLock<Vec<Arc<SchemaEntry>>>,
    definitions: RwLock<BTreeMap<String, Shape>>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl SchemaCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a named helper definition that `Shape::lazy` references
    /// resolve against. Definitions must be installed before the entries
    /// that reference them -- registration snapshots the definition table
    /// when it compiles the validator.
    pub fn define(&self, name: impl Into<String>, shape: Shape) {
        write(&self.definitions).insert(name.into(), shape);
    }

    /// Snapshot of the named definitions.
    #[must_use]
    pub fn definitions(&self) -> BTreeMap<String, Shape> {
        read(&self.definitions).clone()
    }

    /// Install or replace the entry for `meta.id`.
    ///
    /// Keyed registration removes any existing entry under the same id
    /// before inserting, so re-running authoring-time registration for an
    /// unchanged file produces the same catalog state, not a duplicate.
    /// Anonymous registration (no id) appends and never collides.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] if the shape exports to a node the
    /// validator backend rejects. The previous entry, if any, stays
    /// registered in that case.
    pub fn register(&self, meta: BlockMeta, shape: Shape) -> Result<Arc<SchemaEntry>, SchemaError> {
        // An empty id cannot be replaced later; treat it as absent.
        let mut meta = meta;
        if meta.id.as_deref() == Some("") {
            meta.id = None;
        }

        let definitions = self.definitions();
        let schema = export::entry_schema(&meta, &shape, &definitions);
        let validator_doc = export::validator_document(&shape, &definitions);
        let validator = jsonschema::validator_for(&validator_doc).map_err(|error| {
            SchemaError::Compile {
                id: meta.id.clone().unwrap_or_else(|| "<anonymous>".into()),
                reason: error.to_string(),
            }
        })?;

        let entry = Arc::new(SchemaEntry {
            meta,
            shape,
            schema,
            validator,
        });

        match entry.meta.id.clone() {
            Some(id) => {
                let mut keyed = write(&self.keyed);
                if keyed.remove(&id).is_some() {
                    tracing::debug!(id, "replacing block schema");
                }
                keyed.insert(id, Arc::clone(&entry));
            }
            None => write(&self.anonymous).push(Arc::clone(&entry)),
        }

        Ok(entry)
    }

    /// Get the entry for a block-type id. Returns `None` if not registered.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<Arc<SchemaEntry>> {
        read(&self.keyed).get(id).cloned()
    }

    /// All registered block-type ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = read(&self.keyed).keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Keyed entries, sorted by id.
    #[must_use]
    pub fn keyed_entries(&self) -> Vec<Arc<SchemaEntry>> {
        let keyed = read(&self.keyed);
        let mut entries: Vec<Arc<SchemaEntry>> = keyed.values().cloned().collect();
        entries.sort_unstable_by(|a, b| a.id().cmp(b.id()));
        entries
    }

    /// Anonymous entries, in registration order.
    #[must_use]
    pub fn anonymous_entries(&self) -> Vec<Arc<SchemaEntry>> {
        read(&self.anonymous).clone()
    }

    /// Total number of entries, keyed and anonymous.
    #[must_use]
    pub fn len(&self) -> usize {
        read(&self.keyed).len() + read(&self.anonymous).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
