//! Catalog export and import.
//!
//! The wire format is a JSON-Schema dialect compatible with OpenAPI 3.0:
//! `type`, `description`, `default`, `properties` + `required`, `items`,
//! `enum`, `anyOf`, `nullable`, and `$ref` into a shared
//! `#/components/schemas/{name}` pool for lazy references. Exported array
//! nodes always carry a default, and every entry carries a synthesized
//! top-level default, so the authoring side never lacks a usable example.
//!
//! JSON Schema validators ignore OpenAPI's `nullable`, so the compiled
//! validator view wraps nullable nodes in an explicit null alternative;
//! the wire view keeps the `nullable` annotation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::catalog::{BlockMeta, SchemaCatalog};
use crate::error::SchemaError;
use crate::shape::{Field, Shape, ShapeKind};
use crate::synth::synthesize;

const REF_PREFIX: &str = "#/components/schemas/";

/// A serializable snapshot of every keyed entry in a catalog.
///
/// Round-tripping document → catalog → document is structurally stable:
/// the id set and shape topology survive, and both maps are ordered, so
/// two exports of the same catalog are byte-identical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// One JSON Schema node per registered block-type id.
    pub schemas: BTreeMap<String, Value>,
    /// Named helper definitions the `$ref` pointers resolve against.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub components: BTreeMap<String, Value>,
}

impl CatalogDocument {
    /// Pretty-printed JSON, the on-disk interchange form.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// # Errors
    ///
    /// Returns [`SchemaError::Json`] on malformed JSON.
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Serialize the full catalog to an interchange document.
///
/// Only keyed entries are exported -- anonymous entries have no stable
/// name to file them under. Ordering is deterministic (sorted by id).
#[must_use]
pub fn export(catalog: &SchemaCatalog) -> CatalogDocument {
    let definitions = catalog.definitions();
    let components = definitions
        .iter()
        .map(|(name, shape)| {
            (
                name.clone(),
                Value::Object(schema_map(shape, &definitions, Dialect::Wire)),
            )
        })
        .collect();

    let schemas = catalog
        .keyed_entries()
        .into_iter()
        .filter_map(|entry| {
            entry
                .meta
                .id
                .clone()
                .map(|id| (id, entry.schema.clone()))
        })
        .collect();

    CatalogDocument {
        schemas,
        components,
    }
}

/// Rebuild a catalog from an interchange document.
///
/// # Errors
///
/// Returns [`SchemaError::MalformedDocument`] if a node cannot be mapped
/// back to a shape, or [`SchemaError::Compile`] if a rebuilt shape fails
/// validator compilation.
pub fn import(document: &CatalogDocument) -> Result<SchemaCatalog, SchemaError> {
    let catalog = SchemaCatalog::new();

    for (name, node) in &document.components {
        catalog.define(name.clone(), shape_from_schema(node)?);
    }
    for (id, node) in &document.schemas {
        let meta = meta_from_schema(id, node);
        catalog.register(meta, shape_from_schema(node)?)?;
    }

    Ok(catalog)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Dialect {
    /// What goes on the wire and into the document file.
    Wire,
    /// What the `jsonschema` backend compiles.
    Validator,
}

/// The wire-dialect node for one registered entry: the shape's schema plus
/// metadata annotations and a guaranteed top-level default.
pub(crate) fn entry_schema(
    meta: &BlockMeta,
    shape: &Shape,
    definitions: &BTreeMap<String, Shape>,
) -> Value {
    let mut node = schema_map(shape, definitions, Dialect::Wire);

    if let Some(title) = &meta.title {
        node.insert("title".into(), json!(title));
    }
    if let Some(description) = &meta.description {
        node.insert("description".into(), json!(description));
    }
    if let Some(renderer) = &meta.renderer {
        node.insert("x-renderer".into(), json!(renderer.as_str()));
    }
    if let Some(hint) = &meta.input_type {
        node.insert("x-input-type".into(), json!(hint));
    }
    if !node.contains_key("default") {
        node.insert("default".into(), synthesize(shape, definitions));
    }

    Value::Object(node)
}

/// A self-contained document the validator backend can compile: the
/// validator-dialect node with every named definition inlined under
/// `components/schemas` so `$ref` pointers resolve.
pub(crate) fn validator_document(shape: &Shape, definitions: &BTreeMap<String, Shape>) -> Value {
    let mut node = schema_map(shape, definitions, Dialect::Validator);

    if !definitions.is_empty() {
        let pool: Map<String, Value> = definitions
            .iter()
            .map(|(name, definition)| {
                (
                    name.clone(),
                    Value::Object(schema_map(definition, definitions, Dialect::Validator)),
                )
            })
            .collect();
        node.insert("components".into(), json!({ "schemas": pool }));
    }

    Value::Object(node)
}

fn schema_map(
    shape: &Shape,
    definitions: &BTreeMap<String, Shape>,
    dialect: Dialect,
) -> Map<String, Value> {
    let mut node = Map::new();

    match &shape.kind {
        ShapeKind::String => {
            node.insert("type".into(), json!("string"));
        }
        ShapeKind::Number => {
            node.insert("type".into(), json!("number"));
        }
        ShapeKind::Integer => {
            node.insert("type".into(), json!("integer"));
        }
        ShapeKind::Bool => {
            node.insert("type".into(), json!("boolean"));
        }
        ShapeKind::Enum(variants) => {
            node.insert("type".into(), json!("string"));
            node.insert("enum".into(), json!(variants));
        }
        ShapeKind::Object(fields) => {
            node.insert("type".into(), json!("object"));
            let mut properties = Map::new();
            let mut required = Vec::new();
            for Field {
                name,
                shape: field_shape,
                optional,
            } in fields
            {
                properties.insert(
                    name.clone(),
                    Value::Object(schema_map(field_shape, definitions, dialect)),
                );
                if !optional {
                    required.push(name.clone());
                }
            }
            node.insert("properties".into(), Value::Object(properties));
            if !required.is_empty() {
                node.insert("required".into(), json!(required));
            }
        }
        ShapeKind::Array(item) => {
            node.insert("type".into(), json!("array"));
            node.insert(
                "items".into(),
                Value::Object(schema_map(item, definitions, dialect)),
            );
            // Arrays always export a default so the admin panel has a
            // concrete starting value for list inputs.
            node.insert(
                "default".into(),
                shape
                    .default
                    .clone()
                    .unwrap_or_else(|| synthesize(shape, definitions)),
            );
        }
        ShapeKind::Union(variants) => {
            let alternatives: Vec<Value> = variants
                .iter()
                .map(|variant| Value::Object(schema_map(variant, definitions, dialect)))
                .collect();
            node.insert("anyOf".into(), Value::Array(alternatives));
        }
        ShapeKind::Lazy(name) => {
            node.insert("$ref".into(), json!(format!("{REF_PREFIX}{name}")));
        }
    }

    if let Some(description) = &shape.description {
        node.insert("description".into(), json!(description));
    }
    if let Some(default) = &shape.default {
        node.insert("default".into(), default.clone());
    }

    if shape.nullable {
        match dialect {
            Dialect::Wire => {
                node.insert("nullable".into(), json!(true));
            }
            Dialect::Validator => {
                let inner = Value::Object(node);
                node = Map::new();
                node.insert("anyOf".into(), json!([inner, { "type": "null" }]));
            }
        }
    }

    node
}

fn meta_from_schema(id: &str, node: &Value) -> BlockMeta {
    let mut meta = BlockMeta::keyed(id);
    if let Some(title) = node.get("title").and_then(Value::as_str) {
        meta = meta.title(title);
    }
    if let Some(description) = node.get("description").and_then(Value::as_str) {
        meta = meta.description(description);
    }
    if let Some(renderer) = node.get("x-renderer").and_then(Value::as_str) {
        meta = meta.renderer(renderer);
    }
    if let Some(hint) = node.get("x-input-type").and_then(Value::as_str) {
        meta = meta.input_type(hint);
    }
    meta
}

/// Map a wire-dialect node back to a shape.
pub(crate) fn shape_from_schema(node: &Value) -> Result<Shape, SchemaError> {
    let map = node
        .as_object()
        .ok_or_else(|| SchemaError::MalformedDocument("schema node is not an object".into()))?;

    let mut shape = if let Some(reference) = map.get("$ref") {
        let target = reference
            .as_str()
            .and_then(|path| path.strip_prefix(REF_PREFIX))
            .ok_or_else(|| {
                SchemaError::MalformedDocument(format!("unresolvable $ref: {reference}"))
            })?;
        Shape::lazy(target)
    } else if let Some(alternatives) = map.get("anyOf") {
        let variants = alternatives
            .as_array()
            .ok_or_else(|| SchemaError::MalformedDocument("anyOf is not an array".into()))?
            .iter()
            .map(shape_from_schema)
            .collect::<Result<Vec<_>, _>>()?;
        Shape::one_of(variants)
    } else if let Some(variants) = map.get("enum") {
        let variants = variants
            .as_array()
            .ok_or_else(|| SchemaError::MalformedDocument("enum is not an array".into()))?
            .iter()
            .map(|variant| {
                variant.as_str().map(ToString::to_string).ok_or_else(|| {
                    SchemaError::MalformedDocument(format!("non-string enum variant: {variant}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Shape::enumeration(variants)
    } else {
        match map.get("type").and_then(Value::as_str) {
            Some("string") => Shape::string(),
            Some("number") => Shape::number(),
            Some("integer") => Shape::integer(),
            Some("boolean") => Shape::boolean(),
            Some("object") => {
                let required: Vec<&str> = map
                    .get("required")
                    .and_then(Value::as_array)
                    .map(|names| names.iter().filter_map(Value::as_str).collect())
                    .unwrap_or_default();
                let mut fields = Vec::new();
                if let Some(properties) = map.get("properties").and_then(Value::as_object) {
                    for (name, property) in properties {
                        let mut field = Field::new(name.clone(), shape_from_schema(property)?);
                        if !required.contains(&name.as_str()) {
                            field = field.optional();
                        }
                        fields.push(field);
                    }
                }
                Shape::object(fields)
            }
            Some("array") => {
                let items = map.get("items").ok_or_else(|| {
                    SchemaError::MalformedDocument("array node without items".into())
                })?;
                Shape::array(shape_from_schema(items)?)
            }
            other => {
                return Err(SchemaError::MalformedDocument(format!(
                    "unsupported schema node type: {other:?}"
                )));
            }
        }
    };

    if let Some(description) = map.get("description").and_then(Value::as_str) {
        shape = shape.describe(description);
    }
    if let Some(default) = map.get("default") {
        shape = shape.default_value(default.clone());
    }
    if map.get("nullable").and_then(Value::as_bool) == Some(true) {
        shape = shape.nullable();
    }

    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn banner_catalog() -> SchemaCatalog {
        let catalog = SchemaCatalog::new();
        catalog
            .register(
                BlockMeta::keyed("Banner").title("Banner"),
                Shape::object([Field::new(
                    "title",
                    Shape::string().default_value(json!("Hi")),
                )]),
            )
            .unwrap();
        catalog
    }

    #[test]
    fn export_reports_synthesized_entry_default() {
        let document = export(&banner_catalog());

        assert_eq!(document.schemas.len(), 1);
        let banner = &document.schemas["Banner"];
        assert_eq!(banner["default"]["title"], json!("Hi"));
        assert_eq!(banner["properties"]["title"]["default"], json!("Hi"));
    }

    #[test]
    fn export_is_deterministic() {
        let catalog = SchemaCatalog::new();
        for id in ["Zeta", "Alpha", "Mu"] {
            catalog
                .register(
                    BlockMeta::keyed(id),
                    Shape::object([Field::new("title", Shape::string())]),
                )
                .unwrap();
        }

        let first = export(&catalog).to_json().unwrap();
        let second = export(&catalog).to_json().unwrap();
        assert_eq!(first, second);

        let document = export(&catalog);
        let ids: Vec<&str> = document.schemas.keys().map(String::as_str).collect();
        assert_eq!(ids, ["Alpha", "Mu", "Zeta"]);
    }

    #[test]
    fn anonymous_entries_are_not_exported() {
        let catalog = banner_catalog();
        catalog
            .register(
                BlockMeta::anonymous().input_type("phones"),
                Shape::array(Shape::string()),
            )
            .unwrap();

        let document = export(&catalog);
        assert_eq!(document.schemas.len(), 1);
    }

    #[test]
    fn array_nodes_always_carry_a_default() {
        let catalog = SchemaCatalog::new();
        catalog
            .register(BlockMeta::keyed("Tags"), Shape::array(Shape::string()))
            .unwrap();

        let document = export(&catalog);
        assert_eq!(document.schemas["Tags"]["default"], json!([]));
    }

    #[test]
    fn document_roundtrips_through_catalog() {
        let catalog = SchemaCatalog::new();
        catalog.define(
            "Link",
            Shape::object([
                Field::new("title", Shape::string().default_value(json!("Link title"))),
                Field::new("url", Shape::string().default_value(json!("/"))),
            ]),
        );
        catalog
            .register(
                BlockMeta::keyed("Nav")
                    .title("Navigation")
                    .renderer("nav")
                    .input_type("menu"),
                Shape::array(Shape::lazy("Link")),
            )
            .unwrap();
        catalog
            .register(
                BlockMeta::keyed("Hero").description("Top of page"),
                Shape::object([
                    Field::new("style", Shape::enumeration(["gradient", "solid"])),
                    Field::new("image", Shape::string().nullable()).optional(),
                ]),
            )
            .unwrap();

        let document = export(&catalog);
        let rebuilt = import(&document).unwrap();
        let second = export(&rebuilt);

        assert_eq!(document, second);
        assert_eq!(rebuilt.ids(), vec!["Hero".to_string(), "Nav".to_string()]);
        let nav = rebuilt.lookup("Nav").unwrap();
        assert_eq!(nav.meta.renderer.as_ref().map(|r| r.as_str()), Some("nav"));
        assert_eq!(nav.meta.input_type.as_deref(), Some("menu"));
    }

    #[test]
    fn document_json_roundtrip() {
        let document = export(&banner_catalog());
        let text = document.to_json().unwrap();
        let back = CatalogDocument::from_json(&text).unwrap();
        assert_eq!(back, document);
    }

    #[test]
    fn malformed_node_is_rejected() {
        let node = json!({"type": "teapot"});
        assert!(matches!(
            shape_from_schema(&node),
            Err(SchemaError::MalformedDocument(_))
        ));
    }
}
